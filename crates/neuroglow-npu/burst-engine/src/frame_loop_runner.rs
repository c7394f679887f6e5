// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Frame loop runner.

Owns everything one animation needs: configuration, topology, simulator,
visual style, random sources and the drawing surface. The host drives it:

```text
start()            -> subscribe to resizes, request first tick
on_frame(handle)   -> drain updates, simulate, render, request next tick
on_resize(event)   -> stop, rebuild topology, start
stop()             -> cancel pending tick, unsubscribe
```

A tick whose handle does not match the pending request is ignored, so once
`stop()` returns no further tick is applied.
*/

use neuroglow_brain_development::{develop_topology, rng_from_seed, DevelopmentParams};
use neuroglow_config::{sanitize_config, ConfigPatch, ConfigValidationError, NeuroglowConfig, PatchOutcome};
use neuroglow_npu_neural::Topology;
use neuroglow_viz::{render_frame, DrawingSurface, RenderStats, VisualMapper};
use rand::RngCore;
use serde::Serialize;
use std::fmt;
use tracing::{debug, error, info, trace, warn};

use crate::activation_simulator::{activation_parameters, ActivationSimulator};
use crate::neural_dynamics::DynamicsResult;
use crate::parameter_update_queue::ParameterUpdateQueue;
use crate::scheduler::{FrameScheduler, ResizeEvent, ResizeNotifier, SubscriptionId, TickHandle};
use crate::synaptic_propagation::PropagationStats;

/// Offset separating the render stream from the simulation stream of a seed
const RENDER_STREAM: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EngineState {
    Stopped,
    Running,
}

impl fmt::Display for EngineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineState::Stopped => f.write_str("stopped"),
            EngineState::Running => f.write_str("running"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LifecycleError {
    #[error("No drawing surface attached")]
    SurfaceUnavailable,

    #[error("Drawing surface is unusable ({width}x{height})")]
    InvalidSurface { width: f32, height: f32 },
}

/// What `apply_configuration` did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigUpdateReport {
    pub topology_rebuilt: bool,
    pub style_changed: bool,
    pub dynamics_changed: bool,
    /// Rejected or clamped fields
    pub warnings: Vec<ConfigValidationError>,
}

/// Statistics of one applied tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameStats {
    /// 1-based tick number since the engine was created
    pub tick: u64,
    pub generation: u64,
    pub time_secs: f64,
    pub propagation: PropagationStats,
    pub dynamics: DynamicsResult,
    pub render: RenderStats,
}

pub struct FrameLoopRunner<S: DrawingSurface> {
    config: NeuroglowConfig,
    mapper: VisualMapper,
    simulator: ActivationSimulator,
    surface: Option<S>,
    scheduler: Box<dyn FrameScheduler>,
    resize_notifier: Box<dyn ResizeNotifier>,
    topology: Option<Topology>,
    generation: u64,
    state: EngineState,
    pending_tick: Option<TickHandle>,
    resize_subscription: Option<SubscriptionId>,
    updates: ParameterUpdateQueue,
    /// Topology builds and simulation
    rng: Box<dyn RngCore>,
    /// Curve wobble only
    render_rng: Box<dyn RngCore>,
    tick_count: u64,
    last_frame_stats: Option<FrameStats>,
}

impl<S: DrawingSurface> FrameLoopRunner<S> {
    /// Create a stopped engine without a surface
    ///
    /// Out-of-range configuration values are clamped (and logged).
    pub fn new(
        mut config: NeuroglowConfig,
        scheduler: Box<dyn FrameScheduler>,
        resize_notifier: Box<dyn ResizeNotifier>,
    ) -> Self {
        for warning in sanitize_config(&mut config) {
            warn!("[CONFIG] {}", warning);
        }
        let seed = config.system.seed;
        Self {
            mapper: VisualMapper::from_config(&config),
            simulator: ActivationSimulator::new(activation_parameters(&config.dynamics)),
            config,
            surface: None,
            scheduler,
            resize_notifier,
            topology: None,
            generation: 0,
            state: EngineState::Stopped,
            pending_tick: None,
            resize_subscription: None,
            updates: ParameterUpdateQueue::new(),
            rng: Box::new(rng_from_seed(seed)),
            render_rng: Box::new(rng_from_seed(seed.map(|s| s ^ RENDER_STREAM))),
            tick_count: 0,
            last_frame_stats: None,
        }
    }

    pub fn with_surface(mut self, surface: S) -> Self {
        self.attach_surface(surface);
        self
    }

    /// Replace both random sources (simulation first, then render)
    pub fn with_rngs(mut self, rng: Box<dyn RngCore>, render_rng: Box<dyn RngCore>) -> Self {
        self.rng = rng;
        self.render_rng = render_rng;
        self
    }

    /// Attach (or replace) the drawing surface
    ///
    /// An existing topology is rebuilt for the new dimensions.
    pub fn attach_surface(&mut self, surface: S) {
        self.surface = Some(surface);
        self.reconfigure_topology();
    }

    /// Begin animating (idempotent)
    ///
    /// # Errors
    ///
    /// Fails without a surface or with a surface whose dimensions are not
    /// finite; the engine then stays stopped.
    pub fn start(&mut self) -> Result<(), LifecycleError> {
        if self.state == EngineState::Running {
            debug!("[FRAME-LOOP] start() ignored, already running");
            return Ok(());
        }

        let Some(surface) = self.surface.as_ref() else {
            error!("[FRAME-LOOP] Cannot start: no drawing surface attached");
            return Err(LifecycleError::SurfaceUnavailable);
        };
        if !surface.is_valid() {
            let (width, height) = (surface.width(), surface.height());
            error!("[FRAME-LOOP] Cannot start: surface {}x{} is unusable", width, height);
            return Err(LifecycleError::InvalidSurface { width, height });
        }

        if self.topology.is_none() {
            self.rebuild_topology();
        }
        self.resize_subscription = Some(self.resize_notifier.subscribe());
        self.pending_tick = Some(self.scheduler.request_tick());
        self.state = EngineState::Running;

        info!(
            "[FRAME-LOOP] Started (generation {}, {} nodes)",
            self.generation,
            self.topology.as_ref().map_or(0, Topology::node_count)
        );
        Ok(())
    }

    /// Halt animating and release subscriptions (idempotent)
    pub fn stop(&mut self) {
        if self.state == EngineState::Stopped {
            return;
        }
        if let Some(handle) = self.pending_tick.take() {
            self.scheduler.cancel_tick(handle);
        }
        if let Some(id) = self.resize_subscription.take() {
            self.resize_notifier.unsubscribe(id);
        }
        self.state = EngineState::Stopped;
        info!("[FRAME-LOOP] Stopped after {} ticks", self.tick_count);
    }

    /// Run one tick if `handle` is the pending request
    ///
    /// `now_secs` only drives the pulse phase; simulation quantities are per
    /// tick. Returns `None` for stale or unexpected handles.
    pub fn on_frame(&mut self, handle: TickHandle, now_secs: f64) -> Option<FrameStats> {
        if self.state != EngineState::Running || self.pending_tick != Some(handle) {
            trace!("[FRAME-LOOP] Ignoring stale tick {:?}", handle);
            return None;
        }
        self.pending_tick = None;

        self.drain_parameter_updates();

        let (Some(topology), Some(surface)) = (self.topology.as_mut(), self.surface.as_mut()) else {
            // Running implies both; restore the loop rather than stall
            self.pending_tick = Some(self.scheduler.request_tick());
            return None;
        };

        let step = self.simulator.step(topology, &mut *self.rng);
        let render = render_frame(surface, topology, &self.mapper, now_secs, &mut *self.render_rng);

        self.tick_count += 1;
        let stats = FrameStats {
            tick: self.tick_count,
            generation: self.generation,
            time_secs: now_secs,
            propagation: step.propagation,
            dynamics: step.dynamics,
            render,
        };
        self.last_frame_stats = Some(stats);
        self.pending_tick = Some(self.scheduler.request_tick());

        trace!(
            "[FRAME-LOOP] Tick {}: {} active nodes, total activation {:.3}",
            stats.tick,
            stats.dynamics.active_nodes,
            stats.dynamics.total_activation
        );
        Some(stats)
    }

    /// Surface resized: resize, then stop / rebuild / start
    ///
    /// Events with non-finite dimensions are dropped so that a running engine
    /// keeps its current surface instead of failing to restart.
    pub fn on_resize(&mut self, event: ResizeEvent) {
        if !event.width.is_finite() || !event.height.is_finite() {
            warn!(
                "[FRAME-LOOP] Ignoring resize to unusable dimensions {}x{}",
                event.width, event.height
            );
            return;
        }
        let Some(surface) = self.surface.as_mut() else {
            warn!("[FRAME-LOOP] Resize to {}x{} without a surface", event.width, event.height);
            return;
        };
        surface.resize(event.width, event.height);
        debug!("[FRAME-LOOP] Surface resized to {}x{}", event.width, event.height);
        self.reconfigure_topology();
    }

    /// Merge a configuration patch now
    ///
    /// Topology-affecting changes rebuild the network (a running engine is
    /// stopped and restarted around the rebuild).
    pub fn apply_configuration(&mut self, patch: ConfigPatch) -> ConfigUpdateReport {
        self.apply_patch(patch, false)
    }

    /// Snapshot of the current configuration
    pub fn get_configuration(&self) -> NeuroglowConfig {
        self.config.clone()
    }

    /// Queue handle for updates from other threads, applied at the next tick
    pub fn configuration_handle(&self) -> ParameterUpdateQueue {
        self.updates.clone()
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == EngineState::Running
    }

    pub fn topology(&self) -> Option<&Topology> {
        self.topology.as_ref()
    }

    /// Mutable topology access (forcing activations in tests and demos)
    pub fn topology_mut(&mut self) -> Option<&mut Topology> {
        self.topology.as_mut()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn last_frame_stats(&self) -> Option<FrameStats> {
        self.last_frame_stats
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn visual_mapper(&self) -> &VisualMapper {
        &self.mapper
    }

    /// Apply queued patches one at a time so a rejected field only drops itself
    fn drain_parameter_updates(&mut self) {
        let patches = self.updates.drain_all();
        if patches.is_empty() {
            return;
        }
        debug!("[FRAME-LOOP] Applying {} queued configuration update(s)", patches.len());
        for patch in patches {
            self.apply_patch(patch, true);
        }
    }

    /// `in_tick`: called between drain and simulate, with no tick pending
    fn apply_patch(&mut self, patch: ConfigPatch, in_tick: bool) -> ConfigUpdateReport {
        let previous_seed = self.config.system.seed;
        let outcome = self.config.apply_patch(patch);
        if !outcome.any_changed() && outcome.warnings.is_empty() {
            trace!("[CONFIG] Update left the configuration unchanged");
        }
        let PatchOutcome {
            topology_changed,
            style_changed,
            dynamics_changed,
            warnings,
        } = outcome;

        if dynamics_changed {
            self.simulator
                .set_parameters(activation_parameters(&self.config.dynamics));
        }
        if style_changed {
            self.mapper = VisualMapper::from_config(&self.config);
        }
        if self.config.system.seed != previous_seed {
            self.reseed();
        }

        let mut topology_rebuilt = false;
        if topology_changed && self.topology.is_some() {
            if in_tick {
                self.rebuild_topology();
            } else {
                self.reconfigure_topology();
            }
            topology_rebuilt = true;
        }

        debug!(
            "[CONFIG] Update applied (rebuild: {}, style: {}, dynamics: {}, warnings: {})",
            topology_rebuilt,
            style_changed,
            dynamics_changed,
            warnings.len()
        );
        ConfigUpdateReport {
            topology_rebuilt,
            style_changed,
            dynamics_changed,
            warnings,
        }
    }

    fn reseed(&mut self) {
        let seed = self.config.system.seed;
        self.rng = Box::new(rng_from_seed(seed));
        self.render_rng = Box::new(rng_from_seed(seed.map(|s| s ^ RENDER_STREAM)));
    }

    /// Running: stop, rebuild, start. Stopped: rebuild only if a topology exists.
    fn reconfigure_topology(&mut self) {
        if self.is_running() {
            self.stop();
            self.rebuild_topology();
            // start() logs its own failure
            let _ = self.start();
        } else if self.topology.is_some() {
            self.rebuild_topology();
        }
    }

    /// Replace the topology wholesale; activation starts from zero
    fn rebuild_topology(&mut self) {
        self.generation += 1;
        let (width, height) = self
            .surface
            .as_ref()
            .map_or((0.0, 0.0), |s| (s.width(), s.height()));
        let params = DevelopmentParams::from_config(&self.config, width, height);

        let topology = match develop_topology(&params, self.generation, &mut *self.rng) {
            Ok(topology) => topology,
            Err(e) => {
                error!("[TOPOLOGY] Build failed, continuing with an empty network: {}", e);
                Topology::new(self.generation)
            }
        };
        debug!(
            "[TOPOLOGY] Rebuilt generation {} for {}x{}: {} nodes, {} connections",
            self.generation,
            width,
            height,
            topology.node_count(),
            topology.connection_count()
        );
        self.topology = Some(topology);
    }
}
