// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Host-side seams: frame scheduling and resize notification
//!
//! The host decides when frames happen. The engine asks for one tick at a
//! time through [`FrameScheduler`] and the host answers by calling
//! `FrameLoopRunner::on_frame` with the handle it issued. Resize notifications
//! work the same way through [`ResizeNotifier`] and `FrameLoopRunner::on_resize`.
//!
//! [`ManualFrameScheduler`] and [`ManualResizeNotifier`] are in-process
//! implementations whose clones share state, so a test or headless driver can
//! keep one clone while the engine owns another.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Identifies one requested tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TickHandle(pub u64);

/// Identifies one resize subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(pub u64);

/// New surface dimensions reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResizeEvent {
    pub width: f32,
    pub height: f32,
}

pub trait FrameScheduler {
    /// Ask for one future tick
    fn request_tick(&mut self) -> TickHandle;

    /// Withdraw a tick that has not been delivered yet
    fn cancel_tick(&mut self, handle: TickHandle);
}

pub trait ResizeNotifier {
    fn subscribe(&mut self) -> SubscriptionId;
    fn unsubscribe(&mut self, id: SubscriptionId);
}

#[derive(Debug, Default)]
struct SchedulerState {
    next_id: u64,
    pending: Option<TickHandle>,
    requested: u64,
    cancelled: u64,
}

/// Scheduler driven by explicit calls; keeps at most one pending tick
#[derive(Debug, Clone, Default)]
pub struct ManualFrameScheduler {
    state: Arc<Mutex<SchedulerState>>,
}

impl ManualFrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// The tick waiting to be delivered, if any
    pub fn pending(&self) -> Option<TickHandle> {
        self.state.lock().pending
    }

    /// Take the pending tick for delivery
    pub fn take_pending(&self) -> Option<TickHandle> {
        self.state.lock().pending.take()
    }

    pub fn requested_count(&self) -> u64 {
        self.state.lock().requested
    }

    pub fn cancelled_count(&self) -> u64 {
        self.state.lock().cancelled
    }
}

impl FrameScheduler for ManualFrameScheduler {
    fn request_tick(&mut self) -> TickHandle {
        let mut state = self.state.lock();
        state.next_id += 1;
        state.requested += 1;
        let handle = TickHandle(state.next_id);
        state.pending = Some(handle);
        handle
    }

    fn cancel_tick(&mut self, handle: TickHandle) {
        let mut state = self.state.lock();
        if state.pending == Some(handle) {
            state.pending = None;
            state.cancelled += 1;
        }
    }
}

#[derive(Debug, Default)]
struct NotifierState {
    next_id: u64,
    active: Vec<SubscriptionId>,
}

/// Resize notifier that only tracks subscriptions
#[derive(Debug, Clone, Default)]
pub struct ManualResizeNotifier {
    state: Arc<Mutex<NotifierState>>,
}

impl ManualResizeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_subscriptions(&self) -> usize {
        self.state.lock().active.len()
    }

    pub fn is_subscribed(&self, id: SubscriptionId) -> bool {
        self.state.lock().active.contains(&id)
    }
}

impl ResizeNotifier for ManualResizeNotifier {
    fn subscribe(&mut self) -> SubscriptionId {
        let mut state = self.state.lock();
        state.next_id += 1;
        let id = SubscriptionId(state.next_id);
        state.active.push(id);
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) {
        self.state.lock().active.retain(|&active| active != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_pending_tick() {
        let driver = ManualFrameScheduler::new();
        let mut scheduler = driver.clone();
        let first = scheduler.request_tick();
        let second = scheduler.request_tick();
        assert_ne!(first, second);
        assert_eq!(driver.pending(), Some(second));

        scheduler.cancel_tick(first);
        assert_eq!(driver.pending(), Some(second));
        assert_eq!(driver.cancelled_count(), 0);

        scheduler.cancel_tick(second);
        assert_eq!(driver.pending(), None);
        assert_eq!(driver.cancelled_count(), 1);
    }

    #[test]
    fn test_take_pending_consumes() {
        let driver = ManualFrameScheduler::new();
        let mut scheduler = driver.clone();
        let handle = scheduler.request_tick();
        assert_eq!(driver.take_pending(), Some(handle));
        assert_eq!(driver.take_pending(), None);
    }

    #[test]
    fn test_subscriptions_tracked() {
        let observer = ManualResizeNotifier::new();
        let mut notifier = observer.clone();
        let id = notifier.subscribe();
        assert!(observer.is_subscribed(id));
        notifier.unsubscribe(id);
        assert_eq!(observer.active_subscriptions(), 0);
    }
}
