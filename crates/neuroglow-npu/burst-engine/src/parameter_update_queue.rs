// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Configuration update queue.

Lets other threads hand configuration patches to a running engine without
touching it. Patches are drained at the start of the next tick and applied one
by one in push order, so the engine only ever sees configuration change between
frames and a rejected patch never discards the ones queued before it.
*/

use neuroglow_config::ConfigPatch;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

/// Thread-safe queue of configuration patches
///
/// ARCHITECTURE:
/// - Any thread: pushes patches (just a short mutex on the queue)
/// - Frame loop: drains everything at a tick boundary
///
/// Clones share the same queue.
#[derive(Debug, Clone)]
pub struct ParameterUpdateQueue {
    queue: Arc<Mutex<VecDeque<ConfigPatch>>>,
}

impl ParameterUpdateQueue {
    pub fn new() -> Self {
        Self {
            queue: Arc::new(Mutex::new(VecDeque::with_capacity(16))),
        }
    }

    /// Queue a patch for the next tick boundary
    pub fn push(&self, patch: ConfigPatch) {
        if patch.is_empty() {
            return;
        }
        self.queue.lock().push_back(patch);
    }

    /// Remove and return every pending patch, oldest first
    pub fn drain_all(&self) -> Vec<ConfigPatch> {
        self.queue.lock().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.queue.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.lock().is_empty()
    }
}

impl Default for ParameterUpdateQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_queue() {
        let queue = ParameterUpdateQueue::new();
        let handle = queue.clone();
        handle.push(ConfigPatch {
            decay_rate: Some(0.02),
            ..Default::default()
        });
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.drain_all().len(), 1);
        assert!(handle.is_empty());
    }

    #[test]
    fn test_empty_patches_dropped() {
        let queue = ParameterUpdateQueue::new();
        queue.push(ConfigPatch::default());
        assert!(queue.is_empty());
        assert!(queue.drain_all().is_empty());
    }

    #[test]
    fn test_drain_keeps_push_order() {
        let queue = ParameterUpdateQueue::new();
        queue.push(ConfigPatch {
            decay_rate: Some(0.02),
            glow_blur: Some(4.0),
            ..Default::default()
        });
        queue.push(ConfigPatch {
            decay_rate: Some(0.03),
            ..Default::default()
        });

        let drained = queue.drain_all();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].decay_rate, Some(0.02));
        assert_eq!(drained[1].decay_rate, Some(0.03));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_push_from_other_thread() {
        let queue = ParameterUpdateQueue::new();
        let handle = queue.clone();
        std::thread::spawn(move || {
            handle.push(ConfigPatch {
                seed: Some(9),
                ..Default::default()
            });
        })
        .join()
        .unwrap();
        assert_eq!(queue.drain_all()[0].seed, Some(9));
    }
}
