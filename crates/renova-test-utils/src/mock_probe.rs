// SPDX-FileCopyrightText: 2026 Renova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scripted uniqueness probe for allocator tests.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use renova_core::{ParentId, RenovaError, UniquenessProbe, UniquenessSignal};

/// A [`UniquenessProbe`] that answers from a script and records every
/// call it receives.
///
/// Unscripted candidates answer [`UniquenessSignal::NotFound`]. A
/// per-candidate delay simulates a slow backend so tests can race an old
/// in-flight response against a newer submission.
#[derive(Default)]
pub struct MockProbe {
    signals: HashMap<u32, UniquenessSignal>,
    errors: HashSet<u32>,
    delays: HashMap<u32, Duration>,
    calls: Mutex<Vec<u32>>,
}

impl MockProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the signal returned for a candidate.
    pub fn with_signal(mut self, candidate: u32, signal: UniquenessSignal) -> Self {
        self.signals.insert(candidate, signal);
        self
    }

    /// Script a transient failure for a candidate.
    pub fn with_error(mut self, candidate: u32) -> Self {
        self.errors.insert(candidate);
        self
    }

    /// Delay the response for a candidate.
    pub fn with_delay(mut self, candidate: u32, delay: Duration) -> Self {
        self.delays.insert(candidate, delay);
        self
    }

    /// Candidates the probe was actually asked about, in call order.
    pub fn calls(&self) -> Vec<u32> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl UniquenessProbe for MockProbe {
    async fn check_sequence(
        &self,
        _parent: &ParentId,
        candidate: u32,
    ) -> Result<UniquenessSignal, RenovaError> {
        self.calls.lock().unwrap().push(candidate);

        if let Some(delay) = self.delays.get(&candidate) {
            tokio::time::sleep(*delay).await;
        }

        if self.errors.contains(&candidate) {
            return Err(RenovaError::ProbeFailed {
                message: "scripted probe failure".to_string(),
                source: None,
            });
        }

        Ok(self
            .signals
            .get(&candidate)
            .copied()
            .unwrap_or(UniquenessSignal::NotFound))
    }
}
