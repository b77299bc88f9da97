// SPDX-FileCopyrightText: 2026 Renova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Remote uniqueness query for candidate sequence numbers.

use async_trait::async_trait;

use crate::error::RenovaError;
use crate::types::{ParentId, UniquenessSignal};

/// Asks the authoritative store whether a candidate sequence is already
/// used under a parent entity.
///
/// Implementations return whatever shape the backend produced as a
/// [`UniquenessSignal`]; interpretation happens once, in the sequence
/// allocator. A transport or server failure must surface as
/// [`RenovaError::ProbeFailed`], never as a valid signal.
#[async_trait]
pub trait UniquenessProbe: Send + Sync {
    async fn check_sequence(
        &self,
        parent: &ParentId,
        candidate: u32,
    ) -> Result<UniquenessSignal, RenovaError>;
}
