// SPDX-FileCopyrightText: 2026 Renova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter traits at the engine's external seams.
//!
//! The engine computes and validates; clocks and the authoritative
//! uniqueness store are collaborators injected behind these traits.

pub mod clock;
pub mod uniqueness;

pub use clock::{Clock, SystemClock};
pub use uniqueness::UniquenessProbe;
