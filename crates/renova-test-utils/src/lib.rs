// SPDX-FileCopyrightText: 2026 Renova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test doubles for the Renova engine: a manually-driven clock and a
//! scripted uniqueness probe.

pub mod clock;
pub mod mock_probe;

pub use clock::ManualClock;
pub use mock_probe::MockProbe;
