// SPDX-FileCopyrightText: 2026 Renova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Boundary normalization of backend uniqueness responses.
//!
//! Backends have answered "is this sequence taken?" in several shapes
//! over time. All of them collapse to one boolean here, so the allocator
//! never branches on response format.

use renova_core::UniquenessSignal;

/// Whether the signal means the candidate sequence is free to use.
///
/// A not-found response means nothing conflicts, so it counts as
/// available.
pub fn sequence_is_available(signal: UniquenessSignal) -> bool {
    match signal {
        UniquenessSignal::Plain(unique) | UniquenessSignal::Unique(unique) => unique,
        UniquenessSignal::Exists(exists) => !exists,
        UniquenessSignal::NotFound => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_boolean_passes_through() {
        assert!(sequence_is_available(UniquenessSignal::Plain(true)));
        assert!(!sequence_is_available(UniquenessSignal::Plain(false)));
    }

    #[test]
    fn unique_field_passes_through() {
        assert!(sequence_is_available(UniquenessSignal::Unique(true)));
        assert!(!sequence_is_available(UniquenessSignal::Unique(false)));
    }

    #[test]
    fn exists_field_is_inverted() {
        assert!(sequence_is_available(UniquenessSignal::Exists(false)));
        assert!(!sequence_is_available(UniquenessSignal::Exists(true)));
    }

    #[test]
    fn not_found_counts_as_available() {
        assert!(sequence_is_available(UniquenessSignal::NotFound));
    }
}
