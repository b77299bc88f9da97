// SPDX-FileCopyrightText: 2026 Renova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared across the Renova engine crates.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Identifier of the parent business entity that owns renewal lines
/// (a contract, a registered domain, a workspace subscription).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParentId(pub String);

impl ParentId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ParentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Business modules a reminder can be attached to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum BusinessModule {
    Amc,
    DomainRenewal,
    Workspace,
    Donor,
    Expense,
    Proposal,
}

/// Link from a reminder to the business object it was raised for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessRef {
    pub module: BusinessModule,
    pub reference_id: String,
}

/// Raw uniqueness responses as backends actually shape them.
///
/// The authoritative store answers "is this sequence taken?" in several
/// historical formats. Callers must not branch on these variants directly;
/// the sequence allocator normalizes them at its boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniquenessSignal {
    /// Bare boolean body: `true` means the candidate is free to use.
    Plain(bool),
    /// `{ "unique": <bool> }` response shape.
    Unique(bool),
    /// `{ "exists": <bool> }` response shape.
    Exists(bool),
    /// Nothing recorded under the parent at all (HTTP 404 or empty row set).
    NotFound,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn business_module_display_and_parse_roundtrip() {
        let variants = [
            BusinessModule::Amc,
            BusinessModule::DomainRenewal,
            BusinessModule::Workspace,
            BusinessModule::Donor,
            BusinessModule::Expense,
            BusinessModule::Proposal,
        ];
        for variant in &variants {
            let s = variant.to_string();
            let parsed = BusinessModule::from_str(&s).expect("should parse back");
            assert_eq!(*variant, parsed);
        }
        assert_eq!(BusinessModule::DomainRenewal.to_string(), "domain-renewal");
    }

    #[test]
    fn business_ref_serializes_with_kebab_module() {
        let link = BusinessRef {
            module: BusinessModule::DomainRenewal,
            reference_id: "dom-42".to_string(),
        };
        let json = serde_json::to_string(&link).expect("should serialize");
        assert!(json.contains("domain-renewal"));
        let parsed: BusinessRef = serde_json::from_str(&json).expect("should deserialize");
        assert_eq!(link, parsed);
    }

    #[test]
    fn parent_id_displays_inner_value() {
        let id = ParentId("amc-7".to_string());
        assert_eq!(id.to_string(), "amc-7");
        assert_eq!(id.as_str(), "amc-7");
    }
}
