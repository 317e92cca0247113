//! Role-based access scoping
//!
//! Every read request resolves to exactly one [`AccessScope`] before any
//! query runs. The scope is computed per request and never cached across
//! callers.

use serde::{Deserialize, Serialize};

/// Organizational role of the caller
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Role {
    /// General manager, organization-wide visibility
    Gm,
    /// Central office admin, organization-wide visibility
    AdminPusat,
    Manager,
    AsistenManager,
    Staff,
}

impl Role {
    /// Parse the wire form of a role; unknown strings fall back to the
    /// most restricted role
    pub fn parse(s: &str) -> Self {
        match s {
            "GM" => Role::Gm,
            "ADMIN_PUSAT" => Role::AdminPusat,
            "MANAGER" => Role::Manager,
            "ASISTEN_MANAGER" => Role::AsistenManager,
            _ => Role::Staff, // default
        }
    }

    pub fn is_unrestricted(&self) -> bool {
        matches!(self, Role::Gm | Role::AdminPusat)
    }
}

/// Restaurant filter applied to every aggregation of one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessScope {
    /// No restriction, organization-wide
    All,
    /// Restricted to a single restaurant id
    Restaurant(String),
    /// Matches no records; a restricted caller with no assigned restaurant
    Empty,
}

/// Resolve the effective scope from the caller's role and assignment.
///
/// Unrestricted roles may narrow to a requested restaurant; restricted
/// roles are pinned to their assigned restaurant and any requested
/// override is ignored.
pub fn resolve(
    role: Role,
    assigned_restaurant: Option<&str>,
    requested_restaurant: Option<&str>,
) -> AccessScope {
    if role.is_unrestricted() {
        match requested_restaurant {
            Some(id) => AccessScope::Restaurant(id.to_string()),
            None => AccessScope::All,
        }
    } else {
        match assigned_restaurant {
            Some(id) => AccessScope::Restaurant(id.to_string()),
            None => AccessScope::Empty,
        }
    }
}
