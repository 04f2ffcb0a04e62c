//! Active consumers of a shared dashboard, keyed by consumer identifier.
//!
//! The persisted shape is `{ [consumerId: integer]: string[] }`. Writes are
//! repaired rather than rejected: corrupt fragments are dropped so that
//! partial corruption in one entry never invalidates the rest. A candidate
//! that is not mapping/list-shaped at all is rejected wholesale, leaving the
//! stored value untouched.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use dashkit_core::ConsumerId;
use dashkit_settings::UserSetting;

use crate::role::Role;

// ─────────────────────────────────────────────────────────────────────────────
// RoleAssignmentSet
// ─────────────────────────────────────────────────────────────────────────────

/// Mapping from consumer identifier to the roles used for shared access.
///
/// # Invariants
/// - Every key is an integer-valued identifier.
/// - Every value is a list of role-name strings (an empty list is valid).
///
/// Both invariants are guaranteed by [`sanitize_role_assignments`] on every
/// write path; the typed representation cannot express a violation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleAssignmentSet {
    assignments: BTreeMap<ConsumerId, Vec<Role>>,
}

impl RoleAssignmentSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// Roles recorded for a consumer, if any.
    pub fn roles(&self, consumer_id: ConsumerId) -> Option<&[Role]> {
        self.assignments.get(&consumer_id).map(Vec::as_slice)
    }

    /// Insert or replace the roles recorded for a consumer.
    pub fn assign(&mut self, consumer_id: ConsumerId, roles: Vec<Role>) {
        self.assignments.insert(consumer_id, roles);
    }

    pub fn remove(&mut self, consumer_id: ConsumerId) -> Option<Vec<Role>> {
        self.assignments.remove(&consumer_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ConsumerId, &[Role])> {
        self.assignments
            .iter()
            .map(|(id, roles)| (*id, roles.as_slice()))
    }
}

impl FromIterator<(ConsumerId, Vec<Role>)> for RoleAssignmentSet {
    fn from_iter<I: IntoIterator<Item = (ConsumerId, Vec<Role>)>>(iter: I) -> Self {
        Self {
            assignments: iter.into_iter().collect(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Sanitizer
// ─────────────────────────────────────────────────────────────────────────────

/// Validate/repair an untyped write candidate.
///
/// - A candidate that is not mapping/list-shaped is rejected wholesale
///   (`None`).
/// - Entries whose key is not integer-valued are dropped.
/// - Entries whose value is not a list are dropped.
/// - Non-string role elements are filtered out, preserving the relative order
///   of the remaining elements; the entry is kept even when its list becomes
///   empty.
///
/// Pure: no IO and no dependency on the stored value.
pub fn sanitize_role_assignments(candidate: &Value) -> Option<RoleAssignmentSet> {
    let mut set = RoleAssignmentSet::new();

    match candidate {
        Value::Object(entries) => {
            for (key, roles) in entries {
                let Some(id) = parse_consumer_id(key) else {
                    continue;
                };
                if let Some(roles) = sanitize_roles(roles) {
                    set.assign(id, roles);
                }
            }
        }
        // List input enumerates as consecutive integer keys, matching how the
        // persisted mapping treats a bare list of role lists.
        Value::Array(items) => {
            for (index, roles) in items.iter().enumerate() {
                if let Some(roles) = sanitize_roles(roles) {
                    set.assign(ConsumerId::new(index as i64), roles);
                }
            }
        }
        _ => return None,
    }

    Some(set)
}

/// Integer-valued keys only, in canonical form ("7", never "07" or "+7").
/// Non-canonical forms would collide with the canonical key after parsing.
fn parse_consumer_id(key: &str) -> Option<ConsumerId> {
    let id: i64 = key.parse().ok()?;
    (id.to_string() == key).then(|| ConsumerId::new(id))
}

/// Keep only string elements; a non-list value drops the whole entry.
fn sanitize_roles(value: &Value) -> Option<Vec<Role>> {
    let items = value.as_array()?;
    Some(
        items
            .iter()
            .filter_map(Value::as_str)
            .map(|role| Role::new(role.to_owned()))
            .collect(),
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// Setting
// ─────────────────────────────────────────────────────────────────────────────

/// User setting recording which consumers actively used shared access.
///
/// Stored per dashboard owner; cleared when the owner's access credentials
/// are refreshed.
#[derive(Debug, Clone, Copy)]
pub struct ActiveConsumers;

impl UserSetting for ActiveConsumers {
    const OPTION: &'static str = "dashkit_active_consumers";
    type Value = RoleAssignmentSet;

    fn default() -> Self::Value {
        RoleAssignmentSet::new()
    }

    fn sanitize(candidate: &Value) -> Option<Self::Value> {
        sanitize_role_assignments(candidate)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
