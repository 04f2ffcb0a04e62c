//! Activity metrics for shared-dashboard usage.
//!
//! Each authenticated shared-dashboard request by a consumer is folded into
//! the owner's [`ActiveConsumers`] setting, so the owner can later see who
//! actually used the access they granted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use dashkit_core::ConsumerId;
use dashkit_settings::{SettingStore, UserOptions};

use crate::active_consumers::{ActiveConsumers, RoleAssignmentSet};
use crate::role::Role;

/// One authenticated shared-dashboard request by a consumer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedDashboardAccess {
    pub consumer_id: ConsumerId,
    /// Roles the request was authorized under.
    pub roles: Vec<Role>,
    pub occurred_at: DateTime<Utc>,
}

/// Records shared-dashboard activity into the owner's active-consumer set.
#[derive(Debug)]
pub struct ActivityRecorder<O> {
    store: SettingStore<ActiveConsumers, O>,
}

impl<O: UserOptions> ActivityRecorder<O> {
    pub fn new(store: SettingStore<ActiveConsumers, O>) -> Self {
        Self { store }
    }

    /// Insert or refresh the consumer's entry.
    ///
    /// Read-merge-write; the write goes through the sanitizing path like any
    /// other, so the persisted value stays structurally valid.
    pub fn record(&self, access: &SharedDashboardAccess) {
        let mut assignments = self.store.get();
        assignments.assign(access.consumer_id, access.roles.clone());

        debug!(
            consumer_id = %access.consumer_id,
            occurred_at = %access.occurred_at,
            "recording shared dashboard access"
        );

        match serde_json::to_value(&assignments) {
            Ok(candidate) => self.store.set(candidate),
            Err(error) => debug!(%error, "failed to encode active consumers"),
        }
    }

    /// Clear all recorded activity (the owner's credentials were refreshed).
    pub fn reset(&self) {
        self.store.delete();
    }

    /// Current snapshot of recorded consumers.
    pub fn active_consumers(&self) -> RoleAssignmentSet {
        self.store.get()
    }
}
