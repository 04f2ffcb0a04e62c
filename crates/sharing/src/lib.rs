//! `dashkit-sharing` — dashboard-sharing domain: which roles may view shared
//! data, and which consumers actively did.
//!
//! This crate is intentionally decoupled from transport and host storage.
//! Write candidates arrive as untyped JSON from a host-controlled
//! settings-update pathway and are repaired, never rejected piecemeal.

pub mod access;
pub mod active_consumers;
pub mod activity;
pub mod module_sharing;
pub mod role;

pub use access::{AccessError, check_shared_access};
pub use active_consumers::{ActiveConsumers, RoleAssignmentSet, sanitize_role_assignments};
pub use activity::{ActivityRecorder, SharedDashboardAccess};
pub use module_sharing::{
    DashboardSharing, DashboardSharingSettings, ModuleSharing, SharingManagement,
    sanitize_sharing_settings,
};
pub use role::Role;
