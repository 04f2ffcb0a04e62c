//! Shared-dashboard access policy.

use thiserror::Error;

use crate::module_sharing::DashboardSharingSettings;
use crate::role::Role;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccessError {
    #[error("module '{0}' is not shared")]
    ModuleNotShared(String),

    #[error("none of the consumer's roles are shared for module '{0}'")]
    RoleNotAllowed(String),
}

/// Check whether a consumer may view a module's shared dashboard data.
///
/// - No IO
/// - No panics
/// - No business logic (pure policy check)
pub fn check_shared_access(
    settings: &DashboardSharingSettings,
    module_slug: &str,
    consumer_roles: &[Role],
) -> Result<(), AccessError> {
    let Some(sharing) = settings.module(module_slug) else {
        return Err(AccessError::ModuleNotShared(module_slug.to_owned()));
    };

    let allowed = consumer_roles
        .iter()
        .any(|role| sharing.shared_roles.contains(role));

    if allowed {
        Ok(())
    } else {
        Err(AccessError::RoleNotAllowed(module_slug.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module_sharing::{ModuleSharing, SharingManagement};

    fn settings() -> DashboardSharingSettings {
        let mut settings = DashboardSharingSettings::new();
        settings.set_module(
            "traffic",
            ModuleSharing {
                shared_roles: vec![Role::new("editor"), Role::new("author")],
                management: SharingManagement::Owner,
            },
        );
        settings.set_module(
            "monetization",
            ModuleSharing {
                shared_roles: Vec::new(),
                management: SharingManagement::AllAdmins,
            },
        );
        settings
    }

    #[test]
    fn consumer_with_shared_role_is_allowed() {
        let roles = [Role::new("subscriber"), Role::new("editor")];
        assert_eq!(check_shared_access(&settings(), "traffic", &roles), Ok(()));
    }

    #[test]
    fn consumer_without_shared_role_is_denied() {
        let roles = [Role::new("subscriber")];
        assert_eq!(
            check_shared_access(&settings(), "traffic", &roles),
            Err(AccessError::RoleNotAllowed("traffic".to_owned()))
        );
    }

    #[test]
    fn unshared_module_is_denied() {
        let roles = [Role::new("editor")];
        assert_eq!(
            check_shared_access(&settings(), "search", &roles),
            Err(AccessError::ModuleNotShared("search".to_owned()))
        );
    }

    #[test]
    fn module_with_no_shared_roles_denies_everyone() {
        let roles = [Role::new("editor")];
        assert_eq!(
            check_shared_access(&settings(), "monetization", &roles),
            Err(AccessError::RoleNotAllowed("monetization".to_owned()))
        );
    }

    #[test]
    fn consumer_with_no_roles_is_denied() {
        assert!(check_shared_access(&settings(), "traffic", &[]).is_err());
    }
}
