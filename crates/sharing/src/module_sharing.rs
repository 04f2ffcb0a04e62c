//! Per-module dashboard sharing configuration.
//!
//! The dashboard owner's settings record which roles may view each module's
//! shared data and who may edit that configuration. The wire shape is
//! `{ [moduleSlug: string]: { "sharedRoles": string[], "management": ... } }`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use dashkit_settings::UserSetting;

use crate::role::Role;

/// Who may edit a module's sharing configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SharingManagement {
    /// Only the dashboard owner.
    #[default]
    Owner,
    /// Any administrator.
    AllAdmins,
}

/// Sharing configuration for a single dashboard module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleSharing {
    /// Roles granted view access to the module's shared data.
    pub shared_roles: Vec<Role>,
    /// Who may edit this configuration.
    pub management: SharingManagement,
}

/// Mapping from module slug to its sharing configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DashboardSharingSettings {
    modules: BTreeMap<String, ModuleSharing>,
}

impl DashboardSharingSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn module(&self, slug: &str) -> Option<&ModuleSharing> {
        self.modules.get(slug)
    }

    pub fn set_module(&mut self, slug: impl Into<String>, sharing: ModuleSharing) {
        self.modules.insert(slug.into(), sharing);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ModuleSharing)> {
        self.modules
            .iter()
            .map(|(slug, sharing)| (slug.as_str(), sharing))
    }
}

/// Validate/repair an untyped write candidate.
///
/// Same repair policy as the active-consumer sanitizer: a non-mapping
/// candidate is rejected wholesale; within a mapping, empty-slug or
/// non-mapping module entries are dropped, a missing or non-list
/// `sharedRoles` becomes an empty list with non-string elements filtered
/// out, and an unknown `management` value falls back to owner-managed.
pub fn sanitize_sharing_settings(candidate: &Value) -> Option<DashboardSharingSettings> {
    let entries = candidate.as_object()?;
    let mut settings = DashboardSharingSettings::new();

    for (slug, config) in entries {
        if slug.is_empty() {
            continue;
        }
        let Some(config) = config.as_object() else {
            continue;
        };

        let shared_roles = config
            .get("sharedRoles")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(|role| Role::new(role.to_owned()))
                    .collect()
            })
            .unwrap_or_default();

        let management = config
            .get("management")
            .and_then(|value| serde_json::from_value(value.clone()).ok())
            .unwrap_or_default();

        settings.set_module(
            slug.clone(),
            ModuleSharing {
                shared_roles,
                management,
            },
        );
    }

    Some(settings)
}

/// User setting holding the owner's dashboard sharing configuration.
#[derive(Debug, Clone, Copy)]
pub struct DashboardSharing;

impl UserSetting for DashboardSharing {
    const OPTION: &'static str = "dashkit_dashboard_sharing";
    type Value = DashboardSharingSettings;

    fn default() -> Self::Value {
        DashboardSharingSettings::new()
    }

    fn sanitize(candidate: &Value) -> Option<Self::Value> {
        sanitize_sharing_settings(candidate)
    }
}
