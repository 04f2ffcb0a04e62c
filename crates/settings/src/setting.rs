use core::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use dashkit_core::UserId;

use crate::options::UserOptions;

/// Type-level definition of a persisted user setting.
///
/// A setting names its option key, its typed value shape, the default
/// returned when nothing is stored, and the sanitizer applied to every write
/// candidate. The sanitizer runs on every write; there is no separate
/// registration step.
pub trait UserSetting {
    /// Option name the value is stored under.
    const OPTION: &'static str;

    /// Typed shape of a valid persisted value.
    type Value: Serialize + DeserializeOwned;

    /// Value returned when nothing has been stored yet.
    fn default() -> Self::Value;

    /// Validate/repair a write candidate.
    ///
    /// `None` rejects the candidate wholesale and the previously stored value
    /// is kept. `Some` is what gets persisted. Sanitizers never error: they
    /// filter, they do not report.
    fn sanitize(candidate: &Value) -> Option<Self::Value>;
}

/// Repository for one user's instance of a setting.
///
/// Constructed explicitly with the owning user's identifier; settings are
/// never resolved through ambient state.
#[derive(Debug)]
pub struct SettingStore<S, O> {
    options: O,
    user_id: UserId,
    _setting: PhantomData<S>,
}

impl<S, O> SettingStore<S, O>
where
    S: UserSetting,
    O: UserOptions,
{
    pub fn new(options: O, user_id: UserId) -> Self {
        Self {
            options,
            user_id,
            _setting: PhantomData,
        }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Current persisted value, or the default if nothing is stored.
    ///
    /// A raw value that no longer deserializes to the expected shape (e.g.
    /// written by an older host version) also yields the default.
    pub fn get(&self) -> S::Value {
        self.options
            .get(self.user_id, S::OPTION)
            .and_then(|raw| serde_json::from_value(raw).ok())
            .unwrap_or_else(S::default)
    }

    /// Sanitize and persist a write candidate.
    ///
    /// A candidate the sanitizer rejects wholesale leaves the stored value
    /// untouched. Never fails: malformed fragments are dropped, not reported.
    pub fn set(&self, candidate: Value) {
        let Some(clean) = S::sanitize(&candidate) else {
            debug!(
                option = S::OPTION,
                user_id = %self.user_id,
                "rejected malformed candidate; keeping stored value"
            );
            return;
        };

        match serde_json::to_value(&clean) {
            Ok(raw) => self.options.set(self.user_id, S::OPTION, raw),
            Err(error) => {
                warn!(option = S::OPTION, %error, "failed to serialize sanitized value");
            }
        }
    }

    /// Remove the stored value; `get` returns the default afterwards.
    pub fn delete(&self) {
        self.options.delete(self.user_id, S::OPTION);
    }
}
