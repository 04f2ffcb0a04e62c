use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use serde_json::Value;

use dashkit_core::UserId;

/// User-scoped raw option storage.
///
/// Values are untyped JSON documents keyed by (user, option name). The host
/// storage is assumed to serialize writes to a given user's record; no
/// coordination beyond that is defined at this layer.
pub trait UserOptions: Send + Sync {
    fn get(&self, user_id: UserId, option: &str) -> Option<Value>;
    fn set(&self, user_id: UserId, option: &str, value: Value);
    fn delete(&self, user_id: UserId, option: &str);
}

impl<S> UserOptions for Arc<S>
where
    S: UserOptions + ?Sized,
{
    fn get(&self, user_id: UserId, option: &str) -> Option<Value> {
        (**self).get(user_id, option)
    }

    fn set(&self, user_id: UserId, option: &str, value: Value) {
        (**self).set(user_id, option, value)
    }

    fn delete(&self, user_id: UserId, option: &str) {
        (**self).delete(user_id, option)
    }
}

/// In-memory option store for tests/dev.
#[derive(Debug)]
pub struct InMemoryUserOptions {
    inner: RwLock<HashMap<(UserId, String), Value>>,
}

impl InMemoryUserOptions {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }

    pub fn arc() -> Arc<Self> {
        Arc::new(Self::new())
    }
}

impl Default for InMemoryUserOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl UserOptions for InMemoryUserOptions {
    fn get(&self, user_id: UserId, option: &str) -> Option<Value> {
        let map = self.inner.read().ok()?;
        map.get(&(user_id, option.to_owned())).cloned()
    }

    fn set(&self, user_id: UserId, option: &str, value: Value) {
        if let Ok(mut map) = self.inner.write() {
            map.insert((user_id, option.to_owned()), value);
        }
    }

    fn delete(&self, user_id: UserId, option: &str) {
        if let Ok(mut map) = self.inner.write() {
            map.remove(&(user_id, option.to_owned()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_option_is_none() {
        let options = InMemoryUserOptions::new();
        assert_eq!(options.get(UserId::new(1), "missing"), None);
    }

    #[test]
    fn set_then_get_round_trips() {
        let options = InMemoryUserOptions::new();
        let user = UserId::new(1);

        options.set(user, "greeting", json!({ "hello": "world" }));
        assert_eq!(options.get(user, "greeting"), Some(json!({ "hello": "world" })));
    }

    #[test]
    fn options_are_isolated_per_user() {
        let options = InMemoryUserOptions::new();
        options.set(UserId::new(1), "greeting", json!("a"));
        options.set(UserId::new(2), "greeting", json!("b"));

        assert_eq!(options.get(UserId::new(1), "greeting"), Some(json!("a")));
        assert_eq!(options.get(UserId::new(2), "greeting"), Some(json!("b")));
    }

    #[test]
    fn delete_removes_only_the_named_option() {
        let options = InMemoryUserOptions::new();
        let user = UserId::new(7);
        options.set(user, "first", json!(1));
        options.set(user, "second", json!(2));

        options.delete(user, "first");

        assert_eq!(options.get(user, "first"), None);
        assert_eq!(options.get(user, "second"), Some(json!(2)));
    }
}
