//! `dashkit-settings` — user-scoped setting storage with write-time sanitization.
//!
//! This crate is intentionally decoupled from any concrete host storage;
//! backends implement [`UserOptions`].

pub mod options;
pub mod setting;

pub use options::{InMemoryUserOptions, UserOptions};
pub use setting::{SettingStore, UserSetting};
