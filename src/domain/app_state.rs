use serde::{Deserialize, Serialize};

/// Process-wide flags persisted next to the catalog and handed to services
/// through the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct AppState {
    #[serde(default)]
    pub data_was_migrated: bool,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub premium_unlocked: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    System,
    Light,
    Dark,
}
