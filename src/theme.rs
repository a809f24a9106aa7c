//! Light/dark theme preference.
//!
//! The preference lives under its own key in the key-value store and is
//! never touched by the note store.

use std::{fmt, str::FromStr};

use log::debug;

use crate::{KeyValueStore, Result};

/// Key under which the theme preference is persisted.
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Reads the stored preference. Anything missing or unrecognized falls
    /// back to light.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match store.get(THEME_KEY) {
            Ok(Some(value)) => value.parse().unwrap_or_default(),
            _ => Theme::default(),
        }
    }

    /// Persists this preference, overwriting the prior one.
    pub fn store(self, store: &mut dyn KeyValueStore) -> Result<()> {
        debug!("Storing theme preference: {}", self);
        store.set(THEME_KEY, &self.to_string())
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => f.write_str("light"),
            Theme::Dark => f.write_str("dark"),
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme '{other}', expected light or dark")),
        }
    }
}
