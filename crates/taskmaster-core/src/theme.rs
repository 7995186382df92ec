//! Selected theme name, persisted alongside the board.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Result;
use crate::storage::{read_json, write_json, KeyValueStore};

/// Storage key holding the theme name.
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Stored theme, or light when nothing valid is stored.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        read_json(store, THEME_KEY).unwrap_or_default()
    }

    pub fn save<S: KeyValueStore + ?Sized>(self, store: &mut S) -> Result<()> {
        write_json(store, THEME_KEY, &self)
    }

    /// Flip the stored theme and return the new one.
    pub fn toggle<S: KeyValueStore + ?Sized>(store: &mut S) -> Result<Self> {
        let next = Self::load(&*store).toggled();
        next.save(store)?;
        Ok(next)
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

/// Error returned when parsing an unknown theme name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown theme '{0}' (expected light or dark)")]
pub struct ParseThemeError(pub String);

impl FromStr for Theme {
    type Err = ParseThemeError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(ParseThemeError(other.to_string())),
        }
    }
}
