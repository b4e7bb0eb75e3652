//! Persisted display theme

use crate::error::Result;
use crate::storage::KeyValueStore;

/// Storage key for the theme flag ("1" dark, "0" light)
pub const THEME_KEY: &str = "microbiobase-dark";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Only an explicit "0" means light; first run is dark
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match store.get(THEME_KEY) {
            Ok(Some(flag)) if flag == "0" => Theme::Light,
            Ok(_) => Theme::Dark,
            Err(e) => {
                tracing::warn!(error = %e, "theme flag unreadable, using dark");
                Theme::Dark
            }
        }
    }

    pub fn save(self, store: &mut dyn KeyValueStore) -> Result<()> {
        store.set(THEME_KEY, self.flag())
    }

    pub fn flag(self) -> &'static str {
        match self {
            Theme::Dark => "1",
            Theme::Light => "0",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Theme::Dark => write!(f, "dark"),
            Theme::Light => write!(f, "light"),
        }
    }
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dark" | "1" => Ok(Theme::Dark),
            "light" | "0" => Ok(Theme::Light),
            _ => Err(format!("Unknown theme: {}. Use dark or light", s)),
        }
    }
}
