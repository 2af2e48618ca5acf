//! Configuration to acknowledge developer preferences as well as set defaults.
//!
//! Specifically, we try to find an adorn.toml, and if present we load settings from there.
//! This provides the fallback heading convention and file extension preferences.

use crate::formats::rst::RstFormat;
use crate::heading::Adornment;
use facet::Facet;
use std::fs;
use tracing::{debug, warn};

#[derive(Facet, Clone, Debug)]
/// User preferences loaded from adorn.toml or falling back to defaults.
pub struct Config {
    #[facet(default = Config::convention())]
    /// Adornment encodings for levels the document has not used yet, level 0 first.
    pub levels: Vec<String>,
    #[facet(default = vec!["rst".to_string(), "txt".to_string()])]
    /// File suffixes to match when scanning directories.
    pub file_extensions: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            levels: Self::convention(),
            file_extensions: vec!["rst".to_string(), "txt".to_string()],
        }
    }
}

impl Config {
    #[must_use]
    /// Load configuration from adorn.toml if present.
    pub fn load() -> Self {
        fs::read_to_string("adorn.toml")
            .map_or_else(|_| Self::default(), |contents| Self::parse(&contents))
    }

    #[must_use]
    /// Read configuration from TOML text, falling back to defaults when it is invalid.
    pub fn parse(contents: &str) -> Self {
        match facet_toml::from_str::<Self>(contents) {
            Ok(config) => config,
            Err(e) => {
                warn!("ignoring invalid adorn.toml: {e}");
                Self::default()
            }
        }
    }

    fn convention() -> Vec<String> {
        Adornment::CONVENTION.iter().map(ToString::to_string).collect()
    }

    #[must_use]
    /// The configured fallback levels; entries that are not valid encodings are skipped.
    pub fn levels(&self) -> Vec<Adornment> {
        self.levels
            .iter()
            .filter_map(|encoding| match encoding.parse::<Adornment>() {
                Ok(adornment) => Some(adornment),
                Err(e) => {
                    warn!("{e}");
                    None
                }
            })
            .collect()
    }

    #[must_use]
    /// The reStructuredText format using the configured levels.
    pub fn format(&self) -> RstFormat {
        let levels = self.levels();
        debug!(levels = levels.len(), "configured fallback levels");
        RstFormat::with_levels(levels)
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
