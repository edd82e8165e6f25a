//! Runtime configuration.
//!
//! Defaults match what the server renders. Overrides arrive as `key=value`
//! pairs: from `data-hx-assist-*` attributes in the browser, or from CLI
//! flags.
//!
//! | Key               | Field                 |
//! |-------------------|-----------------------|
//! | `csrf-cookie`     | `csrf.cookie_name`    |
//! | `csrf-header`     | `csrf.header_name`    |
//! | `csrf-missing`    | `csrf.missing`        |
//! | `widget-selector` | `widget_selector`     |
//! | `log-level`       | `log_level`           |

use log::LevelFilter;

use crate::csrf::{CsrfConfig, MissingTokenPolicy};
use crate::error::{Error, Result};

/// Inputs that opt into copy-on-click.
pub const DEFAULT_WIDGET_SELECTOR: &str = r#"input[is="invite-link"], input[data-copy-on-click]"#;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub csrf: CsrfConfig,
    pub widget_selector: String,
    pub log_level: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            csrf: CsrfConfig::default(),
            widget_selector: DEFAULT_WIDGET_SELECTOR.to_string(),
            log_level: LevelFilter::Info,
        }
    }
}

impl Config {
    /// Defaults with `pairs` applied in order.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut config = Self::default();
        for (key, value) in pairs {
            config.set(key, value)?;
        }
        Ok(config)
    }

    /// Apply each pair on its own, keeping the valid ones.
    ///
    /// Returns the errors of the pairs that were skipped.
    pub fn apply_pairs<'a, I>(&mut self, pairs: I) -> Vec<Error>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        pairs
            .into_iter()
            .filter_map(|(key, value)| self.set(key, value).err())
            .collect()
    }

    /// Apply one override.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key.trim() {
            "csrf-cookie" => self.csrf.cookie_name = non_empty(key, value)?,
            "csrf-header" => self.csrf.header_name = non_empty(key, value)?,
            "csrf-missing" => {
                self.csrf.missing = MissingTokenPolicy::parse(value).ok_or_else(|| {
                    Error::Config(format!("{key}: expected 'empty' or 'omit', got '{value}'"))
                })?
            }
            "widget-selector" => self.widget_selector = non_empty(key, value)?,
            "log-level" => {
                self.log_level = value
                    .parse()
                    .map_err(|_| Error::Config(format!("{key}: unknown level '{value}'")))?
            }
            other => return Err(Error::Config(format!("unknown key '{other}'"))),
        }
        Ok(())
    }
}

fn non_empty(key: &str, value: &str) -> Result<String> {
    if value.is_empty() {
        Err(Error::Config(format!("{key} must not be empty")))
    } else {
        Ok(value.to_string())
    }
}
