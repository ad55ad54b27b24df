//! Console settings, read from the environment.
//!
//! | Variable | Field | Default |
//! |---|---|---|
//! | `MEAL_OPS_PAGE_SIZE` | `page_size` | `10` |
//! | `MEAL_OPS_MAILBOX` | `mailbox_capacity` | `32` |
//! | `MEAL_OPS_SORT` | `default_sort` (`field:asc\|desc`) | `delivery_time:asc` |
//! | `MEAL_OPS_LOG` | `log_filter` | `info` |

use crate::query::{FilterCriteria, InvalidSortKey, SortKey};
use thiserror::Error;

pub const PAGE_SIZE_VAR: &str = "MEAL_OPS_PAGE_SIZE";
pub const MAILBOX_VAR: &str = "MEAL_OPS_MAILBOX";
pub const SORT_VAR: &str = "MEAL_OPS_SORT";
pub const LOG_VAR: &str = "MEAL_OPS_LOG";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be a positive integer, got {value:?}")]
    NotPositive { key: &'static str, value: String },

    #[error("MEAL_OPS_SORT: {0}")]
    Sort(#[from] InvalidSortKey),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    pub page_size: usize,
    pub mailbox_capacity: usize,
    pub default_sort: SortKey,
    /// Fallback directive when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            mailbox_capacity: 32,
            default_sort: SortKey::default(),
            log_filter: "info".to_string(),
        }
    }
}

impl ConsoleConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads each variable through `lookup`; unset variables keep their default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(value) = lookup(PAGE_SIZE_VAR) {
            config.page_size = positive(PAGE_SIZE_VAR, &value)?;
        }
        if let Some(value) = lookup(MAILBOX_VAR) {
            config.mailbox_capacity = positive(MAILBOX_VAR, &value)?;
        }
        if let Some(value) = lookup(SORT_VAR) {
            config.default_sort = value.parse()?;
        }
        if let Some(value) = lookup(LOG_VAR) {
            config.log_filter = value;
        }
        Ok(config)
    }

    /// Starting criteria for a new console session.
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria::new(self.page_size, self.default_sort)
    }
}

fn positive(key: &'static str, value: &str) -> Result<usize, ConfigError> {
    match value.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::NotPositive {
            key,
            value: value.to_string(),
        }),
    }
}
