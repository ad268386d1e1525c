use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::types::{Theme, ThemeId};

/// Published after a theme has been committed and projected onto the style surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeChangedEvent {
    pub theme: Theme,
    pub applied_at: DateTime<Utc>,
}

impl ThemeChangedEvent {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            applied_at: Utc::now(),
        }
    }
}

/// Published by the store after each committed mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ThemeStoreEvent {
    Created(Theme),
    Updated(Theme),
    Deleted(ThemeId),
    DefaultChanged {
        previous: Option<ThemeId>,
        current: ThemeId,
    },
}
