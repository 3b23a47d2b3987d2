//! Presentation theme descriptors.
//!
//! Exactly one theme ships today; the descriptor keeps the data model and
//! the session machine theme-agnostic. Stored records carry a style name
//! and the viewer resolves it to a descriptor once at render time.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Theme selecting the card's presentation (artwork, music).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardStyle {
    #[default]
    Birthday,
}

impl CardStyle {
    /// Parse from the stored `style` column.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            "birthday" => Ok(Self::Birthday),
            other => Err(CoreError::Validation(format!(
                "Unknown card style '{other}'"
            ))),
        }
    }

    /// Resolve a stored style name, falling back to the default when the
    /// value is unknown. Old records must keep rendering for recipients
    /// even if a style was retired.
    pub fn resolve_or_default(name: &str) -> Self {
        Self::from_name(name).unwrap_or_else(|_| {
            tracing::warn!(style = name, "Unknown card style, using default");
            Self::default()
        })
    }

    /// Stored name value.
    pub fn name(self) -> &'static str {
        match self {
            Self::Birthday => "birthday",
        }
    }

    /// Human-readable label for style pickers.
    pub fn label(self) -> &'static str {
        match self {
            Self::Birthday => "Birthday Style (Default)",
        }
    }

    /// Looping theme track started when the letter opens.
    pub fn music_url(self) -> &'static str {
        match self {
            Self::Birthday => "/birthday-music.mov",
        }
    }
}
