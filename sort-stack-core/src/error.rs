//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Stack configuration rejected at setup time
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A render pass was requested before any configuration was loaded
    #[error("Stack is not configured")]
    NotConfigured,

    /// Card helpers could not be loaded
    #[error("Card helpers unavailable: {0}")]
    HelpersUnavailable(String),

    /// The element factory refused to build a card
    #[error("Card creation failed for {card_type}: {message}")]
    CardCreation { card_type: String, message: String },

    /// A card element rejected a state update
    #[error("Card update failed: {0}")]
    CardUpdate(String),

    /// serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl CoreError {
    /// Whether it is expected behavior (bad configuration, missing helpers), used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added. **
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::InvalidConfig(_)
            | Self::NotConfigured
            | Self::HelpersUnavailable(_)
            | Self::CardCreation { .. } => true,
            Self::CardUpdate(_) | Self::SerializationError(_) => false,
        }
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
