//! Diagnostic placeholder card

use std::sync::Arc;

use serde_json::Value;

use crate::error::CoreResult;
use crate::traits::CardElement;
use crate::types::StateSnapshot;

/// Placeholder shown in place of a card that could not be built, or of the whole
/// stack when a render pass fails.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorCard {
    pub message: String,
    /// Configuration of the card that failed, if the failure was per card
    pub origin: Option<Value>,
}

impl ErrorCard {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            origin: None,
        }
    }

    #[must_use]
    pub fn for_card(message: impl Into<String>, origin: Value) -> Self {
        Self {
            message: message.into(),
            origin: Some(origin),
        }
    }
}

impl CardElement for ErrorCard {
    fn set_state(&self, _states: &Arc<StateSnapshot>) -> CoreResult<()> {
        Ok(())
    }

    fn label(&self) -> String {
        format!("Error: {}", self.message)
    }
}
