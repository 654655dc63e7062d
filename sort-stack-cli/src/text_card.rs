//! Plain-text card elements

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use sort_stack_core::types::{PanelConfig, StateSnapshot};
use sort_stack_core::{CardElement, CardFactory, CoreError, CoreResult};

/// Builds [`TextCard`]s for any configuration that names a card `type`
pub struct TextCardFactory;

#[async_trait]
impl CardFactory for TextCardFactory {
    async fn create_card(&self, config: &PanelConfig) -> CoreResult<Arc<dyn CardElement>> {
        let Some(card_type) = config.card_type() else {
            return Err(CoreError::CardCreation {
                card_type: "<none>".to_string(),
                message: "card configuration has no `type`".to_string(),
            });
        };
        log::debug!("Building {card_type} card");
        Ok(Arc::new(TextCard::new(card_type, config)))
    }
}

/// One line of text describing a card and the state of its entity
#[derive(Debug)]
pub struct TextCard {
    card_type: String,
    entity: Option<String>,
    name: Option<String>,
    rows: usize,
    /// `(title, state)` from the last snapshot
    shown: Mutex<Option<(String, String)>>,
}

impl TextCard {
    fn new(card_type: &str, config: &PanelConfig) -> Self {
        Self {
            card_type: card_type.to_string(),
            entity: config
                .entity()
                .or_else(|| config.first_listed_entity())
                .map(str::to_string),
            name: config.name().map(str::to_string),
            rows: config.listed_entity_count(),
            shown: Mutex::new(None),
        }
    }
}

impl CardElement for TextCard {
    fn set_state(&self, states: &Arc<StateSnapshot>) -> CoreResult<()> {
        let shown = self.entity.as_deref().map(|entity_id| {
            let record = states.get(entity_id);
            let title = self
                .name
                .as_deref()
                .or_else(|| record.and_then(|r| r.friendly_name()))
                .unwrap_or(entity_id)
                .to_string();
            let state = record.map_or_else(|| "unavailable".to_string(), |r| r.state.clone());
            (title, state)
        });
        *self.shown.lock().unwrap_or_else(PoisonError::into_inner) = shown;
        Ok(())
    }

    fn card_size(&self) -> u32 {
        u32::try_from(self.rows).map_or(u32::MAX, |rows| rows.saturating_add(1))
    }

    fn label(&self) -> String {
        let shown = self.shown.lock().unwrap_or_else(PoisonError::into_inner);
        match shown.as_ref() {
            Some((title, state)) => format!("[{}] {title}: {state}", self.card_type),
            None => format!("[{}]", self.card_type),
        }
    }
}
