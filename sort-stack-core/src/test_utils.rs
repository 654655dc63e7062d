//! Test helpers
//!
//! Mock collaborators and factory functions for service tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::RwLock;

use crate::error::{CoreError, CoreResult};
use crate::services::SortStackService;
use crate::traits::{CardElement, CardFactory, CardHelpersLoader};
use crate::types::{Panel, PanelConfig, PanelId, StackConfig, StateSnapshot};

// ===== MockCard =====

#[derive(Debug)]
pub struct MockCard {
    label: String,
    size: u32,
    states_received: AtomicUsize,
    reject_states: Arc<AtomicBool>,
}

impl MockCard {
    pub fn states_received(&self) -> usize {
        self.states_received.load(Ordering::SeqCst)
    }
}

impl CardElement for MockCard {
    fn set_state(&self, _states: &Arc<StateSnapshot>) -> CoreResult<()> {
        if self.reject_states.load(Ordering::SeqCst) {
            return Err(CoreError::CardUpdate(format!("{} rejected the state", self.label)));
        }
        self.states_received.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn card_size(&self) -> u32 {
        self.size
    }

    fn label(&self) -> String {
        self.label.clone()
    }
}

// ===== MockCardFactory =====

/// Builds [`MockCard`]s labelled `"<type> <entity>"`, sized by the config's `size` key
pub struct MockCardFactory {
    created: RwLock<Vec<Arc<MockCard>>>,
    created_count: AtomicUsize,
    /// Card type the factory refuses to build
    failing_type: Option<String>,
    delay: Option<Duration>,
    reject_states: Arc<AtomicBool>,
}

impl MockCardFactory {
    pub fn new() -> Self {
        Self {
            created: RwLock::new(Vec::new()),
            created_count: AtomicUsize::new(0),
            failing_type: None,
            delay: None,
            reject_states: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn failing_on(mut self, card_type: &str) -> Self {
        self.failing_type = Some(card_type.to_string());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Makes every card (built or yet to be built) reject state pushes
    pub fn reject_states(&self, reject: bool) {
        self.reject_states.store(reject, Ordering::SeqCst);
    }

    pub fn created_count(&self) -> usize {
        self.created_count.load(Ordering::SeqCst)
    }

    pub async fn created(&self) -> Vec<Arc<MockCard>> {
        self.created.read().await.clone()
    }
}

#[async_trait]
impl CardFactory for MockCardFactory {
    async fn create_card(&self, config: &PanelConfig) -> CoreResult<Arc<dyn CardElement>> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let card_type = config.card_type().unwrap_or("card");
        if self.failing_type.as_deref() == Some(card_type) {
            return Err(CoreError::CardCreation {
                card_type: card_type.to_string(),
                message: "unknown card type".to_string(),
            });
        }

        let size = config
            .get("size")
            .and_then(Value::as_u64)
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(1);
        let card = Arc::new(MockCard {
            label: format!("{card_type} {}", config.entity().unwrap_or("-")),
            size,
            states_received: AtomicUsize::new(0),
            reject_states: Arc::clone(&self.reject_states),
        });

        self.created_count.fetch_add(1, Ordering::SeqCst);
        self.created.write().await.push(Arc::clone(&card));
        Ok(card)
    }
}

// ===== MockHelpersLoader =====

pub struct MockHelpersLoader {
    factory: Arc<MockCardFactory>,
    available: AtomicBool,
    loads: AtomicUsize,
}

impl MockHelpersLoader {
    pub fn new(factory: Arc<MockCardFactory>) -> Self {
        Self {
            factory,
            available: AtomicBool::new(true),
            loads: AtomicUsize::new(0),
        }
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Load attempts so far, failed ones included
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CardHelpersLoader for MockHelpersLoader {
    async fn load_helpers(&self) -> CoreResult<Arc<dyn CardFactory>> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if !self.available.load(Ordering::SeqCst) {
            return Err(CoreError::HelpersUnavailable(
                "helpers module not loaded".to_string(),
            ));
        }
        Ok(self.factory.clone())
    }
}

// ===== Factory functions =====

/// Create a `SortStackService` backed by a fresh mock factory
pub fn create_test_service() -> (
    SortStackService,
    Arc<MockCardFactory>,
    Arc<MockHelpersLoader>,
) {
    create_test_service_with(Arc::new(MockCardFactory::new()))
}

/// Create a `SortStackService` backed by the given mock factory
pub fn create_test_service_with(
    factory: Arc<MockCardFactory>,
) -> (
    SortStackService,
    Arc<MockCardFactory>,
    Arc<MockHelpersLoader>,
) {
    let loader = Arc::new(MockHelpersLoader::new(factory.clone()));
    let service = SortStackService::new(loader.clone());
    (service, factory, loader)
}

/// Flat stack of `tile` cards, one per entity
pub fn flat_config(entities: &[&str], sort: Value) -> StackConfig {
    let cards: Vec<Value> = entities
        .iter()
        .map(|entity| json!({"type": "tile", "entity": entity}))
        .collect();
    StackConfig::from_value(json!({"cards": cards, "sort": sort})).unwrap()
}

pub fn panel(index: usize, config: Value) -> Panel {
    Panel::new(PanelId::new(index), PanelConfig::from_value(config).unwrap())
}
