//! Element factory abstract Trait

use std::sync::Arc;

use async_trait::async_trait;

use super::CardElement;
use crate::error::CoreResult;
use crate::types::PanelConfig;

/// Card element factory Trait
///
/// Builds the visual element for one card configuration. Construction may
/// suspend (the host can lazily load card definitions).
#[async_trait]
pub trait CardFactory: Send + Sync {
    /// Build a card element
    ///
    /// # Arguments
    /// * `config` - Card configuration
    async fn create_card(&self, config: &PanelConfig) -> CoreResult<Arc<dyn CardElement>>;
}

/// Card helpers loader Trait
///
/// Hosts often ship their card factory in a module that is loaded on first use.
/// The loader is awaited before the first construction; once it has succeeded the
/// factory it returned is reused for every later element.
#[async_trait]
pub trait CardHelpersLoader: Send + Sync {
    /// Load the card helpers, returning the factory they provide
    async fn load_helpers(&self) -> CoreResult<Arc<dyn CardFactory>>;
}

/// Loader for hosts whose factory is available up front
#[derive(Clone)]
pub struct ReadyHelpers {
    factory: Arc<dyn CardFactory>,
}

impl ReadyHelpers {
    #[must_use]
    pub fn new(factory: Arc<dyn CardFactory>) -> Self {
        Self { factory }
    }
}

#[async_trait]
impl CardHelpersLoader for ReadyHelpers {
    async fn load_helpers(&self) -> CoreResult<Arc<dyn CardFactory>> {
        Ok(Arc::clone(&self.factory))
    }
}
