//! Card element resolution with per-panel caching

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{OnceCell, RwLock};

use super::error_card::ErrorCard;
use crate::error::CoreResult;
use crate::traits::{CardElement, CardFactory, CardHelpersLoader};
use crate::types::{Panel, PanelConfig, PanelId};

/// Card factory behind a one-time helpers load.
///
/// A failed load is not remembered; the next construction tries again.
pub struct LazyFactory {
    loader: Arc<dyn CardHelpersLoader>,
    factory: OnceCell<Arc<dyn CardFactory>>,
}

impl LazyFactory {
    #[must_use]
    pub fn new(loader: Arc<dyn CardHelpersLoader>) -> Self {
        Self {
            loader,
            factory: OnceCell::new(),
        }
    }

    /// Factory provided by the helpers, loading them on first use
    pub async fn get(&self) -> CoreResult<Arc<dyn CardFactory>> {
        let factory = self
            .factory
            .get_or_try_init(|| async {
                log::debug!("Loading card helpers");
                self.loader.load_helpers().await
            })
            .await?;
        Ok(Arc::clone(factory))
    }
}

/// Element cache of one loaded stack configuration.
///
/// Each panel is built at most once; later resolutions of the same [`PanelId`]
/// return the cached element. Entries are never evicted; a new configuration gets
/// a new resolver.
pub struct ElementResolver {
    factory: Arc<LazyFactory>,
    cache: RwLock<HashMap<PanelId, Arc<dyn CardElement>>>,
}

impl ElementResolver {
    #[must_use]
    pub fn new(factory: Arc<LazyFactory>) -> Self {
        Self {
            factory,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Element for `panel`, building it on a cache miss.
    ///
    /// Construction failures yield an [`ErrorCard`] for this panel only. Placeholders
    /// are not cached, so a later pass retries the factory.
    pub async fn resolve(&self, panel: &Panel) -> Arc<dyn CardElement> {
        if let Some(element) = self.cache.read().await.get(&panel.id) {
            return Arc::clone(element);
        }

        match self.build(&panel.config).await {
            Ok(element) => {
                // A concurrent pass may have built the same panel meanwhile; first insert wins.
                let mut cache = self.cache.write().await;
                Arc::clone(cache.entry(panel.id).or_insert(element))
            }
            Err(e) => {
                if e.is_expected() {
                    log::warn!("Card {} could not be built: {e}", panel.id);
                } else {
                    log::error!("Card {} could not be built: {e}", panel.id);
                }
                Arc::new(ErrorCard::for_card(e.to_string(), panel.config.to_value()))
            }
        }
    }

    async fn build(&self, config: &PanelConfig) -> CoreResult<Arc<dyn CardElement>> {
        let factory = self.factory.get().await?;
        factory.create_card(config).await
    }

    pub async fn cached(&self, id: PanelId) -> Option<Arc<dyn CardElement>> {
        self.cache.read().await.get(&id).cloned()
    }

    pub async fn cached_count(&self) -> usize {
        self.cache.read().await.len()
    }
}
