//! Sorted stack render service

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::RwLock;

use super::element_resolver::{ElementResolver, LazyFactory};
use super::error_card::ErrorCard;
use crate::error::{CoreError, CoreResult};
use crate::sorting::order_plan;
use crate::traits::{CardElement, CardHelpersLoader};
use crate::types::{StackConfig, StackLayout, StackPlan, StateSnapshot};

/// Result of one render pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassOutcome {
    /// The sorted elements are now displayed
    Committed { count: usize },
    /// The pass failed and a single error card is displayed instead
    Recovered { message: String },
    /// A newer pass (or configuration) started meanwhile; nothing was committed
    Superseded,
}

/// A validated plan together with the element cache built for it
struct LoadedStack {
    plan: StackPlan,
    resolver: ElementResolver,
}

/// Sorted stack service
///
/// Holds the loaded configuration and the displayed render order. Every call to
/// [`set_state`](Self::set_state) re-sorts the stack against the new snapshot.
pub struct SortStackService {
    factory: Arc<LazyFactory>,
    stack: RwLock<Option<Arc<LoadedStack>>>,
    displayed: RwLock<Vec<Arc<dyn CardElement>>>,
    generation: AtomicU64,
}

impl SortStackService {
    #[must_use]
    pub fn new(loader: Arc<dyn CardHelpersLoader>) -> Self {
        Self {
            factory: Arc::new(LazyFactory::new(loader)),
            stack: RwLock::new(None),
            displayed: RwLock::new(Vec::new()),
            generation: AtomicU64::new(0),
        }
    }

    /// Loads a stack configuration.
    ///
    /// Replaces any previous configuration along with its element cache. Passes still
    /// running against the old configuration will not commit.
    pub async fn set_config(&self, config: StackConfig) -> CoreResult<()> {
        let plan = config.into_plan()?;
        log::debug!("Stack configured with {} cards", plan.panel_count());

        let loaded = LoadedStack {
            plan,
            resolver: ElementResolver::new(Arc::clone(&self.factory)),
        };
        *self.stack.write().await = Some(Arc::new(loaded));
        self.generation.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    /// Runs a render pass for a new state snapshot.
    ///
    /// Never fails; a failing pass displays an [`ErrorCard`] instead.
    pub async fn set_state(&self, states: StateSnapshot) -> PassOutcome {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let states = Arc::new(states);

        let (cards, outcome) = match self.render(&states).await {
            Ok(cards) => {
                let count = cards.len();
                (cards, PassOutcome::Committed { count })
            }
            Err(e) => {
                if e.is_expected() {
                    log::warn!("Render pass failed: {e}");
                } else {
                    log::error!("Render pass failed: {e}");
                }
                let message = e.to_string();
                let placeholder: Arc<dyn CardElement> = Arc::new(ErrorCard::new(message.clone()));
                (vec![placeholder], PassOutcome::Recovered { message })
            }
        };

        let mut displayed = self.displayed.write().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            log::debug!("Discarding render pass {generation}, a newer one has started");
            return PassOutcome::Superseded;
        }
        *displayed = cards;
        outcome
    }

    async fn render(&self, states: &Arc<StateSnapshot>) -> CoreResult<Vec<Arc<dyn CardElement>>> {
        let stack = self
            .stack
            .read()
            .await
            .clone()
            .ok_or(CoreError::NotConfigured)?;

        let ordered = order_plan(&stack.plan, states.as_ref());
        log::debug!("Rendering {} cards", ordered.len());

        let cards = join_all(ordered.into_iter().map(|panel| stack.resolver.resolve(panel))).await;
        for card in &cards {
            card.set_state(states)?;
        }
        Ok(cards)
    }

    /// Elements of the last committed pass, in render order
    pub async fn displayed(&self) -> Vec<Arc<dyn CardElement>> {
        self.displayed.read().await.clone()
    }

    /// Layout of the loaded configuration, if any
    pub async fn layout(&self) -> Option<StackLayout> {
        self.stack.read().await.as_ref().map(|stack| stack.plan.layout)
    }

    /// Render-size hint: the sum of the displayed cards' sizes for a vertical stack,
    /// the largest of them for a horizontal one.
    pub async fn card_size(&self) -> u32 {
        let layout = self.layout().await.unwrap_or_default();
        let displayed = self.displayed.read().await;
        let sizes = displayed.iter().map(|card| card.card_size());
        match layout {
            StackLayout::Vertical => sizes.sum(),
            StackLayout::Horizontal => sizes.max().unwrap_or(0),
        }
    }
}
