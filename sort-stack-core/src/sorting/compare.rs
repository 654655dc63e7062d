//! Sort-key comparison

use std::cmp::Ordering;

use icu_collator::{Collator, CollatorOptions, Numeric, Strength};
use icu_locid::Locale;

use super::key::SortKey;
use crate::types::{SortOrder, SortSpec, DEFAULT_LOCALE};

enum Mode {
    Numeric,
    Text {
        case_insensitive: bool,
        collator: Option<Collator>,
    },
}

/// Comparator built once per sort pass from a [`SortSpec`].
///
/// Numeric mode coerces both keys to numbers (missing or unparseable keys become
/// negative infinity). Text mode collates with the configured locale at base
/// strength with numeric substrings ordered by value, so `"item 2"` precedes
/// `"item 10"` and `"a"`, `"A"` and `"á"` compare equal.
pub struct Comparator {
    order: SortOrder,
    mode: Mode,
}

impl Comparator {
    pub fn new(spec: &SortSpec) -> Self {
        let mode = if spec.numeric {
            Mode::Numeric
        } else {
            Mode::Text {
                case_insensitive: spec.case_insensitive,
                collator: build_collator(&spec.locale),
            }
        };
        Self {
            order: spec.order,
            mode,
        }
    }

    pub fn compare(&self, a: &SortKey, b: &SortKey) -> Ordering {
        let ordering = match &self.mode {
            Mode::Numeric => a
                .to_number()
                .partial_cmp(&b.to_number())
                .unwrap_or(Ordering::Equal),
            Mode::Text {
                case_insensitive,
                collator,
            } => {
                let (mut left, mut right) = (a.to_text(), b.to_text());
                if *case_insensitive {
                    left = left.to_lowercase().into();
                    right = right.to_lowercase().into();
                }
                match collator {
                    Some(collator) => collator.compare(&left, &right),
                    None => left.cmp(&right),
                }
            }
        };

        match self.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

/// One-shot comparison; prefer a [`Comparator`] when sorting many keys.
pub fn compare(a: &SortKey, b: &SortKey, spec: &SortSpec) -> Ordering {
    Comparator::new(spec).compare(a, b)
}

fn build_collator(locale: &str) -> Option<Collator> {
    let locale: Locale = locale.parse().unwrap_or_else(|_| {
        log::warn!("Unrecognized sort locale '{locale}', using {DEFAULT_LOCALE}");
        DEFAULT_LOCALE.parse().unwrap_or(Locale::UND)
    });

    let mut options = CollatorOptions::new();
    options.strength = Some(Strength::Primary);
    options.numeric = Some(Numeric::On);

    match Collator::try_new(&locale.into(), options) {
        Ok(collator) => Some(collator),
        Err(e) => {
            log::warn!("Collator unavailable, falling back to code point order: {e}");
            None
        }
    }
}
