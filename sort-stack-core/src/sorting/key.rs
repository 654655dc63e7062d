//! Sort-key extraction

use std::borrow::Cow;

use serde_json::Value;

use crate::types::{PanelConfig, SortBy, SortSpec, StateLookup};
use crate::utils::datetime::epoch_millis;

const ATTRIBUTES_PREFIX: &str = "attributes.";

/// Comparable value derived from one panel
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    /// No value at all (`null` / `undefined` from a host)
    Missing,
    Text(String),
    Number(f64),
}

impl SortKey {
    /// The empty-string key every unresolvable lookup degrades to
    #[must_use]
    pub fn empty() -> Self {
        Self::Text(String::new())
    }

    fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Self::Missing,
            Value::Number(n) => n.as_f64().map_or(Self::Missing, Self::Number),
            Value::String(s) => Self::Text(s.clone()),
            Value::Bool(b) => Self::Text(b.to_string()),
            other => Self::Text(other.to_string()),
        }
    }

    /// Numeric coercion; anything without a finite value is negative infinity.
    pub fn to_number(&self) -> f64 {
        let n = match self {
            Self::Missing => return f64::NEG_INFINITY,
            Self::Number(n) => *n,
            Self::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return f64::NEG_INFINITY;
                }
                trimmed.parse::<f64>().unwrap_or(f64::NAN)
            }
        };
        if n.is_finite() {
            n
        } else {
            f64::NEG_INFINITY
        }
    }

    /// String form used by collation; missing keys read as the empty string.
    pub fn to_text(&self) -> Cow<'_, str> {
        match self {
            Self::Missing => Cow::Borrowed(""),
            Self::Text(s) => Cow::Borrowed(s),
            Self::Number(n) => Cow::Owned(format_number(*n)),
        }
    }
}

/// Formats integral values without a fractional part (`42`, not `42.0`).
#[allow(clippy::cast_possible_truncation)]
fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let sign = if n > 0.0 { "" } else { "-" };
        format!("{sign}Infinity")
    } else if n.fract() == 0.0 && n.abs() < 1e15 {
        (n as i64).to_string()
    } else {
        n.to_string()
    }
}

/// Entity a panel is sorted by: the [`SortSpec`] `entity` override, the panel's
/// `entity`, or the first of its `entities`.
pub fn representative_entity<'a>(panel: &'a PanelConfig, spec: &'a SortSpec) -> Option<&'a str> {
    spec.entity
        .as_deref()
        .filter(|id| !id.is_empty())
        .or_else(|| panel.entity())
        .or_else(|| panel.first_listed_entity())
}

/// Derives the sort key of one panel.
///
/// Never fails: missing entities, records or attributes degrade to the empty
/// string, or to `0` for timestamp kinds so that such panels sort as earliest.
pub fn extract_sort_key<S>(panel: &PanelConfig, states: &S, spec: &SortSpec) -> SortKey
where
    S: StateLookup + ?Sized,
{
    let entity_id = representative_entity(panel, spec);

    if spec.by == SortBy::EntityId {
        return SortKey::Text(entity_id.unwrap_or_default().to_string());
    }

    let Some(record) = entity_id.and_then(|id| states.state(id)) else {
        return if spec.by.is_timestamp() {
            SortKey::Number(0.0)
        } else {
            SortKey::empty()
        };
    };

    match spec.by {
        SortBy::Name => SortKey::Text(
            panel
                .name()
                .or_else(|| record.friendly_name())
                .or(entity_id)
                .unwrap_or_default()
                .to_string(),
        ),
        SortBy::State => SortKey::Text(record.state.clone()),
        SortBy::LastChanged => {
            SortKey::Number(record.last_changed.as_deref().map_or(0.0, epoch_millis))
        }
        SortBy::LastUpdated => {
            SortKey::Number(record.last_updated.as_deref().map_or(0.0, epoch_millis))
        }
        SortBy::Attribute => {
            let path = spec.attribute.as_deref().unwrap_or_default();
            if path.split('.').all(str::is_empty) {
                return SortKey::empty();
            }
            let found = record.read_path(path).or_else(|| {
                if path.starts_with(ATTRIBUTES_PREFIX) {
                    None
                } else {
                    record.read_path(&format!("{ATTRIBUTES_PREFIX}{path}"))
                }
            });
            match found.as_deref().map(SortKey::from_json) {
                Some(SortKey::Missing) | None => SortKey::empty(),
                Some(key) => key,
            }
        }
        SortBy::EntityId | SortBy::Unsupported => SortKey::empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{StateRecord, StateSnapshot};
    use serde_json::json;

    fn panel(value: Value) -> PanelConfig {
        PanelConfig::from_value(value).unwrap()
    }

    fn states() -> StateSnapshot {
        StateSnapshot::from_records([
            StateRecord::new("light.kitchen", "on")
                .with_attribute("friendly_name", json!("Kitchen"))
                .with_attribute("brightness", json!(180))
                .with_attribute("effect", json!({"name": "rainbow"}))
                .with_last_changed("2024-03-01T12:00:00Z")
                .with_last_updated("not a date"),
            StateRecord::new("sensor.phone", "54").with_attribute("battery_level", json!(42)),
        ])
    }

    fn text(s: &str) -> SortKey {
        SortKey::Text(s.to_string())
    }

    #[test]
    fn entity_precedence() {
        let spec = SortSpec::default();
        let both = panel(json!({"entity": "light.a", "entities": ["light.b"]}));
        assert_eq!(representative_entity(&both, &spec), Some("light.a"));

        let listed = panel(json!({"entities": [{"entity": "light.c"}]}));
        assert_eq!(representative_entity(&listed, &spec), Some("light.c"));

        let overridden = SortSpec {
            entity: Some("sun.sun".to_string()),
            ..SortSpec::default()
        };
        assert_eq!(representative_entity(&both, &overridden), Some("sun.sun"));

        assert_eq!(representative_entity(&panel(json!({})), &spec), None);
    }

    #[test]
    fn entity_id_needs_no_state() {
        let spec = SortSpec::by(SortBy::EntityId);
        let p = panel(json!({"entity": "light.unknown"}));
        assert_eq!(extract_sort_key(&p, &states(), &spec), text("light.unknown"));
        assert_eq!(extract_sort_key(&panel(json!({})), &states(), &spec), text(""));
    }

    #[test]
    fn missing_record_defaults() {
        let p = panel(json!({"entity": "light.gone", "name": "Gone"}));
        let s = states();
        assert_eq!(
            extract_sort_key(&p, &s, &SortSpec::by(SortBy::LastChanged)),
            SortKey::Number(0.0)
        );
        assert_eq!(
            extract_sort_key(&p, &s, &SortSpec::by(SortBy::LastUpdated)),
            SortKey::Number(0.0)
        );
        assert_eq!(extract_sort_key(&p, &s, &SortSpec::by(SortBy::Name)), text(""));
        assert_eq!(extract_sort_key(&p, &s, &SortSpec::by(SortBy::State)), text(""));
    }

    #[test]
    fn name_precedence() {
        let s = states();
        let spec = SortSpec::by(SortBy::Name);
        let named = panel(json!({"entity": "light.kitchen", "name": "Cooking"}));
        assert_eq!(extract_sort_key(&named, &s, &spec), text("Cooking"));

        let plain = panel(json!({"entity": "light.kitchen"}));
        assert_eq!(extract_sort_key(&plain, &s, &spec), text("Kitchen"));

        let unnamed = panel(json!({"entity": "sensor.phone"}));
        assert_eq!(extract_sort_key(&unnamed, &s, &spec), text("sensor.phone"));
    }

    #[test]
    fn state_and_timestamps() {
        let s = states();
        let p = panel(json!({"entity": "light.kitchen"}));
        assert_eq!(extract_sort_key(&p, &s, &SortSpec::by(SortBy::State)), text("on"));
        assert_eq!(
            extract_sort_key(&p, &s, &SortSpec::by(SortBy::LastChanged)),
            SortKey::Number(1_709_294_400_000.0)
        );
        assert_eq!(
            extract_sort_key(&p, &s, &SortSpec::by(SortBy::LastUpdated)),
            SortKey::Number(0.0)
        );
    }

    #[test]
    fn attribute_with_and_without_prefix() {
        let s = states();
        let p = panel(json!({"entity": "light.kitchen"}));
        let bare = SortSpec::by(SortBy::Attribute).with_attribute("brightness");
        assert_eq!(extract_sort_key(&p, &s, &bare), SortKey::Number(180.0));

        let prefixed = SortSpec::by(SortBy::Attribute).with_attribute("attributes.effect.name");
        assert_eq!(extract_sort_key(&p, &s, &prefixed), text("rainbow"));

        let top_level = SortSpec::by(SortBy::Attribute).with_attribute("state");
        assert_eq!(extract_sort_key(&p, &s, &top_level), text("on"));

        let missing = SortSpec::by(SortBy::Attribute).with_attribute("battery_level");
        assert_eq!(extract_sort_key(&p, &s, &missing), text(""));

        let no_path = SortSpec::by(SortBy::Attribute);
        assert_eq!(extract_sort_key(&p, &s, &no_path), text(""));
    }

    #[test]
    fn float_timestamps_keep_sub_second_order() {
        let s: StateSnapshot = serde_json::from_value(json!({
            "sensor.a": {"state": "on", "last_changed": 1_709_294_400.5},
            "sensor.b": {"state": "on", "last_changed": 1_709_294_400_u64},
        }))
        .unwrap();
        let spec = SortSpec::by(SortBy::LastChanged);

        let a = extract_sort_key(&panel(json!({"entity": "sensor.a"})), &s, &spec);
        let b = extract_sort_key(&panel(json!({"entity": "sensor.b"})), &s, &spec);

        assert_eq!(a, SortKey::Number(1_709_294_400_500.0));
        assert_eq!(b, SortKey::Number(1_709_294_400_000.0));
    }

    #[test]
    fn boolean_and_indexed_attributes() {
        let s = StateSnapshot::from_records([StateRecord::new("weather.home", "sunny")
            .with_attribute("is_day", json!(true))
            .with_attribute("forecast", json!([{"t": 18}, {"t": 21}]))]);
        let p = panel(json!({"entity": "weather.home"}));

        let flag = SortSpec::by(SortBy::Attribute).with_attribute("is_day");
        assert_eq!(extract_sort_key(&p, &s, &flag), text("true"));

        let indexed = SortSpec::by(SortBy::Attribute).with_attribute("attributes.forecast.1.t");
        assert_eq!(extract_sort_key(&p, &s, &indexed), SortKey::Number(21.0));

        let bare_indexed = SortSpec::by(SortBy::Attribute).with_attribute("forecast.0.t");
        assert_eq!(extract_sort_key(&p, &s, &bare_indexed), SortKey::Number(18.0));

        let out_of_range = SortSpec::by(SortBy::Attribute).with_attribute("forecast.5.t");
        assert_eq!(extract_sort_key(&p, &s, &out_of_range), text(""));
    }

    #[test]
    fn structured_attributes_become_text() {
        let s = states();
        let p = panel(json!({"entity": "light.kitchen"}));
        let spec = SortSpec::by(SortBy::Attribute).with_attribute("effect");
        assert_eq!(extract_sort_key(&p, &s, &spec), text(r#"{"name":"rainbow"}"#));
    }

    #[test]
    fn unsupported_kind_is_empty() {
        let p = panel(json!({"entity": "light.kitchen"}));
        assert_eq!(
            extract_sort_key(&p, &states(), &SortSpec::by(SortBy::Unsupported)),
            text("")
        );
    }

    #[test]
    fn numeric_coercion() {
        assert!((text(" 42 ").to_number() - 42.0).abs() < f64::EPSILON);
        assert_eq!(text("").to_number(), f64::NEG_INFINITY);
        assert_eq!(text("unavailable").to_number(), f64::NEG_INFINITY);
        assert_eq!(text("inf").to_number(), f64::NEG_INFINITY);
        assert_eq!(SortKey::Missing.to_number(), f64::NEG_INFINITY);
        assert!((SortKey::Number(-3.5).to_number() + 3.5).abs() < f64::EPSILON);
    }

    #[test]
    fn text_conversion() {
        assert_eq!(SortKey::Number(42.0).to_text(), "42");
        assert_eq!(SortKey::Number(2.5).to_text(), "2.5");
        assert_eq!(SortKey::Missing.to_text(), "");
        assert_eq!(text("Kök").to_text(), "Kök");
    }
}
