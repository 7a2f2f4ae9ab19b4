use log::debug;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use super::attribute::{get_attribute, get_number};
use super::item::QuizItem;

const DEFAULT_TRUE_LABEL: &str = "True";
const DEFAULT_FALSE_LABEL: &str = "False";
const TRUE_FALSE_SLUG: &str = "true-false";
const BOOLEAN_RESPONSE: &str = "Boolean";

/// A choice in display order, label still carrying its markup.
#[derive(Debug, Clone, PartialEq)]
pub struct RawChoice {
    pub id: String,
    pub body: String,
    pub position: i64,
}

/// The shapes Canvas uses for `interaction_data.choices`.
#[derive(Debug, Clone, PartialEq)]
pub enum ChoiceEncoding {
    /// `[{id, item_body, position}, ...]`
    Flat(Vec<RawChoice>),

    /// true/false question, choices implied
    Boolean { true_label: String, false_label: String },

    /// `{id: {item_body}}` plus a `shuffled_order` naming the display order
    Keyed {
        entries: BTreeMap<String, String>,
        order: Vec<String>,
    },

    /// `{id: {item_body}}` with nothing to order it by
    KeyedUnordered(BTreeMap<String, String>),

    None,
}

impl ChoiceEncoding {
    /// Probes the raw item for its choice shape, first match wins: a non-empty
    /// array, a true/false question, a keyed map with an order, a keyed map.
    pub fn detect(item: &QuizItem) -> Self {
        let data = &item.item.interaction_data;

        if let Some(Value::Array(raw)) = &data.choices {
            let choices = flat_choices(raw);
            if !choices.is_empty() {
                return ChoiceEncoding::Flat(choices);
            }
        }

        if item.response_type().eq_ignore_ascii_case(BOOLEAN_RESPONSE)
            || item.interaction_slug() == Some(TRUE_FALSE_SLUG)
        {
            return ChoiceEncoding::Boolean {
                true_label: label_or(&data.true_choice, DEFAULT_TRUE_LABEL),
                false_label: label_or(&data.false_choice, DEFAULT_FALSE_LABEL),
            };
        }

        match &data.choices {
            Some(Value::Object(map)) if !map.is_empty() => {
                let entries = keyed_choices(map);
                if data.shuffled_order.is_empty() {
                    ChoiceEncoding::KeyedUnordered(entries)
                } else {
                    ChoiceEncoding::Keyed {
                        entries,
                        order: data.shuffled_order.clone(),
                    }
                }
            }
            _ => ChoiceEncoding::None,
        }
    }

    /// Flattens the encoding into choices sorted by display position.
    pub fn into_choices(self) -> Vec<RawChoice> {
        match self {
            ChoiceEncoding::Flat(mut choices) => {
                choices.sort_by_key(|c| c.position);
                choices
            }
            ChoiceEncoding::Boolean {
                true_label,
                false_label,
            } => vec![
                RawChoice {
                    id: "true".to_string(),
                    body: true_label,
                    position: 1,
                },
                RawChoice {
                    id: "false".to_string(),
                    body: false_label,
                    position: 2,
                },
            ],
            ChoiceEncoding::Keyed { entries, order } => {
                let ordered = in_order(&entries, &order);
                if ordered.is_empty() {
                    debug!("shuffled_order matched no choice ids, falling back to key order");
                    in_key_order(entries)
                } else {
                    ordered
                }
            }
            ChoiceEncoding::KeyedUnordered(entries) => in_key_order(entries),
            ChoiceEncoding::None => Vec::new(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ChoiceEncoding::Flat(_) => "flat",
            ChoiceEncoding::Boolean { .. } => "boolean",
            ChoiceEncoding::Keyed { .. } => "keyed",
            ChoiceEncoding::KeyedUnordered(_) => "keyed-unordered",
            ChoiceEncoding::None => "none",
        }
    }
}

fn label_or(label: &Option<String>, default: &str) -> String {
    match label.as_deref() {
        Some(l) if !l.trim().is_empty() => l.to_string(),
        _ => default.to_string(),
    }
}

// Entries without an id cannot be matched against results and are dropped.
// A missing position keeps the entry's place in the array.
fn flat_choices(raw: &[Value]) -> Vec<RawChoice> {
    raw.iter()
        .enumerate()
        .filter_map(|(index, choice)| {
            let id: String = get_attribute(choice, "id")?;
            Some(RawChoice {
                id,
                body: get_attribute(choice, "item_body").unwrap_or_default(),
                position: get_number(choice, "position")
                    .map(|p| p as i64)
                    .unwrap_or(index as i64 + 1),
            })
        })
        .collect()
}

// The map key is the id results refer to; an inner `id` is ignored.
fn keyed_choices(map: &Map<String, Value>) -> BTreeMap<String, String> {
    map.iter()
        .map(|(key, choice)| {
            let body = match choice {
                Value::String(s) => s.clone(),
                other => get_attribute(other, "item_body").unwrap_or_default(),
            };
            (key.clone(), body)
        })
        .collect()
}

fn in_order(entries: &BTreeMap<String, String>, order: &[String]) -> Vec<RawChoice> {
    order
        .iter()
        .filter_map(|id| entries.get(id).map(|body| (id, body)))
        .enumerate()
        .map(|(index, (id, body))| RawChoice {
            id: id.clone(),
            body: body.clone(),
            position: index as i64 + 1,
        })
        .collect()
}

fn in_key_order(entries: BTreeMap<String, String>) -> Vec<RawChoice> {
    entries
        .into_iter()
        .enumerate()
        .map(|(index, (id, body))| RawChoice {
            id,
            body,
            position: index as i64 + 1,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn quiz_item(user_response_type: &str, slug: &str, data: Value) -> QuizItem {
        serde_json::from_value(json!({
            "item": {
                "id": "q",
                "user_response_type": user_response_type,
                "interaction_type": {"slug": slug},
                "interaction_data": data,
            }
        }))
        .unwrap()
    }

    fn ids(choices: &[RawChoice]) -> Vec<&str> {
        choices.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn flat_array_is_sorted_by_position() {
        let item = quiz_item(
            "Uuid",
            "choice",
            json!({"choices": [
                {"id": "c", "item_body": "<p>C</p>", "position": 3},
                {"id": "a", "item_body": "<p>A</p>", "position": 1},
                {"id": "b", "item_body": "<p>B</p>", "position": 2},
            ]}),
        );

        let encoding = ChoiceEncoding::detect(&item);
        assert_eq!(encoding.kind(), "flat");
        assert_eq!(ids(&encoding.into_choices()), vec!["a", "b", "c"]);
    }

    #[test]
    fn flat_array_wins_over_boolean_tag() {
        let item = quiz_item(
            "Boolean",
            "true-false",
            json!({"choices": [{"id": "yes", "item_body": "Yes", "position": 1}]}),
        );
        assert_eq!(ChoiceEncoding::detect(&item).kind(), "flat");
    }

    #[test]
    fn boolean_defaults_to_true_false() {
        let item = quiz_item("Boolean", "true-false", json!({}));
        let choices = ChoiceEncoding::detect(&item).into_choices();

        assert_eq!(ids(&choices), vec!["true", "false"]);
        assert_eq!(choices[0].body, "True");
        assert_eq!(choices[1].body, "False");
        assert_eq!((choices[0].position, choices[1].position), (1, 2));
    }

    #[test]
    fn boolean_uses_override_labels() {
        let item = quiz_item(
            "boolean",
            "",
            json!({"true_choice": "Correct", "false_choice": "Incorrect"}),
        );
        let choices = ChoiceEncoding::detect(&item).into_choices();
        assert_eq!(choices[0].body, "Correct");
        assert_eq!(choices[1].body, "Incorrect");
    }

    #[test]
    fn boolean_detected_from_slug_alone() {
        let item = quiz_item("Uuid", "true-false", json!({"choices": {}}));
        assert_eq!(ChoiceEncoding::detect(&item).kind(), "boolean");
    }

    #[test]
    fn keyed_map_follows_shuffled_order() {
        let item = quiz_item(
            "Uuid",
            "choice",
            json!({
                "choices": {
                    "a": {"item_body": "A"},
                    "b": {"item_body": "B"},
                    "c": {"item_body": "C"},
                },
                "shuffled_order": ["c", "missing", "a", "b"],
            }),
        );

        let choices = ChoiceEncoding::detect(&item).into_choices();
        assert_eq!(ids(&choices), vec!["c", "a", "b"]);
        assert_eq!(
            choices.iter().map(|c| c.position).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn keyed_map_with_useless_order_falls_back_to_keys() {
        let item = quiz_item(
            "Uuid",
            "choice",
            json!({
                "choices": {"b": {"item_body": "B"}, "a": {"item_body": "A"}},
                "shuffled_order": ["x", "y"],
            }),
        );

        let encoding = ChoiceEncoding::detect(&item);
        assert_eq!(encoding.kind(), "keyed");
        assert_eq!(ids(&encoding.into_choices()), vec!["a", "b"]);
    }

    #[test]
    fn keyed_map_without_inner_ids_keeps_every_entry() {
        let item = quiz_item(
            "Uuid",
            "choice",
            json!({"choices": {"k2": {"item_body": "two"}, "k1": {"item_body": "one"}}}),
        );

        let encoding = ChoiceEncoding::detect(&item);
        assert_eq!(encoding.kind(), "keyed-unordered");
        let choices = encoding.into_choices();
        assert_eq!(ids(&choices), vec!["k1", "k2"]);
        assert_eq!(choices[0].body, "one");
    }

    #[test]
    fn missing_choices_yield_nothing() {
        let item = quiz_item("Uuid", "choice", json!({"choices": []}));
        let encoding = ChoiceEncoding::detect(&item);
        assert_eq!(encoding, ChoiceEncoding::None);
        assert!(encoding.into_choices().is_empty());
    }
}
