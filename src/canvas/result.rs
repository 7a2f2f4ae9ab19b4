use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashSet;

use super::attribute::{get_attribute, get_number, get_text, id_string, null_as_default};

/// One graded item from a Canvas results export.
#[derive(Debug, Clone, Deserialize)]
pub struct ResultItem {
    #[serde(deserialize_with = "id_string")]
    pub item_id: String,

    #[serde(default)]
    pub position: Option<i64>,

    #[serde(default)]
    pub score: Option<f64>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub scored_data: ScoredData,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoredData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub correct: bool,

    // object keyed by choice/blank id, or an array for ordering questions
    #[serde(default)]
    pub value: Option<Value>,
}

/// The shapes `scored_data.value` comes in.
#[derive(Debug, Clone, Copy)]
pub enum ScoredValue<'a> {
    /// `{id: {result_score, correct, user_response, correct_answer}}`
    Keyed(&'a Map<String, Value>),

    /// `[{result_score, value}, ...]`, where `value` is the id that belongs
    Sequence(&'a [Value]),

    Empty,
}

impl ResultItem {
    pub fn scored_value(&self) -> ScoredValue<'_> {
        ScoredValue::probe(self.scored_data.value.as_ref())
    }
}

impl<'a> ScoredValue<'a> {
    pub fn probe(value: Option<&'a Value>) -> Self {
        match value {
            Some(Value::Object(map)) if !map.is_empty() => ScoredValue::Keyed(map),
            Some(Value::Array(rows)) => ScoredValue::Sequence(rows),
            _ => ScoredValue::Empty,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ScoredValue::Keyed(_) => "keyed",
            ScoredValue::Sequence(_) => "sequence",
            ScoredValue::Empty => "empty",
        }
    }

    /// Ids graded as correct.
    ///
    /// Keyed: an entry counts when `result_score` is 1 or `correct` is true;
    /// the two disagreeing is not an error. Sequence: a row scoring 1 names
    /// its own `value` as correct, whatever slot it sits in.
    pub fn correct_ids(&self) -> HashSet<String> {
        match self {
            ScoredValue::Keyed(map) => map
                .iter()
                .filter(|(_, entry)| {
                    scores_one(entry) || get_attribute::<bool>(entry, "correct") == Some(true)
                })
                .map(|(id, _)| id.clone())
                .collect(),
            ScoredValue::Sequence(rows) => rows
                .iter()
                .filter(|row| scores_one(row))
                .filter_map(|row| get_text(row, "value"))
                .collect(),
            ScoredValue::Empty => HashSet::new(),
        }
    }

    /// Expected text for a blank: `correct_answer`, else `user_response`.
    pub fn blank_answer(&self, blank_id: &str) -> Option<String> {
        match self {
            ScoredValue::Keyed(map) => map.get(blank_id).and_then(|entry| {
                get_text(entry, "correct_answer").or_else(|| get_text(entry, "user_response"))
            }),
            _ => None,
        }
    }
}

fn scores_one(entry: &Value) -> bool {
    get_number(entry, "result_score") == Some(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn result(value: Value) -> ResultItem {
        serde_json::from_value(json!({
            "item_id": "q1",
            "scored_data": {"correct": false, "value": value},
        }))
        .unwrap()
    }

    fn sorted(ids: HashSet<String>) -> Vec<String> {
        let mut ids: Vec<String> = ids.into_iter().collect();
        ids.sort();
        ids
    }

    #[test]
    fn keyed_score_or_flag_marks_correct() {
        let r = result(json!({
            "a": {"result_score": 1, "user_responded": true},
            "b": {"result_score": 0, "correct": true},
            "c": {"result_score": 0, "correct": false},
            "d": {"result_score": "1"},
        }));

        assert_eq!(r.scored_value().kind(), "keyed");
        assert_eq!(sorted(r.scored_value().correct_ids()), vec!["a", "b", "d"]);
    }

    #[test]
    fn sequence_uses_row_value_not_slot() {
        let r = result(json!([
            {"id": 1, "result_score": 0, "value": "Y"},
            {"id": 2, "result_score": 1, "value": "X"},
        ]));

        assert_eq!(r.scored_value().kind(), "sequence");
        assert_eq!(sorted(r.scored_value().correct_ids()), vec!["X"]);
    }

    #[test]
    fn sequence_value_may_be_numeric() {
        let r = result(json!([{"result_score": 1, "value": 17}]));
        assert_eq!(sorted(r.scored_value().correct_ids()), vec!["17"]);
    }

    #[test]
    fn unusable_payloads_are_empty() {
        for value in [json!(null), json!({}), json!("oops"), json!(3)] {
            let r = result(value);
            assert!(r.scored_value().correct_ids().is_empty());
        }

        let r: ResultItem = serde_json::from_value(json!({"item_id": 5})).unwrap();
        assert_eq!(r.item_id, "5");
        assert_eq!(r.scored_value().kind(), "empty");
    }

    #[test]
    fn blank_answer_prefers_correct_answer() {
        let r = result(json!({
            "b1": {"correct_answer": "<p>Paris</p>", "user_response": "paris"},
            "b2": {"correct_answer": "", "user_response": "london"},
            "b3": {"result_score": 0},
        }));
        let value = r.scored_value();

        assert_eq!(value.blank_answer("b1").as_deref(), Some("<p>Paris</p>"));
        assert_eq!(value.blank_answer("b2").as_deref(), Some("london"));
        assert_eq!(value.blank_answer("b3"), None);
        assert_eq!(value.blank_answer("nope"), None);
    }
}
