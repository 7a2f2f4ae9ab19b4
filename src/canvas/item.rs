use serde::Deserialize;
use serde_json::Value;

use super::attribute::{id_list, id_string, null_as_default};

/// One entry of a Canvas quiz export.
#[derive(Debug, Clone, Deserialize)]
pub struct QuizItem {
    #[serde(default)]
    pub position: Option<i64>,

    #[serde(default)]
    pub question_number: Option<i64>,

    #[serde(default)]
    pub points_possible: Option<f64>,

    #[serde(default)]
    pub calculator_type: Option<String>,

    pub item: ItemContent,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItemContent {
    #[serde(deserialize_with = "id_string")]
    pub id: String,

    #[serde(default)]
    pub title: Option<String>,

    /// question body, HTML
    #[serde(default, deserialize_with = "null_as_default")]
    pub item_body: String,

    /// "Uuid", "MultipleUuid", "Boolean", "Hash", ...
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_response_type: String,

    #[serde(default)]
    pub interaction_type: Option<InteractionType>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub interaction_data: InteractionData,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InteractionType {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InteractionData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub blanks: Vec<Blank>,

    // array or id-keyed object, decoded later by `ChoiceEncoding`
    #[serde(default)]
    pub choices: Option<Value>,

    #[serde(default, deserialize_with = "id_list")]
    pub shuffled_order: Vec<String>,

    #[serde(default)]
    pub true_choice: Option<String>,

    #[serde(default)]
    pub false_choice: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Blank {
    // empty when missing; such a blank matches no result entry
    #[serde(default, deserialize_with = "id_string")]
    pub id: String,

    #[serde(default)]
    pub answer_type: Option<String>,
}

impl QuizItem {
    pub fn id(&self) -> &str {
        &self.item.id
    }

    pub fn response_type(&self) -> &str {
        &self.item.user_response_type
    }

    pub fn interaction_slug(&self) -> Option<&str> {
        self.item
            .interaction_type
            .as_ref()
            .map(|t| t.slug.as_str())
            .filter(|s| !s.is_empty())
    }

    /// Sort key: position, then question number, missing values as 0.
    pub fn order_key(&self) -> (i64, i64) {
        (
            self.position.unwrap_or_default(),
            self.question_number.unwrap_or_default(),
        )
    }
}
