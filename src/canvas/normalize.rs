use log::debug;

use super::{
    choice::ChoiceEncoding,
    item::QuizItem,
    question::{Answer, ChoiceOption, Question, Resolution},
    result::ResultItem,
};
use crate::markup;

/// Response types that always allow several answers, matched
/// case-insensitively as substrings.
const MULTI_SELECT_MARKERS: &[&str] = &["multipleuuid"];

/// Reconciles one quiz item with its graded result, if any.
///
/// Never fails: data that cannot be read ends up as [`Resolution::Unscored`]
/// or [`Answer::Unavailable`] instead.
pub fn normalize(item: &QuizItem, result: Option<&ResultItem>) -> Question {
    let text = markup::strip(&item.item.item_body);

    let resolution = match result {
        None => {
            debug!("item {} has no graded result", item.id());
            Resolution::Unscored
        }
        Some(result) if !item.item.interaction_data.blanks.is_empty() => open_entry(item, result),
        Some(result) => choices(item, result),
    };

    Question {
        id: item.id().to_string(),
        text,
        resolution,
    }
}

fn open_entry(item: &QuizItem, result: &ResultItem) -> Resolution {
    let blank = &item.item.interaction_data.blanks[0];
    let answer = result
        .scored_value()
        .blank_answer(&blank.id)
        .map(|a| markup::strip(&a))
        .filter(|a| !a.is_empty())
        .map_or(Answer::Unavailable, Answer::Single);

    Resolution::OpenEntry { answer }
}

fn choices(item: &QuizItem, result: &ResultItem) -> Resolution {
    let encoding = ChoiceEncoding::detect(item);
    let scored = result.scored_value();
    debug!(
        "item {}: {} choices, {} scored value",
        item.id(),
        encoding.kind(),
        scored.kind()
    );

    let correct_ids = scored.correct_ids();
    let options: Vec<ChoiceOption> = encoding
        .into_choices()
        .into_iter()
        .map(|choice| ChoiceOption {
            correct: correct_ids.contains(&choice.id),
            label: markup::strip(&choice.body),
            id: choice.id,
        })
        .collect();

    let correct_labels: Vec<String> = options
        .iter()
        .filter(|o| o.correct)
        .map(|o| o.label.clone())
        .collect();

    let multi_answer = is_multi_select(item.response_type()) || correct_labels.len() > 1;

    let answer = match correct_labels.len() {
        0 => Answer::Unavailable,
        1 if !multi_answer => Answer::Single(correct_labels[0].clone()),
        _ => Answer::Multiple(correct_labels),
    };

    Resolution::Choices {
        options,
        multi_answer,
        answer,
    }
}

fn is_multi_select(response_type: &str) -> bool {
    let response_type = response_type.to_lowercase();
    MULTI_SELECT_MARKERS
        .iter()
        .any(|marker| response_type.contains(marker))
}
