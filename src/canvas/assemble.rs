use log::{debug, warn};
use std::collections::HashMap;

use super::{item::QuizItem, normalize::normalize, question::Question, result::ResultItem};

/// Normalizes every quiz item in display order.
///
/// Items are stably sorted by position, then question number, then their
/// place in the export. Results are matched on `item_id`; when an id repeats,
/// the first result wins. The n-th returned question is question n.
pub fn assemble(items: &[QuizItem], results: &[ResultItem]) -> Vec<Question> {
    let mut by_id: HashMap<&str, &ResultItem> = HashMap::with_capacity(results.len());
    for result in results {
        if by_id.contains_key(result.item_id.as_str()) {
            warn!("ignoring duplicate result for item {}", result.item_id);
            continue;
        }
        by_id.insert(result.item_id.as_str(), result);
    }

    let mut sorted: Vec<&QuizItem> = items.iter().collect();
    // sort_by_key is stable, so export order breaks the remaining ties
    sorted.sort_by_key(|item| item.order_key());

    let questions: Vec<Question> = sorted
        .into_iter()
        .map(|item| {
            let result = by_id.get(item.id()).copied();
            if result.is_none() {
                warn!("no graded result for item {}", item.id());
            }
            normalize(item, result)
        })
        .collect();

    debug!(
        "assembled {} questions from {} results",
        questions.len(),
        results.len()
    );
    questions
}
