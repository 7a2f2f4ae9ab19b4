mod assemble;
mod attribute;
mod choice;
mod document;
mod item;
mod normalize;
mod question;
mod result;

pub use assemble::assemble;
pub use choice::{ChoiceEncoding, RawChoice};
pub use document::{parse_quiz, parse_results, read_quiz, read_results, LoadError};
pub use item::{Blank, InteractionData, InteractionType, ItemContent, QuizItem};
pub use normalize::normalize;
pub use question::{Answer, ChoiceOption, Question, Resolution, ANSWER_UNAVAILABLE};
pub use result::{ResultItem, ScoredData, ScoredValue};
