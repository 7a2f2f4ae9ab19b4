pub const ANSWER_UNAVAILABLE: &str = "(answer unavailable)";

/// A question reduced to what a study sheet needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    /// item id from the quiz export
    pub id: String,

    /// plain text, single line
    pub text: String,

    pub resolution: Resolution,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// no graded result matched the question
    Unscored,

    /// fill in the blank, one expected answer and no options
    OpenEntry { answer: Answer },

    Choices {
        options: Vec<ChoiceOption>,
        multi_answer: bool,
        answer: Answer,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceOption {
    pub id: String,
    pub label: String,
    pub correct: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    Single(String),
    Multiple(Vec<String>),
    Unavailable,
}

impl Question {
    pub fn is_scored(&self) -> bool {
        !matches!(self.resolution, Resolution::Unscored)
    }

    pub fn options(&self) -> &[ChoiceOption] {
        match &self.resolution {
            Resolution::Choices { options, .. } => options,
            _ => &[],
        }
    }

    pub fn answer(&self) -> Option<&Answer> {
        match &self.resolution {
            Resolution::Unscored => None,
            Resolution::OpenEntry { answer } | Resolution::Choices { answer, .. } => Some(answer),
        }
    }
}
