use regex::Regex;
use serde::Serialize;
use std::{collections::BTreeMap, fmt::Write, sync::LazyLock};

use crate::canvas::{Answer, Question, Resolution, ANSWER_UNAVAILABLE};

static WEEK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^(wk\d{2})").unwrap());

#[derive(Debug, Default, Clone)]
pub struct RenderOptions {
    /// e.g. "WK03"; the heading falls back to a generic "WK" without it
    pub week: Option<String>,

    /// prepend a YAML front matter block
    pub frontmatter: bool,
}

#[derive(Serialize, Debug)]
#[serde(untagged)]
enum Frontmatter<'a> {
    Title(&'a str),
    Week(Option<&'a str>),
    Count(usize),
}

/// `wk03_quiz.json` -> `WK03`. Only a leading `wk` plus two digits counts.
pub fn week_label(file_stem: &str) -> Option<String> {
    WEEK_RE
        .captures(file_stem.trim())
        .map(|caps| caps[1].to_uppercase())
}

pub fn title(week: Option<&str>) -> String {
    match week.map(str::trim).filter(|w| !w.is_empty()) {
        Some(week) => format!("{} Quiz — Questions and Solutions", week.to_uppercase()),
        None => String::from("WK Quiz — Questions and Solutions"),
    }
}

pub fn render_markdown(questions: &[Question], options: &RenderOptions) -> anyhow::Result<String> {
    let title = title(options.week.as_deref());
    let mut out = String::with_capacity(200 * (questions.len() + 1));

    if options.frontmatter {
        let unscored = questions.iter().filter(|q| !q.is_scored()).count();
        let week = options.week.as_deref().map(str::trim).filter(|w| !w.is_empty());

        let mut fm: BTreeMap<&str, Frontmatter> = BTreeMap::new();
        fm.insert("title", Frontmatter::Title(title.as_str()));
        fm.insert("week", Frontmatter::Week(week));
        fm.insert("questions", Frontmatter::Count(questions.len()));
        fm.insert("unscored", Frontmatter::Count(unscored));

        write!(out, "---\n{}---\n\n", serde_yaml_ng::to_string(&fm)?)?;
    }

    writeln!(out, "# {}\n", title)?;

    for (index, question) in questions.iter().enumerate() {
        render_question(&mut out, index + 1, question)?;
    }

    Ok(out)
}

fn render_question(out: &mut String, number: usize, question: &Question) -> std::fmt::Result {
    writeln!(out, "## {}) {}", number, question.text)?;

    match &question.resolution {
        Resolution::Unscored => writeln!(out, "- Options: (no result data)\n"),
        Resolution::OpenEntry { answer } => {
            writeln!(out, "- Options: N/A (open entry)\n")?;
            render_answer(out, answer)
        }
        Resolution::Choices {
            options, answer, ..
        } => {
            if !options.is_empty() {
                writeln!(out, "- Options:")?;
                for option in options {
                    let marker = if option.correct { " (correct)" } else { "" };
                    writeln!(out, "  - {}{}", option.label, marker)?;
                }
                writeln!(out)?;
            }
            render_answer(out, answer)
        }
    }
}

fn render_answer(out: &mut String, answer: &Answer) -> std::fmt::Result {
    match answer {
        Answer::Single(label) => writeln!(out, "- Answer: {}\n", label),
        Answer::Multiple(labels) => {
            writeln!(out, "- Correct answers:")?;
            for label in labels {
                writeln!(out, "  - {}", label)?;
            }
            writeln!(out)
        }
        Answer::Unavailable => writeln!(out, "- Answer: {}\n", ANSWER_UNAVAILABLE),
    }
}
