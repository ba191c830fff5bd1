//! Operator confirmation before the upload.

use super::ReleaseSummary;
use crate::cli::OutputManager;
use std::collections::VecDeque;
use std::io::{self, BufRead};

/// Source of the operator's go/no-go decision
pub trait ConfirmationPrompt {
    /// Present what is about to be published
    fn show_summary(&mut self, summary: &ReleaseSummary) -> io::Result<()>;

    /// Ask `question` and return the raw answer
    fn read_answer(&mut self, question: &str) -> io::Result<String>;
}

/// Only a single `y`/`Y` confirms; `yes`, `n` and empty input do not.
pub fn is_affirmative(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}

/// Console prompt reading the answer from stdin
pub struct TerminalPrompt {
    output: OutputManager,
}

impl TerminalPrompt {
    /// Prompt writing through `output`
    pub fn new(output: OutputManager) -> Self {
        Self { output }
    }
}

impl ConfirmationPrompt for TerminalPrompt {
    fn show_summary(&mut self, summary: &ReleaseSummary) -> io::Result<()> {
        self.output.section("Changelog")?;
        self.output.println(&summary.changelog)?;
        self.output.section("Release")?;
        let project = match &summary.project_title {
            Some(title) => format!("{} (#{})", title, summary.project_id),
            None => format!("#{}", summary.project_id),
        };
        self.output.field("Project", &project)?;
        self.output.field("Upload file", &summary.archive.display().to_string())?;
        self.output.field("Name release as", &summary.title)?;
        self.output.field("Release type", &summary.release_type.to_string())?;
        self.output.field("Add for versions", &summary.versions.join(", "))
    }

    fn read_answer(&mut self, question: &str) -> io::Result<String> {
        self.output.prompt(&format!("\n{} [y/N]: ", question))?;
        let mut input = String::new();
        io::stdin().lock().read_line(&mut input)?;
        Ok(input)
    }
}

/// Prompt replaying canned answers, for non-interactive drivers and tests
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<String>,
    summaries: Vec<ReleaseSummary>,
    questions: Vec<String>,
}

impl ScriptedPrompt {
    /// Prompt answering with `answers` in order; empty once exhausted
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            summaries: Vec::new(),
            questions: Vec::new(),
        }
    }

    /// Summaries shown so far
    pub fn summaries(&self) -> &[ReleaseSummary] {
        &self.summaries
    }

    /// Questions asked so far
    pub fn questions(&self) -> &[String] {
        &self.questions
    }
}

impl ConfirmationPrompt for ScriptedPrompt {
    fn show_summary(&mut self, summary: &ReleaseSummary) -> io::Result<()> {
        self.summaries.push(summary.clone());
        Ok(())
    }

    fn read_answer(&mut self, question: &str) -> io::Result<String> {
        self.questions.push(question.to_string());
        Ok(self.answers.pop_front().unwrap_or_default())
    }
}
