use console::style;
use dialoguer::Input;

use crate::error::PromptError;
#[cfg(any(test, feature = "test-support"))]
use std::{collections::VecDeque, io};

/// Line-oriented question/answer channel to the user
pub trait Prompter {
    fn ask(&mut self, prompt: &str) -> Result<String, PromptError>;

    /// Only an explicit `yes` counts as confirmation
    fn confirm(&mut self, prompt: &str) -> Result<bool, PromptError> {
        let answer = self.ask(&format!("{} (yes/no)", prompt))?;
        Ok(is_yes(&answer))
    }

    /// Side note shown while an interactive step is in progress
    fn tell(&mut self, message: &str);
}

pub fn is_yes(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("yes")
}

/// Prompts on the controlling terminal
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn ask(&mut self, prompt: &str) -> Result<String, PromptError> {
        let answer: String = Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        Ok(answer)
    }

    fn tell(&mut self, message: &str) {
        println!("{}", style(message).green());
    }
}

#[cfg(any(test, feature = "test-support"))]
/// Replays canned answers in order; runs dry with an `UnexpectedEof` error.
/// Lets operations run without a terminal.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    asked: Vec<String>,
    told: Vec<String>,
}

#[cfg(any(test, feature = "test-support"))]
impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedPrompter {
            answers: answers.into_iter().map(Into::into).collect(),
            asked: Vec::new(),
            told: Vec::new(),
        }
    }

    /// Prompts shown so far
    pub fn asked(&self) -> &[String] {
        &self.asked
    }

    pub fn told(&self) -> &[String] {
        &self.told
    }
}

#[cfg(any(test, feature = "test-support"))]
impl Prompter for ScriptedPrompter {
    fn ask(&mut self, prompt: &str) -> Result<String, PromptError> {
        self.asked.push(prompt.to_string());
        self.answers.pop_front().ok_or_else(|| {
            PromptError(dialoguer::Error::IO(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "no scripted answer left",
            )))
        })
    }

    fn tell(&mut self, message: &str) {
        self.told.push(message.to_string());
    }
}
