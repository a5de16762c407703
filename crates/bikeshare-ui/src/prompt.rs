//! Validated line prompts.
//!
//! Each field is resolved by a small state machine: a prompt is shown, the
//! answer is parsed, and an invalid answer prints a corrective message and
//! asks again until a valid answer (or end of input) arrives.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use bikeshare_core::error::BikeshareError;

// ── Prompt texts ──────────────────────────────────────────────────────────────

/// The wording used for one field.
#[derive(Debug, Clone, Copy)]
pub struct Prompt {
    /// Shown the first time.
    pub question: &'static str,
    /// Shown after an invalid answer.
    pub invalid: &'static str,
    /// Shown in place of `question` on every retry.
    pub retry: &'static str,
}

pub const CITY: Prompt = Prompt {
    question: "Enter the name of the city that you'd like to explore: Chicago, New York City, or Washington. ",
    invalid: "\nOops, that doesn't look like one of the three cities.\n",
    retry: "Try entering Chicago, New York City, or Washington.\n",
};

pub const MONTH: Prompt = Prompt {
    question: "Enter the name of the month that you'd like to explore: January - June. Use \"all\" to see the data for all months. ",
    invalid: "\nOops, that doesn't look like the name of a month from January - June.\n",
    retry: "Try entering a month like January, February, etc. Or use \"all\" for all months.\n",
};

pub const DAY: Prompt = Prompt {
    question: "Enter the day of the week that you'd like to explore: Monday - Sunday. Use \"all\" to see the data for all days. ",
    invalid: "\nOops, that doesn't look like the name of a day of the week.\n",
    retry: "Check your spelling and make sure that you're entering a day like Monday, Wednesday, Friday, etc. Or use \"all\" for all days.\n",
};

pub const RAW_DATA: &str = "\nWould you like to see the raw data? Enter yes or no.\n";

pub const RESTART: &str = "\nWould you like to restart? Enter yes or no.\n";

// ── State machine ─────────────────────────────────────────────────────────────

/// Where a field prompt currently stands.
#[derive(Debug, Clone, PartialEq)]
pub enum PromptState<T> {
    /// Waiting for an answer; `retry` selects the retry wording.
    Prompting { retry: bool },
    /// The last answer was rejected.
    Invalid(String),
    /// A valid answer was received.
    Accepted(T),
}

impl<T> PromptState<T>
where
    T: FromStr<Err = BikeshareError>,
{
    /// Transition on one line of input while in `Prompting`.
    pub fn answer(line: &str) -> Self {
        match line.parse::<T>() {
            Ok(value) => PromptState::Accepted(value),
            Err(err) => PromptState::Invalid(err.to_string()),
        }
    }
}

// ── Prompter ──────────────────────────────────────────────────────────────────

/// Reads answers from `input` and writes prompts to `output`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// The writer prompts go to, for printing anything else in between.
    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Ask for a value until a valid one is given.
    ///
    /// Returns `Ok(None)` when input ends before a valid answer.
    pub fn ask<T>(&mut self, prompt: &Prompt) -> io::Result<Option<T>>
    where
        T: FromStr<Err = BikeshareError>,
    {
        let mut state = PromptState::Prompting { retry: false };
        loop {
            state = match state {
                PromptState::Prompting { retry } => {
                    let text = if retry { prompt.retry } else { prompt.question };
                    match self.read_answer(text)? {
                        Some(line) => PromptState::answer(&line),
                        None => return Ok(None),
                    }
                }
                PromptState::Invalid(reason) => {
                    tracing::debug!("rejected answer: {}", reason);
                    self.output.write_all(prompt.invalid.as_bytes())?;
                    PromptState::Prompting { retry: true }
                }
                PromptState::Accepted(value) => {
                    writeln!(self.output)?;
                    return Ok(Some(value));
                }
            };
        }
    }

    /// Ask a yes/no question. Only `yes` (any case) counts as yes; end of
    /// input counts as no.
    pub fn confirm(&mut self, question: &str) -> io::Result<bool> {
        Ok(self
            .read_answer(question)?
            .is_some_and(|answer| answer.trim().eq_ignore_ascii_case("yes")))
    }

    fn read_answer(&mut self, text: &str) -> io::Result<Option<String>> {
        self.output.write_all(text.as_bytes())?;
        self.output.flush()?;

        // Invalid UTF-8 becomes U+FFFD and then fails validation like any typo.
        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&line).trim().to_string()))
    }
}
