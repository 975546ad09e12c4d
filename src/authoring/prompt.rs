use std::io::{BufRead, Write};
use std::ops::RangeInclusive;

use crate::foundation::error::{StoryError, StoryResult};

/// Line-oriented question/answer loop over any reader/writer pair.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

fn io_error(e: std::io::Error) -> StoryError {
    StoryError::Other(anyhow::Error::new(e).context("terminal I/O"))
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Wrap `input` and `output`.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Give back the writer, e.g. to inspect a transcript.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Print a line without asking anything.
    pub fn say(&mut self, text: &str) -> StoryResult<()> {
        writeln!(self.output, "{text}").map_err(io_error)
    }

    /// Ask and return the trimmed answer. End of input is an error.
    pub fn ask(&mut self, prompt: &str) -> StoryResult<String> {
        write!(self.output, "{prompt}").map_err(io_error)?;
        self.output.flush().map_err(io_error)?;
        let mut line = String::new();
        let n = self.input.read_line(&mut line).map_err(io_error)?;
        if n == 0 {
            return Err(StoryError::configuration(format!(
                "input ended while waiting for: {}",
                prompt.trim().trim_end_matches(':')
            )));
        }
        Ok(line.trim().to_owned())
    }

    /// Ask for a non-empty answer, re-prompting on blank input.
    pub fn ask_required(&mut self, prompt: &str) -> StoryResult<String> {
        loop {
            let answer = self.ask(prompt)?;
            if !answer.is_empty() {
                return Ok(answer);
            }
            self.say("  Please enter a value.")?;
        }
    }

    /// Ask for an integer in `range`; blank input yields `default` when one is given.
    pub fn ask_number(
        &mut self,
        prompt: &str,
        range: RangeInclusive<u64>,
        default: Option<u64>,
    ) -> StoryResult<u64> {
        loop {
            let answer = self.ask(prompt)?;
            if answer.is_empty()
                && let Some(d) = default
            {
                return Ok(d);
            }
            match answer.parse::<u64>() {
                Ok(n) if range.contains(&n) => return Ok(n),
                _ => self.say(&format!(
                    "  Please enter a number from {} to {}.",
                    range.start(),
                    range.end()
                ))?,
            }
        }
    }

    /// List `items` numbered from 1 and return the chosen index.
    pub fn ask_choice<T: AsRef<str>>(&mut self, prompt: &str, items: &[T]) -> StoryResult<usize> {
        if items.is_empty() {
            return Err(StoryError::configuration("nothing to choose from"));
        }
        for (i, item) in items.iter().enumerate() {
            self.say(&format!("    {}. {}", i + 1, item.as_ref()))?;
        }
        let n = self.ask_number(prompt, 1..=items.len() as u64, None)?;
        Ok(n as usize - 1)
    }

    /// Ask until `parse` accepts the answer.
    pub fn ask_parsed<T>(
        &mut self,
        prompt: &str,
        hint: &str,
        parse: impl Fn(&str) -> Option<T>,
    ) -> StoryResult<T> {
        loop {
            let answer = self.ask(prompt)?;
            if let Some(v) = parse(&answer) {
                return Ok(v);
            }
            self.say(&format!("  {hint}"))?;
        }
    }
}
