//! Line-oriented console prompts
//!
//! Every prompt reads one whole line. `None` means the input stream has
//! ended; callers treat that as the user leaving.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

pub const INVALID_NUMBER: &str = "Please enter a valid number.";

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Print `prompt` (no newline) and read one line, without the line ending.
    pub fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        // invalid UTF-8 becomes U+FFFD rather than an InvalidData error
        let mut raw = Vec::new();
        if self.input.read_until(b'\n', &mut raw)? == 0 {
            return Ok(None);
        }

        let mut line = String::from_utf8_lossy(&raw).into_owned();
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    /// A free-text answer, trimmed. Empty answers are accepted.
    pub fn read_text(&mut self, prompt: &str) -> io::Result<Option<String>> {
        Ok(self.read_line(prompt)?.map(|line| line.trim().to_string()))
    }

    /// Ask until the answer parses as `T` and passes `accept`.
    pub fn read_number_where<T, F>(&mut self, prompt: &str, accept: F) -> io::Result<Option<T>>
    where
        T: FromStr,
        F: Fn(&T) -> bool,
    {
        loop {
            let Some(answer) = self.read_text(prompt)? else {
                return Ok(None);
            };
            match answer.parse::<T>() {
                Ok(value) if accept(&value) => return Ok(Some(value)),
                _ => writeln!(self.output, "{}", INVALID_NUMBER)?,
            }
        }
    }

    pub fn read_id(&mut self, prompt: &str) -> io::Result<Option<i64>> {
        self.read_number_where(prompt, |_: &i64| true)
    }

    /// Salaries must be finite; `NaN` and `inf` parse as f64 but are rejected.
    pub fn read_salary(&mut self, prompt: &str) -> io::Result<Option<f64>> {
        self.read_number_where(prompt, |value: &f64| value.is_finite())
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}
