use std::{
    fmt,
    io::{BufRead, Stdin, StdinLock, Stdout, Write},
};

use crate::error::ConsoleError;

/// A line oriented terminal: prompts go to `output`, replies come from `input`.
pub struct Console<R, W> {
    input: R,
    output: W,
}

/// A console bound to the process standard input and output.
pub type StdConsole = Console<StdinLock<'static>, Stdout>;

/// Create a console over the locked standard input and the standard output.
pub fn stdio() -> StdConsole {
    let stdin: Stdin = std::io::stdin();
    Console::new(stdin.lock(), std::io::stdout())
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Create a console from an input reader and an output writer.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Write a message followed by a newline.
    pub fn say(&mut self, message: impl fmt::Display) -> Result<(), ConsoleError> {
        writeln!(self.output, "{message}")?;
        Ok(())
    }

    /// Show `prompt` and read one line of input, without its line terminator.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::InputClosed`] once the input is exhausted.
    pub fn prompt_line(&mut self, prompt: &str) -> Result<String, ConsoleError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ConsoleError::InputClosed);
        }
        Ok(line.trim_end_matches(['\n', '\r']).to_string())
    }

    /// Show `prompt` and read a single key typed on its own line.
    ///
    /// Surrounding blanks are ignored. A blank line or a line holding more
    /// than one character reads as `None`.
    pub fn read_key(&mut self, prompt: &str) -> Result<Option<char>, ConsoleError> {
        let line = self.prompt_line(prompt)?;
        let mut chars = line.trim().chars();
        Ok(match (chars.next(), chars.next()) {
            (Some(key), None) => Some(key),
            _ => None,
        })
    }

    /// The output writer.
    pub fn output(&self) -> &W {
        &self.output
    }
}
