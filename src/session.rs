use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::{cache::ExpressionCache, util::num::format_result};

/// One line of interactive input, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<'a> {
    /// `exit` or `quit`.
    Quit,
    /// `stats`: print the cache statistics.
    Stats,
    /// `clear`: empty the cache.
    Clear,
    /// `cache`: list the cached expressions.
    Entries,
    /// `reset`: zero the hit and miss counters.
    Reset,
    /// `help`: list the commands.
    Help,
    /// A blank line.
    Empty,
    /// Anything else is an expression.
    Evaluate(&'a str),
}

impl<'a> Command<'a> {
    /// Classifies a line. Commands are case-insensitive and may be
    /// surrounded by whitespace.
    ///
    /// # Example
    /// ```
    /// use memocalc::session::Command;
    ///
    /// assert_eq!(Command::parse("  QUIT "), Command::Quit);
    /// assert_eq!(Command::parse("1 + 2"), Command::Evaluate("1 + 2"));
    /// assert_eq!(Command::parse("   "), Command::Empty);
    /// ```
    #[must_use]
    pub fn parse(line: &'a str) -> Self {
        let trimmed = line.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "" => Self::Empty,
            "exit" | "quit" => Self::Quit,
            "stats" => Self::Stats,
            "clear" => Self::Clear,
            "cache" => Self::Entries,
            "reset" => Self::Reset,
            "help" => Self::Help,
            _ => Self::Evaluate(trimmed),
        }
    }
}

const HELP: &str = "\
Supported: numbers, + - * /, parentheses and prefix signs. Example: 2 + 3 * 4
Commands: stats, clear, cache, reset, help, exit";

/// Interactive read-evaluate-print loop over any reader and writer.
///
/// Results go to the writer as `Result: <value>`; errors as
/// `<Kind>: <message>`. An error never ends the session.
pub struct Session<'c, R, W> {
    cache:     &'c ExpressionCache,
    input:     R,
    output:    W,
    prompt:    bool,
    precision: Option<usize>,
}

impl<'c, R: BufRead, W: Write> Session<'c, R, W> {
    /// Creates a session printing a `>>> ` prompt before each line.
    pub const fn new(cache: &'c ExpressionCache, input: R, output: W) -> Self {
        Self { cache,
               input,
               output,
               prompt: true,
               precision: None }
    }

    /// Disables the prompt, e.g. when input is piped.
    #[must_use]
    pub const fn without_prompt(mut self) -> Self {
        self.prompt = false;
        self
    }

    /// Rounds displayed results to `digits` decimals.
    #[must_use]
    pub const fn with_precision(mut self, digits: Option<usize>) -> Self {
        self.precision = digits;
        self
    }

    /// Runs until `exit`/`quit` or end of input.
    ///
    /// # Errors
    /// Only I/O errors on the reader or writer end the loop early.
    ///
    /// # Example
    /// ```
    /// use memocalc::{cache::ExpressionCache, session::Session};
    ///
    /// let cache = ExpressionCache::new();
    /// let mut output = Vec::new();
    /// Session::new(&cache, "2*(3+4)\nquit\n".as_bytes(), &mut output).without_prompt()
    ///                                                                .run()
    ///                                                                .unwrap();
    ///
    /// assert_eq!(String::from_utf8(output).unwrap(), "Result: 14\n");
    /// ```
    pub fn run(mut self) -> io::Result<()> {
        let mut line = String::new();
        loop {
            if self.prompt {
                write!(self.output, ">>> ")?;
                self.output.flush()?;
            }

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                break;
            }

            if !self.handle(Command::parse(&line))? {
                break;
            }
        }
        Ok(())
    }

    /// Executes one command. Returns `false` when the session should end.
    fn handle(&mut self, command: Command<'_>) -> io::Result<bool> {
        debug!(?command, "session command");
        match command {
            Command::Quit => return Ok(false),
            Command::Empty => {},
            Command::Help => writeln!(self.output, "{HELP}")?,
            Command::Stats => writeln!(self.output, "{}", self.cache.stats())?,
            Command::Clear => {
                self.cache.clear();
                writeln!(self.output, "Cache cleared")?;
            },
            Command::Reset => {
                self.cache.reset_stats();
                writeln!(self.output, "Statistics reset")?;
            },
            Command::Entries => {
                let entries = self.cache.cached_expressions();
                writeln!(self.output, "Cache size: {} entries", entries.len())?;
                for (expression, value) in entries {
                    writeln!(self.output,
                             "  {expression} = {}",
                             format_result(value, self.precision))?;
                }
            },
            Command::Evaluate(expression) => match self.cache.evaluate(expression) {
                Ok(value) => {
                    writeln!(self.output, "Result: {}", format_result(value, self.precision))?;
                },
                Err(e) => writeln!(self.output, "{}: {e}", e.kind())?,
            },
        }
        Ok(true)
    }
}
