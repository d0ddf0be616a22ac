use std::fmt;

pub const DEFAULT_MAX_LINE: usize = 255;
pub const DEFAULT_MAX_ARGS: usize = 15;

const DELIMITERS: [char; 3] = [' ', '\t', '\n'];

/// Bounds on a single input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Bytes, not counting the line terminator.
    pub max_line: usize,
    /// Tokens, command name included.
    pub max_args: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_line: DEFAULT_MAX_LINE,
            max_args: DEFAULT_MAX_ARGS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    LineTooLong { limit: usize },
    TooManyArguments { limit: usize },
    Empty,
    EmptyToken,
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::LineTooLong { limit } => {
                write!(f, "input line too long (max {} bytes)", limit)
            }
            InputError::TooManyArguments { limit } => {
                write!(f, "too many arguments (max {})", limit)
            }
            InputError::Empty => write!(f, "empty command"),
            InputError::EmptyToken => write!(f, "empty token"),
        }
    }
}

impl std::error::Error for InputError {}

/// A command name followed by its arguments. Never empty, no empty tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    tokens: Vec<String>,
}

impl CommandLine {
    pub fn from_tokens(tokens: Vec<String>) -> Result<Self, InputError> {
        if tokens.is_empty() {
            return Err(InputError::Empty);
        }
        if tokens.iter().any(String::is_empty) {
            return Err(InputError::EmptyToken);
        }
        Ok(Self { tokens })
    }

    /// Splits one line on spaces, tabs and newlines.
    ///
    /// Returns `Ok(None)` for a blank line. Lines over the limits are rejected
    /// whole rather than truncated.
    pub fn parse(line: &str, limits: &Limits) -> Result<Option<Self>, InputError> {
        let line = line
            .strip_suffix('\n')
            .map(|l| l.strip_suffix('\r').unwrap_or(l))
            .unwrap_or(line);
        if line.len() > limits.max_line {
            return Err(InputError::LineTooLong {
                limit: limits.max_line,
            });
        }

        let tokens: Vec<String> = line
            .split(DELIMITERS)
            .filter(|token| !token.is_empty())
            .map(String::from)
            .collect();

        if tokens.is_empty() {
            return Ok(None);
        }
        if tokens.len() > limits.max_args {
            return Err(InputError::TooManyArguments {
                limit: limits.max_args,
            });
        }

        Ok(Some(Self { tokens }))
    }

    pub fn name(&self) -> &str {
        &self.tokens[0]
    }

    #[cfg(test)]
    pub fn args(&self) -> &[String] {
        &self.tokens[1..]
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}
