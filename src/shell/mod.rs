use std::io::{self, IsTerminal, Write};

use crate::{
    core::{
        commands::BuiltinRegistry,
        env::{Environment, SystemEnv},
        executor::CommandExecutor,
    },
    error::ShellError,
    flags::Flags,
    highlight::SyntaxHighlighter,
    input::{CommandLine, EditorSource, LineSource, Limits, ReadOutcome, StreamSource},
    process::SystemLauncher,
};

pub const DEFAULT_PROMPT: &str = "$ ";

/// The read-dispatch loop.
///
/// One line at a time: prompt, read, tokenize, dispatch, wait. Only the `exit`
/// builtin or the end of input stops it.
pub struct Shell {
    source: Box<dyn LineSource>,
    env: Box<dyn Environment>,
    executor: CommandExecutor,
    limits: Limits,
    prompt: String,
    highlighter: SyntaxHighlighter,
}

impl Shell {
    pub fn new(flags: &Flags) -> Result<Self, ShellError> {
        let source: Box<dyn LineSource> = if io::stdin().is_terminal() {
            Box::new(EditorSource::new()?)
        } else {
            Box::new(StreamSource::new(io::stdin().lock()))
        };

        let highlighter = if io::stderr().is_terminal() {
            SyntaxHighlighter::new()
        } else {
            SyntaxHighlighter::plain()
        };

        let executor = CommandExecutor::new(BuiltinRegistry::new(), Box::new(SystemLauncher::new()))
            .with_highlighter(highlighter);

        let mut shell = Self::with_parts(
            source,
            Box::new(SystemEnv::new()?),
            executor,
            flags.limits()?,
        );
        shell.highlighter = highlighter;
        if flags.is_set("quiet") {
            shell.prompt.clear();
        }
        Ok(shell)
    }

    pub fn with_parts(
        source: Box<dyn LineSource>,
        env: Box<dyn Environment>,
        executor: CommandExecutor,
        limits: Limits,
    ) -> Self {
        Self {
            source,
            env,
            executor,
            limits,
            prompt: DEFAULT_PROMPT.to_string(),
            highlighter: SyntaxHighlighter::plain(),
        }
    }

    #[cfg(test)]
    pub fn env(&self) -> &dyn Environment {
        self.env.as_ref()
    }

    pub fn run(&mut self) -> Result<(), ShellError> {
        self.run_with(&mut io::stdout(), &mut io::stderr())
    }

    pub fn run_with(&mut self, out: &mut dyn Write, err: &mut dyn Write) -> Result<(), ShellError> {
        loop {
            let line = match self.source.read_line(&self.prompt, out) {
                Ok(ReadOutcome::Line(line)) => line,
                Ok(ReadOutcome::Interrupted) => continue,
                Ok(ReadOutcome::Eof) => break,
                Err(e) => {
                    // An unreadable input is as final as a closed one
                    self.report(err, &e.to_string());
                    break;
                }
            };

            let command = match CommandLine::parse(&line, &self.limits) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(e) => {
                    self.report(err, &e.to_string());
                    continue;
                }
            };

            let signal = self
                .executor
                .execute(&command, self.env.as_mut(), out, err);
            if signal.is_terminate() {
                log::debug!("exit requested");
                break;
            }
        }

        out.flush()?;
        Ok(())
    }

    fn report(&self, err: &mut dyn Write, message: &str) {
        let message = self.highlighter.highlight_error(&format!("hush: {}", message));
        if let Err(e) = writeln!(err, "{}", message) {
            log::warn!("failed to write diagnostic: {}", e);
        }
    }
}
