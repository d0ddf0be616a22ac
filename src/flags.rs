use crate::error::ShellError;
use crate::input::{Limits, DEFAULT_MAX_ARGS, DEFAULT_MAX_LINE};
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct Flags {
    flags: HashMap<String, Flag>,
}

#[derive(Debug, Clone)]
pub struct Flag {
    pub short: String,
    pub long: String,
    pub description: String,
    pub takes_value: bool,
    pub value: Option<String>,
}

impl Flag {
    fn switch(short: &str, long: &str, description: &str) -> Self {
        Self {
            short: short.to_string(),
            long: long.to_string(),
            description: description.to_string(),
            takes_value: false,
            value: None,
        }
    }

    fn option(short: &str, long: &str, description: &str) -> Self {
        Self {
            takes_value: true,
            ..Self::switch(short, long, description)
        }
    }
}

impl Default for Flags {
    fn default() -> Self {
        Self::new()
    }
}

impl Flags {
    pub fn new() -> Self {
        let mut flags = HashMap::new();

        flags.insert(
            "help".to_string(),
            Flag::switch("-h", "--help", "Print this help message"),
        );
        flags.insert(
            "version".to_string(),
            Flag::switch("-v", "--version", "Show version information"),
        );
        flags.insert(
            "quiet".to_string(),
            Flag::switch("-q", "--quiet", "Do not print a prompt"),
        );
        flags.insert(
            "debug".to_string(),
            Flag::switch("-d", "--debug", "Enable debug logging"),
        );
        flags.insert(
            "max-line".to_string(),
            Flag::option(
                "-l",
                "--max-line",
                &format!("Longest accepted input line in bytes (default {})", DEFAULT_MAX_LINE),
            ),
        );
        flags.insert(
            "max-args".to_string(),
            Flag::option(
                "-a",
                "--max-args",
                &format!("Most tokens accepted on one line (default {})", DEFAULT_MAX_ARGS),
            ),
        );

        Flags { flags }
    }

    pub fn parse(&mut self, args: &[String]) -> Result<(), ShellError> {
        let mut i = 0;
        while i < args.len() {
            let arg = &args[i];

            let flag = self
                .flags
                .values_mut()
                .find(|flag| arg == &flag.short || arg == &flag.long)
                .ok_or_else(|| ShellError::FlagError(format!("Unknown flag {}", arg)))?;

            if flag.takes_value {
                let value = args
                    .get(i + 1)
                    .ok_or_else(|| ShellError::FlagError(format!("Flag {} requires a value", arg)))?;
                flag.value = Some(value.clone());
                i += 1;
            } else {
                flag.value = Some("true".to_string());
            }
            i += 1;
        }
        Ok(())
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.flags
            .get(name)
            .and_then(|f| f.value.as_ref())
            .is_some()
    }

    pub fn get_value(&self, name: &str) -> Option<&String> {
        self.flags.get(name).and_then(|f| f.value.as_ref())
    }

    fn get_count(&self, name: &str, default: usize) -> Result<usize, ShellError> {
        match self.get_value(name) {
            None => Ok(default),
            Some(raw) => match raw.parse::<usize>() {
                Ok(n) if n > 0 => Ok(n),
                _ => Err(ShellError::FlagError(format!(
                    "--{} expects a positive number, got {}",
                    name, raw
                ))),
            },
        }
    }

    pub fn limits(&self) -> Result<Limits, ShellError> {
        Ok(Limits {
            max_line: self.get_count("max-line", DEFAULT_MAX_LINE)?,
            max_args: self.get_count("max-args", DEFAULT_MAX_ARGS)?,
        })
    }

    pub fn print_help(&self) {
        println!("Usage: hush [OPTIONS]");
        println!("\nOptions:");
        let mut flags: Vec<&Flag> = self.flags.values().collect();
        flags.sort_by(|a, b| a.long.cmp(&b.long));
        for flag in flags {
            let long = if flag.takes_value {
                format!("{} <N>", flag.long)
            } else {
                flag.long.clone()
            };
            println!("  {}, {:<16} {}", flag.short, long, flag.description);
        }
    }
}
