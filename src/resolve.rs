//! Input precedence.
//!
//! Task text can come from a flag, a file, an environment variable, or an
//! interactive editor, in that order. Resolution here is pure; callers read
//! the file and environment and hand in what they found.

use std::fmt;

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    /// A command-line flag.
    Flag,
    /// A file named on the command line.
    File,
    /// An environment variable.
    Environment,
    /// Asked interactively.
    Interactive,
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::Flag => write!(f, "flag"),
            InputSource::File => write!(f, "file"),
            InputSource::Environment => write!(f, "environment"),
            InputSource::Interactive => write!(f, "prompt"),
        }
    }
}

/// A value together with its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    /// The value, trailing whitespace removed.
    pub value: String,
    /// Where it came from.
    pub source: InputSource,
}

impl Resolved {
    /// Wrap an interactively collected value.
    pub fn interactive(value: impl Into<String>) -> Self {
        Self {
            value: normalise(value.into()),
            source: InputSource::Interactive,
        }
    }
}

/// Non-interactive candidates for one value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Candidates {
    /// Value of the command-line flag.
    pub flag: Option<String>,
    /// Contents of the file named on the command line.
    pub file: Option<String>,
    /// Value of the environment variable.
    pub env: Option<String>,
}

/// Pick the highest-precedence non-blank candidate: flag > file > environment.
///
/// `None` means the value has to be asked for interactively.
pub fn resolve(candidates: Candidates) -> Option<Resolved> {
    [
        (candidates.flag, InputSource::Flag),
        (candidates.file, InputSource::File),
        (candidates.env, InputSource::Environment),
    ]
    .into_iter()
    .find_map(|(value, source)| {
        value
            .filter(|v| !v.trim().is_empty())
            .map(|v| Resolved {
                value: normalise(v),
                source,
            })
    })
}

/// Decide whether the assistant's output goes to the terminal.
///
/// The flag forces it on; otherwise a recognised environment value decides,
/// and anything else falls back to the program default.
pub fn resolve_show_logs(flag: bool, env: Option<&str>, default: bool) -> bool {
    if flag {
        return true;
    }
    match env.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        Some("true" | "1" | "yes") => true,
        Some("false" | "0" | "no") => false,
        _ => default,
    }
}

fn normalise(value: String) -> String {
    value.trim_end().to_string()
}
