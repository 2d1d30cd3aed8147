//! Interactive prompts.
//!
//! Every question goes through a [`Prompter`], so commands can be driven
//! from a real terminal or from scripted input in tests. Validation
//! failures re-ask the same question; running out of input is an error.

use std::io::{self, BufRead, IsTerminal, Write};
use std::process::Command;

/// Error type for interactive input.
#[derive(Debug, thiserror::Error)]
pub enum InteractError {
    /// Input was closed before an answer was given.
    #[error("Input closed while waiting for: {0}")]
    Closed(String),
    /// Reading or writing the terminal failed.
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] io::Error),
    /// The editor could not be run or exited with an error.
    #[error("Editor failed: {0}")]
    Editor(String),
}

/// What counts as an acceptable answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validation {
    /// Anything, including an empty answer.
    Optional,
    /// Must not be blank.
    NonEmpty,
    /// Must contain the given text.
    Contains {
        /// Required substring.
        needle: &'static str,
        /// Shown when the check fails.
        message: &'static str,
    },
}

impl Validation {
    /// Check an answer, returning the failure message if it is rejected.
    pub fn check(&self, answer: &str) -> Result<(), &'static str> {
        match self {
            Validation::Optional => Ok(()),
            Validation::NonEmpty if answer.trim().is_empty() => Err("A value is required"),
            Validation::NonEmpty => Ok(()),
            Validation::Contains { needle, message } => {
                if answer.contains(needle) {
                    Ok(())
                } else {
                    Err(message)
                }
            }
        }
    }
}

/// One question to ask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// Text shown before the answer.
    pub label: String,
    /// Used when the answer is empty.
    pub default: Option<String>,
    /// Acceptance rule.
    pub validation: Validation,
}

impl Question {
    /// A question that must be answered.
    pub fn required(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            default: None,
            validation: Validation::NonEmpty,
        }
    }

    /// A question that may be left empty.
    pub fn optional(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            default: None,
            validation: Validation::Optional,
        }
    }

    /// Require the answer to contain `needle`.
    pub fn containing(mut self, needle: &'static str, message: &'static str) -> Self {
        self.validation = Validation::Contains { needle, message };
        self
    }

    /// Use `default` for an empty answer.
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    fn prompt_text(&self) -> String {
        match self.default {
            Some(ref default) => format!("{} [{}]: ", self.label, default),
            None => format!("{}: ", self.label),
        }
    }

    /// Apply the default and validate.
    fn accept(&self, raw: &str) -> Result<String, &'static str> {
        let answer = raw.trim();
        let answer = match self.default {
            Some(ref default) if answer.is_empty() => default.as_str(),
            _ => answer,
        };
        self.validation.check(answer)?;
        Ok(answer.to_string())
    }
}

/// Source of interactive answers.
pub trait Prompter {
    /// Ask a question with visible input.
    fn input(&mut self, question: &Question) -> Result<String, InteractError>;

    /// Ask a question without echoing the answer.
    fn secret(&mut self, question: &Question) -> Result<String, InteractError>;

    /// Collect free-form multi-line text.
    fn editor(&mut self, message: &str) -> Result<String, InteractError>;
}

/// Prompts over any line-oriented reader and writer.
///
/// Used for piped stdin and in tests. Secrets are read like any other line.
pub struct LinePrompter<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    /// Wrap a reader and writer.
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Give back the writer, e.g. to inspect what was shown.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn read_line(&mut self, what: &str) -> Result<String, InteractError> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(InteractError::Closed(what.to_string()));
        }
        Ok(line)
    }

    fn ask(&mut self, question: &Question) -> Result<String, InteractError> {
        loop {
            write!(self.writer, "{}", question.prompt_text())?;
            self.writer.flush()?;
            let line = self.read_line(&question.label)?;
            match question.accept(&line) {
                Ok(answer) => return Ok(answer),
                Err(message) => writeln!(self.writer, "\x1b[31m{message}\x1b[0m")?,
            }
        }
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn input(&mut self, question: &Question) -> Result<String, InteractError> {
        self.ask(question)
    }

    fn secret(&mut self, question: &Question) -> Result<String, InteractError> {
        self.ask(question)
    }

    fn editor(&mut self, message: &str) -> Result<String, InteractError> {
        loop {
            write!(self.writer, "{message}: ")?;
            self.writer.flush()?;
            let line = self.read_line(message)?;
            if !line.trim().is_empty() {
                return Ok(line.trim_end().to_string());
            }
            writeln!(self.writer, "\x1b[31mA value is required\x1b[0m")?;
        }
    }
}

/// Prompts on the user's terminal.
///
/// Falls back to plain line reading when stdin is not a terminal.
pub struct TerminalPrompter {
    interactive: bool,
}

impl TerminalPrompter {
    /// Detect whether stdin is attached to a terminal.
    pub fn new() -> Self {
        Self {
            interactive: io::stdin().is_terminal(),
        }
    }

    fn lines(&self) -> LinePrompter<io::StdinLock<'static>, io::Stdout> {
        LinePrompter::new(io::stdin().lock(), io::stdout())
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn input(&mut self, question: &Question) -> Result<String, InteractError> {
        self.lines().input(question)
    }

    fn secret(&mut self, question: &Question) -> Result<String, InteractError> {
        if !self.interactive {
            return self.lines().secret(question);
        }

        let term = console::Term::stdout();
        loop {
            term.write_str(&question.prompt_text())?;
            let line = term.read_secure_line()?;
            match question.accept(&line) {
                Ok(answer) => return Ok(answer),
                Err(message) => term.write_line(&format!("\x1b[31m{message}\x1b[0m"))?,
            }
        }
    }

    fn editor(&mut self, message: &str) -> Result<String, InteractError> {
        if !self.interactive {
            return self.lines().editor(message);
        }

        loop {
            println!("\x1b[2m{message} (opening editor; save and close to continue)\x1b[0m");
            let text = edit_in_editor(message)?;
            if !text.trim().is_empty() {
                return Ok(text.trim_end().to_string());
            }
            println!("\x1b[31mA value is required\x1b[0m");
        }
    }
}

/// The editor to launch: `$VISUAL`, then `$EDITOR`, then `vi`.
pub fn editor_command() -> String {
    ["VISUAL", "EDITOR"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|v| !v.trim().is_empty())
        .unwrap_or_else(|| "vi".to_string())
}

/// Marks the instruction lines written above the user's text.
const HEADER_MARKER: &str = "#|";

/// Open a scratch file in the user's editor and return what they saved.
///
/// Only the instruction lines we wrote are dropped; markdown headings in the
/// user's text are kept.
fn edit_in_editor(message: &str) -> Result<String, InteractError> {
    let mut file = tempfile::Builder::new()
        .prefix("claude-cloud-")
        .suffix(".md")
        .tempfile()?;
    writeln!(file, "{HEADER_MARKER} {message}")?;
    writeln!(file, "{HEADER_MARKER} Lines starting with '{HEADER_MARKER}' are ignored.")?;
    file.flush()?;

    let editor = editor_command();
    // Allow values like "code --wait"
    let mut parts = editor.split_whitespace();
    let program = parts.next().unwrap_or("vi");
    let status = Command::new(program)
        .args(parts)
        .arg(file.path())
        .status()
        .map_err(|e| InteractError::Editor(format!("{editor}: {e}")))?;

    if !status.success() {
        return Err(InteractError::Editor(format!("{editor} exited with {status}")));
    }

    let contents = std::fs::read_to_string(file.path())?;
    Ok(strip_header(&contents))
}

fn strip_header(contents: &str) -> String {
    contents
        .lines()
        .filter(|line| !line.starts_with(HEADER_MARKER))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> LinePrompter<Cursor<Vec<u8>>, Vec<u8>> {
        LinePrompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn shown(prompter: LinePrompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(prompter.into_writer()).unwrap()
    }

    #[test]
    fn test_required_reprompts_on_blank() {
        let mut p = prompter("\n   \noctocat\n");
        let answer = p.input(&Question::required("GitHub username")).unwrap();
        assert_eq!(answer, "octocat");

        let out = shown(p);
        assert_eq!(out.matches("GitHub username: ").count(), 3);
        assert_eq!(out.matches("A value is required").count(), 2);
    }

    #[test]
    fn test_contains_validation() {
        let mut p = prompter("octocat\noctocat@github.com\n");
        let question = Question::required("GitHub email").containing("@", "Please enter a valid email");
        assert_eq!(p.input(&question).unwrap(), "octocat@github.com");
        assert!(shown(p).contains("Please enter a valid email"));
    }

    #[test]
    fn test_default_used_for_empty_answer() {
        let mut p = prompter("\n");
        let question = Question::required("Working directory").with_default("/tmp/temp_repos");
        assert_eq!(p.input(&question).unwrap(), "/tmp/temp_repos");
        assert!(shown(p).contains("Working directory [/tmp/temp_repos]: "));
    }

    #[test]
    fn test_optional_accepts_empty() {
        let mut p = prompter("\n");
        assert_eq!(p.secret(&Question::optional("API key")).unwrap(), "");
    }

    #[test]
    fn test_answers_are_trimmed() {
        let mut p = prompter("  acme  \n");
        assert_eq!(p.input(&Question::required("Organization")).unwrap(), "acme");
    }

    #[test]
    fn test_closed_input_is_an_error() {
        let mut p = prompter("");
        let err = p.input(&Question::required("Repository")).unwrap_err();
        assert!(matches!(err, InteractError::Closed(ref what) if what == "Repository"));

        let mut p = prompter("\n");
        assert!(matches!(
            p.input(&Question::required("Repository")),
            Err(InteractError::Closed(_))
        ));
    }

    #[test]
    fn test_line_editor_reads_one_line() {
        let mut p = prompter("\nfix the parser\nignored\n");
        assert_eq!(p.editor("Describe the issue").unwrap(), "fix the parser");
    }

    #[test]
    fn test_validation_check() {
        assert!(Validation::Optional.check("").is_ok());
        assert!(Validation::NonEmpty.check(" ").is_err());
        let figma = Validation::Contains {
            needle: "figma.com",
            message: "Please enter a valid Figma URL",
        };
        assert!(figma.check("https://www.figma.com/design/x").is_ok());
        assert_eq!(
            figma.check("https://example.com"),
            Err("Please enter a valid Figma URL")
        );
    }

    #[test]
    fn test_strip_header() {
        let text = "#| Describe the issue\n#| Lines starting with '#|' are ignored.\nfix it\n\nplease\n";
        assert_eq!(strip_header(text), "fix it\n\nplease");
    }

    #[test]
    fn test_strip_header_keeps_markdown_headings() {
        let text = "#| Describe the issue\n# Bug\nCrash on start\n\n## Steps\n- run it\n";
        assert_eq!(strip_header(text), "# Bug\nCrash on start\n\n## Steps\n- run it");
    }
}
