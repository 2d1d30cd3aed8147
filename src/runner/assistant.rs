//! The external assistant executable.

use std::path::PathBuf;

use super::{OutputTarget, RunRequest};

/// Executable run when no override is set.
pub const DEFAULT_ASSISTANT: &str = "claude";

/// Lets the assistant act without asking for confirmation.
pub const UNATTENDED_FLAG: &str = "--dangerously-skip-permissions";

/// Shown when the assistant cannot be started.
pub const INSTALL_HINTS: &[&str] = &[
    "npm install -g @anthropic-ai/claude-code",
    "Visit: https://docs.z.ai/devpack/tool/claude",
    "npm install -g @z.ai/claude",
];

/// How to invoke the assistant with a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantCommand {
    program: String,
    prompt_flag: Option<&'static str>,
}

impl AssistantCommand {
    /// Use `program`, or [`DEFAULT_ASSISTANT`] when it is unset or blank.
    pub fn new(program: Option<String>) -> Self {
        let program = program
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| DEFAULT_ASSISTANT.to_string());
        Self {
            program,
            prompt_flag: None,
        }
    }

    /// Pass the prompt after `flag` instead of as a bare argument.
    pub fn with_prompt_flag(mut self, flag: &'static str) -> Self {
        self.prompt_flag = Some(flag);
        self
    }

    /// Program name as configured.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments for one run, prompt last.
    pub fn args(&self, prompt: &str) -> Vec<String> {
        let mut args = vec![UNATTENDED_FLAG.to_string()];
        if let Some(flag) = self.prompt_flag {
            args.push(flag.to_string());
        }
        args.push(prompt.to_string());
        args
    }

    /// Build a run request for `prompt`.
    pub fn request(
        &self,
        prompt: &str,
        working_dir: PathBuf,
        env: Vec<(String, String)>,
        output: OutputTarget,
        temp_files: Vec<PathBuf>,
    ) -> RunRequest {
        let (program, args) = self.platform_invocation(self.args(prompt));
        RunRequest {
            program,
            args,
            working_dir,
            env,
            output,
            temp_files,
        }
    }

    /// Command line shown to the user, prompt elided.
    pub fn display(&self) -> String {
        let mut shown = format!("{} {}", self.program, UNATTENDED_FLAG);
        if let Some(flag) = self.prompt_flag {
            shown.push(' ');
            shown.push_str(flag);
        }
        shown.push_str(" <prompt>");
        shown
    }

    #[cfg(windows)]
    fn platform_invocation(&self, args: Vec<String>) -> (String, Vec<String>) {
        // npm installs the assistant as a .cmd shim
        let mut wrapped = vec!["/C".to_string(), self.program.clone()];
        wrapped.extend(args);
        ("cmd".to_string(), wrapped)
    }

    #[cfg(not(windows))]
    fn platform_invocation(&self, args: Vec<String>) -> (String, Vec<String>) {
        (self.program.clone(), args)
    }
}

impl Default for AssistantCommand {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_program() {
        assert_eq!(AssistantCommand::new(None).program(), "claude");
        assert_eq!(AssistantCommand::new(Some("  ".to_string())).program(), "claude");
        assert_eq!(
            AssistantCommand::new(Some("/opt/bin/claude".to_string())).program(),
            "/opt/bin/claude"
        );
    }

    #[test]
    fn test_args_prompt_last() {
        let args = AssistantCommand::default().args("do the thing");
        assert_eq!(args, vec!["--dangerously-skip-permissions", "do the thing"]);
    }

    #[test]
    fn test_args_with_prompt_flag() {
        let args = AssistantCommand::default()
            .with_prompt_flag("--message")
            .args("fix it");
        assert_eq!(
            args,
            vec!["--dangerously-skip-permissions", "--message", "fix it"]
        );
    }

    #[test]
    fn test_display_elides_prompt() {
        assert_eq!(
            AssistantCommand::default().with_prompt_flag("--message").display(),
            "claude --dangerously-skip-permissions --message <prompt>"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_request_fields() {
        let request = AssistantCommand::default().request(
            "prompt text",
            PathBuf::from("/work/acme_widgets"),
            vec![("ANTHROPIC_API_KEY".to_string(), "sk".to_string())],
            OutputTarget::Terminal,
            vec![PathBuf::from("/work/acme_widgets/.claude-task.md")],
        );
        assert_eq!(request.program, "claude");
        assert_eq!(request.args.last().map(String::as_str), Some("prompt text"));
        assert_eq!(request.working_dir, PathBuf::from("/work/acme_widgets"));
        assert_eq!(request.env.len(), 1);
        assert_eq!(request.temp_files.len(), 1);
    }
}
