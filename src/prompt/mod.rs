//! Prompt generation with templates.
//!
//! Builds the instruction text handed to the assistant. Rendering is pure:
//! the same request always produces the same text.

pub mod template;

use std::path::Path;
use tera::{Context, Tera};

use crate::figma::FigmaTarget;
use crate::repo::RepoTarget;

pub use template::{CONTRIBUTE_TEMPLATE, CONVERT_TEMPLATE, DESIGN_TEMPLATE};

/// Error type for prompt generation operations.
#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    /// Tera rejected the template or the context.
    #[error("Template rendering failed: {0}")]
    TemplateError(#[from] tera::Error),
}

/// Who the assistant should attribute its work to.
#[derive(Debug, Clone, Copy)]
pub struct Author<'a> {
    /// GitHub username.
    pub username: &'a str,
    /// GitHub email.
    pub email: &'a str,
}

/// Everything a prompt can be built from.
#[derive(Debug, Clone, Copy)]
pub enum TaskPrompt<'a> {
    /// Work on an issue in a GitHub repository.
    Contribute {
        /// Repository being worked on.
        target: &'a RepoTarget,
        /// Raw task text.
        task: &'a str,
        /// Attribution.
        author: Author<'a>,
    },
    /// Work on a Figma design.
    Design {
        /// Design file and node.
        design: &'a FigmaTarget,
        /// Raw task text.
        task: &'a str,
    },
    /// Convert a Figma design into code in a repository.
    Convert {
        /// Repository being worked on.
        target: &'a RepoTarget,
        /// Local clone.
        repo_path: &'a Path,
        /// Branch the work goes on.
        branch: &'a str,
        /// Design file and node.
        design: &'a FigmaTarget,
        /// Raw task text.
        task: &'a str,
        /// Attribution.
        author: Author<'a>,
    },
}

impl TaskPrompt<'_> {
    fn template(&self) -> (&'static str, &'static str) {
        match self {
            TaskPrompt::Contribute { .. } => ("contribute", CONTRIBUTE_TEMPLATE),
            TaskPrompt::Design { .. } => ("design", DESIGN_TEMPLATE),
            TaskPrompt::Convert { .. } => ("convert", CONVERT_TEMPLATE),
        }
    }

    fn context(&self) -> Context {
        let mut context = Context::new();
        match *self {
            TaskPrompt::Contribute {
                target,
                task,
                author,
            } => {
                context.insert("repository", &target.to_string());
                context.insert("task", task);
                context.insert("username", author.username);
                context.insert("email", author.email);
            }
            TaskPrompt::Design { design, task } => {
                context.insert("file_url", &design.url);
                context.insert("node_id", &design.node_id);
                context.insert("task", task);
            }
            TaskPrompt::Convert {
                target,
                repo_path,
                branch,
                design,
                task,
                author,
            } => {
                context.insert("repository", &target.to_string());
                context.insert("repo_path", &repo_path.display().to_string());
                context.insert("branch", branch);
                context.insert("username", author.username);
                context.insert("email", author.email);
                context.insert("file_url", &design.url);
                context.insert("node_id", &design.node_id);
                context.insert("task", task);
            }
        }
        context
    }
}

/// Render the prompt for a task.
pub fn build_prompt(request: &TaskPrompt<'_>) -> Result<String, PromptError> {
    let (name, template) = request.template();

    let mut tera = Tera::default();
    tera.add_raw_template(name, template)?;

    Ok(tera.render(name, &request.context())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const AUTHOR: Author<'static> = Author {
        username: "octocat",
        email: "octocat@github.com",
    };

    fn design(node: Option<&str>) -> FigmaTarget {
        FigmaTarget {
            url: "https://www.figma.com/design/AbC123/Landing".to_string(),
            node_id: node.map(str::to_string),
        }
    }

    #[test]
    fn test_contribute_prompt_contains_repo_and_task() {
        let target = RepoTarget::new("acme", "widgets");
        let prompt = build_prompt(&TaskPrompt::Contribute {
            target: &target,
            task: "fix null pointer in parser",
            author: AUTHOR,
        })
        .unwrap();

        assert!(prompt.contains("acme/widgets"));
        assert!(prompt.contains("fix null pointer in parser"));
        assert!(prompt.contains("The PR should be created under the name: octocat"));
        assert!(prompt.contains("octocat <octocat@github.com>"));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let target = RepoTarget::new("acme", "widgets");
        let request = TaskPrompt::Contribute {
            target: &target,
            task: "do it",
            author: AUTHOR,
        };

        assert_eq!(build_prompt(&request).unwrap(), build_prompt(&request).unwrap());
    }

    #[test]
    fn test_task_text_is_not_escaped_or_interpreted() {
        let target = RepoTarget::new("acme", "widgets");
        let task = "Handle <b>bold</b> & {{ braces }} {% raw %}";
        let prompt = build_prompt(&TaskPrompt::Contribute {
            target: &target,
            task,
            author: AUTHOR,
        })
        .unwrap();

        assert!(prompt.contains(task));
    }

    #[test]
    fn test_design_prompt_with_node() {
        let design = design(Some("12:34"));
        let prompt = build_prompt(&TaskPrompt::Design {
            design: &design,
            task: "Make the hero bigger",
        })
        .unwrap();

        assert!(prompt.contains("Figma File URL: https://www.figma.com/design/AbC123/Landing"));
        assert!(prompt.contains("Specific Node ID: 12:34"));
        assert!(!prompt.contains("No specific node ID"));
        assert!(prompt.contains("Design Task:\nMake the hero bigger"));
    }

    #[test]
    fn test_design_prompt_without_node() {
        let design = design(None);
        let prompt = build_prompt(&TaskPrompt::Design {
            design: &design,
            task: "Tidy layers",
        })
        .unwrap();

        assert!(prompt.contains(
            "No specific node ID - work with the entire file or main frames"
        ));
        assert!(!prompt.contains("Specific Node ID:"));
    }

    #[test]
    fn test_convert_prompt_contents() {
        let target = RepoTarget::new("acme", "web");
        let design = design(None);
        let prompt = build_prompt(&TaskPrompt::Convert {
            target: &target,
            repo_path: Path::new("/work/acme_web"),
            branch: "figma-conversion-1700000000000",
            design: &design,
            task: "Build the pricing page",
            author: AUTHOR,
        })
        .unwrap();

        assert!(prompt.contains("Target Repository: acme/web"));
        assert!(prompt.contains("Repository Path: /work/acme_web"));
        assert!(prompt.contains("Git Branch: figma-conversion-1700000000000"));
        assert!(prompt.contains("Your GitHub Email: octocat@github.com"));
        assert!(prompt.contains("Include your git id (octocat) in the commit"));
        assert!(prompt.contains("feat: convert [design name] from Figma to code"));
        assert!(prompt.contains("Conversion Task:\nBuild the pricing page"));
    }
}
