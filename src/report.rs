//! Turning operation results into the lines shown to the user

use console::style;

use crate::error::OpError;
use crate::workflow::{LocalRemoval, LocalState, Outcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub level: Level,
    pub text: String,
}

impl Line {
    pub fn new(level: Level, text: impl Into<String>) -> Self {
        Line {
            level,
            text: text.into(),
        }
    }
}

fn success(text: impl Into<String>) -> Line {
    Line::new(Level::Success, text)
}

fn info(text: impl Into<String>) -> Line {
    Line::new(Level::Info, text)
}

fn warning(text: impl Into<String>) -> Line {
    Line::new(Level::Warning, text)
}

fn error(text: impl Into<String>) -> Line {
    Line::new(Level::Error, text)
}

/// Announces a clone; `target` is a repository name or URL
pub fn cloning(target: &str) -> Line {
    info(format!("Cloning {}...", target))
}

pub fn render_outcome(outcome: &Outcome) -> Vec<Line> {
    match outcome {
        Outcome::Created { name, local } => {
            let mut lines = vec![success(format!(
                "Repository '{}' created successfully!",
                name
            ))];
            match local {
                LocalState::Cloned(_) => lines.push(cloning(name)),
                LocalState::CloneFailed(reason) => {
                    lines.push(cloning(name));
                    lines.push(error(format!("Clone failed! {}", reason)));
                }
                LocalState::ExistingFolder { remote_url } => {
                    lines.push(warning("Local folder exists. To link, run:"));
                    lines.push(info(format!("cd {}", name)));
                    lines.push(info(format!("git remote add origin {}", remote_url)));
                    lines.push(info("git push -u origin master"));
                }
            }
            lines
        }
        Outcome::CreationDeclined => vec![error("Repository creation aborted!")],
        Outcome::Deleted { name, local } => {
            let mut lines = vec![success(format!(
                "Repository '{}' deleted successfully!",
                name
            ))];
            match local {
                LocalRemoval::Removed => {
                    lines.push(success(format!("Local folder '{}' deleted!", name)))
                }
                LocalRemoval::NotPresent => {}
                LocalRemoval::NotADirectory => lines.push(warning(format!(
                    "'{}' is not a directory. Skipping local deletion.",
                    name
                ))),
                LocalRemoval::Failed(reason) => {
                    lines.push(error(format!("Error deleting local folder: {}", reason)))
                }
            }
            lines
        }
        Outcome::VisibilityChanged { name, visibility } => vec![success(format!(
            "Repository '{}' is now {}!",
            name, visibility
        ))],
        Outcome::NothingToCommit => vec![info("No changes to commit.")],
        Outcome::Pushed { failures } => {
            let mut lines: Vec<Line> = failures
                .iter()
                .map(|f| error(format!("Error executing command: {}", f)))
                .collect();
            if failures.is_empty() {
                lines.push(success("Changes pushed!"));
            }
            lines
        }
        Outcome::Cloned(_) => vec![],
    }
}

pub fn render_error(err: &OpError) -> Vec<Line> {
    let mut lines = Vec::new();
    if let OpError::CommitFailed {
        staging: Some(e), ..
    } = err
    {
        lines.push(error(format!("Error executing command: {}", e)));
    }

    let text = match err {
        OpError::Remote(e) => format!("GitHub request failed: {}", e),
        OpError::Command(e) => format!("Error executing command: {}", e),
        other => other.to_string(),
    };
    lines.push(error(text));
    lines
}

pub fn render_result(result: &Result<Outcome, OpError>) -> Vec<Line> {
    match result {
        Ok(outcome) => render_outcome(outcome),
        Err(err) => render_error(err),
    }
}

pub fn print_lines(lines: &[Line]) {
    for line in lines {
        let styled = match line.level {
            Level::Success => style(format!("✅ {}", line.text)).green(),
            Level::Info => style(line.text.clone()),
            Level::Warning => style(format!("⚠️  {}", line.text)).yellow(),
            Level::Error => style(format!("❌ {}", line.text)).red(),
        };
        println!("{}", styled);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Visibility;
    use crate::error::{ApiError, CommandError, ValidationError};
    use std::path::PathBuf;

    fn texts(lines: &[Line]) -> Vec<&str> {
        lines.iter().map(|l| l.text.as_str()).collect()
    }

    #[test]
    fn test_visibility_change_reports_state() {
        let lines = render_outcome(&Outcome::VisibilityChanged {
            name: "x".to_string(),
            visibility: Visibility::Public,
        });
        assert_eq!(texts(&lines), vec!["Repository 'x' is now Public!"]);
        assert_eq!(lines[0].level, Level::Success);
    }

    #[test]
    fn test_created_with_existing_folder_prints_link_steps() {
        let lines = render_outcome(&Outcome::Created {
            name: "x".to_string(),
            local: LocalState::ExistingFolder {
                remote_url: "https://github.com/alice/x.git".to_string(),
            },
        });
        assert_eq!(
            texts(&lines),
            vec![
                "Repository 'x' created successfully!",
                "Local folder exists. To link, run:",
                "cd x",
                "git remote add origin https://github.com/alice/x.git",
                "git push -u origin master",
            ]
        );
    }

    #[test]
    fn test_created_and_cloned_announces_clone() {
        let lines = render_outcome(&Outcome::Created {
            name: "x".to_string(),
            local: LocalState::Cloned(PathBuf::from("/tmp/x")),
        });
        assert_eq!(
            texts(&lines),
            vec!["Repository 'x' created successfully!", "Cloning x..."]
        );
    }

    #[test]
    fn test_created_with_failed_clone_announces_then_fails() {
        let lines = render_outcome(&Outcome::Created {
            name: "x".to_string(),
            local: LocalState::CloneFailed("Clone failed!".to_string()),
        });
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].text, "Cloning x...");
        assert_eq!(lines[2].level, Level::Error);
    }

    #[test]
    fn test_deleted_not_a_directory_warns() {
        let lines = render_outcome(&Outcome::Deleted {
            name: "x".to_string(),
            local: LocalRemoval::NotADirectory,
        });
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].level, Level::Warning);
    }

    #[test]
    fn test_push_failures_are_listed() {
        let lines = render_outcome(&Outcome::Pushed {
            failures: vec![CommandError::Failed {
                command: "push".to_string(),
                code: Some(128),
            }],
        });
        assert_eq!(
            texts(&lines),
            vec!["Error executing command: Command `git push` failed with exit status 128"]
        );
    }

    #[test]
    fn test_remote_error_shows_status_and_body() {
        let err = OpError::Remote(ApiError::Status {
            status: 422,
            body: "name already exists on this account".to_string(),
        });
        assert_eq!(
            texts(&render_error(&err)),
            vec!["GitHub request failed: 422 name already exists on this account"]
        );
    }

    #[test]
    fn test_commit_failure_lists_staging_failure_first() {
        let err = OpError::CommitFailed {
            source: CommandError::Failed {
                command: "commit -m Auto commit".to_string(),
                code: Some(1),
            },
            staging: Some(CommandError::Failed {
                command: "add .".to_string(),
                code: Some(128),
            }),
        };
        assert_eq!(
            texts(&render_error(&err)),
            vec![
                "Error executing command: Command `git add .` failed with exit status 128",
                "Commit failed (no changes or other error): Command `git commit -m Auto commit` failed with exit status 1",
            ]
        );
    }

    #[test]
    fn test_validation_error_text() {
        let err = OpError::Validation(ValidationError::LeadingHyphen);
        let lines = render_result(&Err(err));
        assert_eq!(lines[0].level, Level::Error);
        assert_eq!(lines[0].text, "Repository name cannot start with a hyphen.");
    }
}
