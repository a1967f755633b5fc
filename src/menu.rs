//! The numbered main menu
//!
//! Creating and cloning are hidden while the program runs inside a working
//! copy. That is decided once at startup; the only actions that move to
//! another directory also end the program.

use console::style;
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::api::Visibility;
use crate::error::PromptError;
use crate::report::{cloning, render_result, Level, Line};
use crate::util::is_yes;
use crate::workflow::Workflow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Create,
    Delete,
    Visibility,
    Push,
    ClonePublic,
    Exit,
}

impl MenuItem {
    const ALL: [MenuItem; 6] = [
        MenuItem::Create,
        MenuItem::Delete,
        MenuItem::Visibility,
        MenuItem::Push,
        MenuItem::ClonePublic,
        MenuItem::Exit,
    ];

    pub fn key(self) -> &'static str {
        match self {
            MenuItem::Create => "1",
            MenuItem::Delete => "2",
            MenuItem::Visibility => "3",
            MenuItem::Push => "4",
            MenuItem::ClonePublic => "5",
            MenuItem::Exit => "6",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuItem::Create => "Create Repository",
            MenuItem::Delete => "Delete Repository",
            MenuItem::Visibility => "Make Repository Private/Public",
            MenuItem::Push => "Push to Repository",
            MenuItem::ClonePublic => "Clone Public Repository",
            MenuItem::Exit => "Exit",
        }
    }

    fn needs_outside_repo(self) -> bool {
        matches!(self, MenuItem::Create | MenuItem::ClonePublic)
    }
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.key(), self.label())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Menu {
    inside_repo: bool,
}

impl Menu {
    pub fn new(inside_repo: bool) -> Self {
        Menu { inside_repo }
    }

    /// Options in display order, creation and public clone first
    pub fn items(&self) -> Vec<MenuItem> {
        let mut items: Vec<MenuItem> = MenuItem::ALL
            .iter()
            .copied()
            .filter(|item| !(self.inside_repo && item.needs_outside_repo()))
            .collect();
        // Keep the two outside-only entries together at the top
        items.sort_by_key(|item| !item.needs_outside_repo());
        items
    }

    /// Exact match on the option number; hidden options do not match
    pub fn parse(&self, input: &str) -> Option<MenuItem> {
        self.items().into_iter().find(|item| item.key() == input)
    }
}

/// Why the menu loop stopped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exit {
    Quit,
    /// An operation produced a folder the user should continue in
    EnterDirectory(PathBuf),
}

fn listing(menu: &Menu) -> Vec<Line> {
    let mut lines = vec![Line::new(Level::Info, "\nChoose an option:")];
    lines.extend(
        menu.items()
            .into_iter()
            .map(|item| Line::new(Level::Info, format!("  {}", item))),
    );
    lines
}

/// Show the menu, run the chosen operation, repeat. Every line meant for the
/// user goes through `show`. Fails only when input can no longer be read.
pub async fn run_menu<F>(
    menu: Menu,
    workflow: &mut Workflow<'_>,
    mut show: F,
) -> Result<Exit, PromptError>
where
    F: FnMut(&[Line]),
{
    loop {
        show(&listing(&menu));
        let choice = workflow.ask("Enter choice")?;

        let result = match menu.parse(&choice) {
            None => {
                show(&[Line::new(Level::Error, "Invalid or hidden option!")]);
                continue;
            }
            Some(MenuItem::Exit) => {
                show(&[Line::new(Level::Info, "Exiting...!")]);
                return Ok(Exit::Quit);
            }
            Some(MenuItem::Create) => {
                let name = workflow.ask("Enter repository name")?;
                let private = is_yes(&workflow.ask("Private repo? (yes/no)")?);
                workflow
                    .create(name.trim(), Visibility::from_private(private))
                    .await
            }
            Some(MenuItem::Delete) => {
                let name = workflow.ask("Enter repository name to delete")?;
                workflow.delete(name.trim()).await
            }
            Some(MenuItem::Visibility) => {
                let name = workflow.ask("Enter repository name")?;
                let private = is_yes(&workflow.ask("Make Private? (yes/no)")?);
                workflow
                    .set_visibility(name.trim(), Visibility::from_private(private))
                    .await
            }
            Some(MenuItem::Push) => workflow.push(),
            Some(MenuItem::ClonePublic) => {
                let url = workflow.ask("Enter public Git repository URL")?;
                if !url.trim().is_empty() {
                    show(&[cloning(url.trim())]);
                }
                workflow.clone_url(&url)
            }
        };

        show(&render_result(&result));

        if let Some(dir) = result.as_ref().ok().and_then(|o| o.enter_directory()) {
            return Ok(Exit::EnterDirectory(dir.to_path_buf()));
        }
    }
}

/// Move the process into `dir` after the menu stopped there. A failure is
/// reported like any other and the program still ends normally.
pub fn enter_directory(dir: &Path) -> Vec<Line> {
    if let Err(e) = env::set_current_dir(dir) {
        return vec![Line::new(
            Level::Error,
            format!("Could not enter '{}': {}", dir.display(), e),
        )];
    }

    let name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    vec![
        Line::new(
            Level::Info,
            format!("📂 Entered into '{}'", style(name).bold()),
        ),
        Line::new(
            Level::Info,
            format!("Run `cd {}` to continue working there.", dir.display()),
        ),
        Line::new(Level::Info, "👋 Exiting..."),
    ]
}
