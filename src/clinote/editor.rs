use crate::error::{ClinoteError, Result};
use std::env;
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Lets the user edit a file in place. Blocks until editing is done.
pub trait Editor {
    fn edit(&self, path: &Path) -> Result<()>;
}

impl<F> Editor for F
where
    F: Fn(&Path) -> Result<()>,
{
    fn edit(&self, path: &Path) -> Result<()> {
        self(path)
    }
}

/// Runs the user's editor as a child process.
#[derive(Debug, Clone, Default)]
pub struct SystemEditor {
    command: Option<String>,
}

impl SystemEditor {
    /// `command` takes precedence over the environment when set.
    pub fn new(command: Option<String>) -> Self {
        Self {
            command: command.filter(|c| !c.trim().is_empty()),
        }
    }

    pub fn command(&self) -> Result<String> {
        match &self.command {
            Some(command) => Ok(command.clone()),
            None => get_editor(),
        }
    }
}

impl Editor for SystemEditor {
    fn edit(&self, path: &Path) -> Result<()> {
        let command = self.command()?;
        // The command may carry its own arguments, e.g. "code --wait".
        let mut parts = command.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| ClinoteError::Editor("Editor command is empty".to_string()))?;
        debug!(editor = %command, path = %path.display(), "launching editor");

        let status = Command::new(program)
            .args(parts)
            .arg(path)
            .status()
            .map_err(|e| {
                ClinoteError::Editor(format!("Failed to launch editor '{}': {}", command, e))
            })?;

        if !status.success() {
            return Err(ClinoteError::Editor(format!(
                "Editor '{}' exited with non-zero status",
                command
            )));
        }
        Ok(())
    }
}

/// Gets the editor command from environment.
/// Checks $EDITOR, then $VISUAL, then falls back to common editors.
pub fn get_editor() -> Result<String> {
    for var in ["EDITOR", "VISUAL"] {
        if let Ok(editor) = env::var(var) {
            if !editor.trim().is_empty() {
                return Ok(editor);
            }
        }
    }

    for fallback in &["vim", "vi", "nano"] {
        if Command::new("which")
            .arg(fallback)
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
        {
            return Ok((*fallback).to_string());
        }
    }

    Err(ClinoteError::Editor(
        "No editor found. Set $EDITOR environment variable.".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::path::PathBuf;

    #[test]
    fn test_configured_command_wins() {
        let editor = SystemEditor::new(Some("nano -w".into()));
        assert_eq!(editor.command().unwrap(), "nano -w");
    }

    #[test]
    fn test_blank_command_is_ignored() {
        let editor = SystemEditor::new(Some("   ".into()));
        assert!(editor.command.is_none());
    }

    #[test]
    fn test_closures_are_editors() {
        let seen = RefCell::new(None::<PathBuf>);
        let editor = |path: &Path| -> Result<()> {
            *seen.borrow_mut() = Some(path.to_path_buf());
            Ok(())
        };
        editor.edit(Path::new("/tmp/x.md")).unwrap();
        assert_eq!(seen.into_inner(), Some(PathBuf::from("/tmp/x.md")));
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_editor_is_reported() {
        let editor = SystemEditor::new(Some("false".into()));
        let err = editor.edit(Path::new("/tmp/whatever.md")).unwrap_err();
        assert!(matches!(err, ClinoteError::Editor(_)));
    }
}
