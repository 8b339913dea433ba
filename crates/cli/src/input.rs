//! Line sources for the interactive menu

use std::path::{Path, PathBuf};

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::debug;

/// Something that can answer a prompt with one line of text
pub trait Input {
    /// Show `prompt` and read one line; `None` once input is exhausted
    fn read_line(&mut self, prompt: &str) -> anyhow::Result<Option<String>>;
}

impl<T: Input + ?Sized> Input for &mut T {
    fn read_line(&mut self, prompt: &str) -> anyhow::Result<Option<String>> {
        (**self).read_line(prompt)
    }
}

/// Terminal input through rustyline, with optional persistent history
pub struct LineEditor {
    editor: DefaultEditor,
    history: Option<PathBuf>,
}

impl LineEditor {
    pub fn new(history: Option<PathBuf>) -> anyhow::Result<Self> {
        let mut editor = DefaultEditor::new()?;
        if let Some(path) = history.as_deref().filter(|p| p.exists()) {
            if let Err(err) = editor.load_history(path) {
                debug!(path = %path.display(), %err, "could not load history");
            }
        }
        Ok(Self { editor, history })
    }

    /// Write the history file, if one was configured
    pub fn save_history(&mut self) {
        let Some(path) = self.history.as_deref() else {
            return;
        };
        if let Err(err) = std::fs::create_dir_all(path.parent().unwrap_or(Path::new("."))) {
            debug!(path = %path.display(), %err, "could not create history directory");
        }
        if let Err(err) = self.editor.save_history(path) {
            debug!(path = %path.display(), %err, "could not save history");
        }
    }
}

impl Input for LineEditor {
    fn read_line(&mut self, prompt: &str) -> anyhow::Result<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    if let Err(err) = self.editor.add_history_entry(line.as_str()) {
                        debug!(%err, "could not record history entry");
                    }
                }
                Ok(Some(line))
            }
            // Ctrl+C abandons the current answer only
            Err(ReadlineError::Interrupted) => Ok(Some(String::new())),
            Err(ReadlineError::Eof) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

/// Pre-recorded answers, consumed front to back
#[cfg(test)]
pub struct ScriptedInput {
    lines: std::collections::VecDeque<String>,
}

#[cfg(test)]
impl ScriptedInput {
    pub fn new(lines: &[&str]) -> Self {
        Self {
            lines: lines.iter().map(|l| l.to_string()).collect(),
        }
    }
}

#[cfg(test)]
impl Input for ScriptedInput {
    fn read_line(&mut self, _prompt: &str) -> anyhow::Result<Option<String>> {
        Ok(self.lines.pop_front())
    }
}
