//! File pickers used by the host for exports and imports.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::HostError;


/// A named group of accepted extensions. `"*"` accepts anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileFilter {
    pub name: &'static str,
    pub extensions: &'static [&'static str],
}


/// Filters offered when picking a backup to import.
pub const IMPORT_FILTERS: &[FileFilter] = &[
    FileFilter { name: "JSON", extensions: &["json"] },
    FileFilter { name: "All files", extensions: &["*"] },
];


/// Chooses paths on behalf of the user. `None` means the dialog was dismissed.
pub trait FileDialog: Send + Sync {
    fn pick_save_path(&self, default_name: &str) -> Result<Option<PathBuf>, HostError>;

    fn pick_open_path(&self, filters: &[FileFilter]) -> Result<Option<PathBuf>, HostError>;
}


/// Answers with paths fixed up front, e.g. from command-line arguments.
#[derive(Debug, Clone, Default)]
pub struct PresetDialog {
    save: Option<PathBuf>,
    open: Option<PathBuf>,
}


impl PresetDialog {
    pub fn new(save: Option<PathBuf>, open: Option<PathBuf>) -> Self {
        Self { save, open }
    }

    /// A dialog that is always dismissed.
    pub fn cancelled() -> Self {
        Self::default()
    }
}


impl FileDialog for PresetDialog {
    fn pick_save_path(&self, default_name: &str) -> Result<Option<PathBuf>, HostError> {
        Ok(self.save.as_ref().map(|path| resolve_save_path(path, default_name)))
    }

    fn pick_open_path(&self, _filters: &[FileFilter]) -> Result<Option<PathBuf>, HostError> {
        Ok(self.open.clone())
    }
}


/// Asks on the terminal.
///
/// Saving: Enter accepts the suggested name in `base_dir`, `q` cancels.
/// Opening: Enter or `q` cancels. End of input always cancels.
pub struct PromptDialog {
    input: Mutex<Box<dyn BufRead + Send>>,
    base_dir: PathBuf,
}


impl PromptDialog {
    pub fn stdin(base_dir: PathBuf) -> Self {
        Self::from_reader(std::io::BufReader::new(std::io::stdin()), base_dir)
    }

    pub fn from_reader(reader: impl BufRead + Send + 'static, base_dir: PathBuf) -> Self {
        Self {
            input: Mutex::new(Box::new(reader)),
            base_dir,
        }
    }

    fn ask(&self, prompt: &str) -> Result<Option<String>, HostError> {
        eprint!("{prompt}");
        std::io::stderr().flush().map_err(|e| HostError::Dialog(e.to_string()))?;

        let mut input = self
            .input
            .lock()
            .map_err(|_| HostError::Dialog("terminal input is unavailable".to_string()))?;

        let mut line = String::new();
        let read = input
            .read_line(&mut line)
            .map_err(|e| HostError::Dialog(e.to_string()))?;

        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}


impl FileDialog for PromptDialog {
    fn pick_save_path(&self, default_name: &str) -> Result<Option<PathBuf>, HostError> {
        let prompt = format!("Save backup as [{default_name}] (q to cancel): ");
        let answer = match self.ask(&prompt)? {
            None => return Ok(None),
            Some(answer) => answer,
        };

        match answer.as_str() {
            "q" => Ok(None),
            "" => Ok(Some(self.base_dir.join(default_name))),
            path => Ok(Some(resolve_save_path(&self.base_dir.join(path), default_name))),
        }
    }

    fn pick_open_path(&self, filters: &[FileFilter]) -> Result<Option<PathBuf>, HostError> {
        let accepted: Vec<String> = filters
            .iter()
            .map(|f| format!("{} ({})", f.name, f.extensions.join(", ")))
            .collect();
        let prompt = format!("Backup file to import [{}] (empty to cancel): ", accepted.join("; "));

        match self.ask(&prompt)? {
            None => Ok(None),
            Some(answer) if answer.is_empty() || answer == "q" => Ok(None),
            Some(answer) => Ok(Some(self.base_dir.join(answer))),
        }
    }
}


/// A directory target receives the suggested file name.
fn resolve_save_path(path: &Path, default_name: &str) -> PathBuf {
    if path.is_dir() {
        path.join(default_name)
    } else {
        path.to_path_buf()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn prompt(answers: &str, base_dir: &Path) -> PromptDialog {
        PromptDialog::from_reader(Cursor::new(answers.to_string()), base_dir.to_path_buf())
    }

    #[test]
    fn test_preset_dialog_joins_default_name_for_directories() {
        let tmp_dir = TempDir::new().unwrap();
        let dialog = PresetDialog::new(Some(tmp_dir.path().to_path_buf()), None);

        let path = dialog.pick_save_path("backup.json").unwrap();
        assert_eq!(path, Some(tmp_dir.path().join("backup.json")));
        assert_eq!(dialog.pick_open_path(IMPORT_FILTERS).unwrap(), None);
    }

    #[test]
    fn test_preset_dialog_keeps_explicit_file() {
        let dialog = PresetDialog::new(Some(PathBuf::from("/nonexistent/out.json")), None);
        assert_eq!(
            dialog.pick_save_path("backup.json").unwrap(),
            Some(PathBuf::from("/nonexistent/out.json"))
        );
    }

    #[test]
    fn test_cancelled_dialog() {
        let dialog = PresetDialog::cancelled();
        assert_eq!(dialog.pick_save_path("x.json").unwrap(), None);
        assert_eq!(dialog.pick_open_path(IMPORT_FILTERS).unwrap(), None);
    }

    #[test]
    fn test_prompt_enter_accepts_suggested_name() {
        let tmp_dir = TempDir::new().unwrap();
        let dialog = prompt("\n", tmp_dir.path());
        assert_eq!(
            dialog.pick_save_path("backup.json").unwrap(),
            Some(tmp_dir.path().join("backup.json"))
        );
    }

    #[test]
    fn test_prompt_cancellation() {
        let tmp_dir = TempDir::new().unwrap();
        assert_eq!(prompt("q\n", tmp_dir.path()).pick_save_path("b.json").unwrap(), None);
        assert_eq!(prompt("", tmp_dir.path()).pick_save_path("b.json").unwrap(), None);
        assert_eq!(prompt("\n", tmp_dir.path()).pick_open_path(IMPORT_FILTERS).unwrap(), None);
    }

    #[test]
    fn test_prompt_open_resolves_relative_path() {
        let tmp_dir = TempDir::new().unwrap();
        let dialog = prompt("old.json\n", tmp_dir.path());
        assert_eq!(
            dialog.pick_open_path(IMPORT_FILTERS).unwrap(),
            Some(tmp_dir.path().join("old.json"))
        );
    }
}
