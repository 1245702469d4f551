use crate::form_input::interface::FormFile;
use std::path::{Path, PathBuf};

/// The system file chooser. `pick_image` resolves to `None` when the user
/// cancels the dialog.
pub trait FilePicker: Send + Sync {
    fn pick_image(&self) -> Result<Option<PathBuf>, Box<dyn std::error::Error + Send + Sync>>;
    fn read_file(&self, path: &Path) -> Result<FormFile, Box<dyn std::error::Error + Send + Sync>>;
}
