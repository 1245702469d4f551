use crate::file_picker::interface::FilePicker;
use crate::form_input::interface::FormFile;
use crate::library::logger::interface::Logger;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub struct FilePickerRfd {
    extensions: Vec<String>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl FilePickerRfd {
    pub fn new(extensions: Vec<String>, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            extensions,
            logger: logger.with_namespace("file_picker"),
        }
    }
}

impl FilePicker for FilePickerRfd {
    fn pick_image(&self) -> Result<Option<PathBuf>, Box<dyn std::error::Error + Send + Sync>> {
        self.logger.info("Opening file chooser...")?;

        let picked = rfd::FileDialog::new()
            .add_filter("Images", &self.extensions)
            .pick_file();

        match &picked {
            Some(path) => self.logger.info(&format!("Picked {}", path.display()))?,
            None => self.logger.info("File chooser cancelled")?,
        }

        Ok(picked)
    }

    fn read_file(&self, path: &Path) -> Result<FormFile, Box<dyn std::error::Error + Send + Sync>> {
        let bytes = std::fs::read(path)?;

        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| "image".to_string());

        // Sniff the MIME type from the magic bytes, falling back to the
        // extension for files infer does not recognize.
        let mime = match infer::get(&bytes) {
            Some(kind) => kind.mime_type().to_string(),
            None => mime_from_extension(path),
        };

        Ok(FormFile { name, mime, bytes })
    }
}

fn mime_from_extension(path: &Path) -> String {
    let extension = path
        .extension()
        .map(|extension| extension.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "png" => "image/png".to_string(),
        "jpg" | "jpeg" => "image/jpeg".to_string(),
        "gif" => "image/gif".to_string(),
        _ => "application/octet-stream".to_string(),
    }
}
