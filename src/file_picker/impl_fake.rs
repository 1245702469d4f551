use crate::file_picker::interface::FilePicker;
use crate::form_input::interface::FormFile;
use crate::library::logger::interface::Logger;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Scripted file chooser: tests queue up picks and register the files the
/// picks resolve to.
#[allow(dead_code)]
pub struct FilePickerFake {
    logger: Arc<dyn Logger + Send + Sync>,
    picks: Mutex<VecDeque<Option<PathBuf>>>,
    files: Mutex<Vec<(PathBuf, FormFile)>>,
}

impl FilePickerFake {
    #[allow(dead_code)]
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("file_picker").with_namespace("fake"),
            picks: Mutex::new(VecDeque::new()),
            files: Mutex::new(Vec::new()),
        }
    }

    #[allow(dead_code)]
    pub fn push_pick(&self, pick: Option<PathBuf>) {
        self.picks.lock().unwrap().push_back(pick);
    }

    #[allow(dead_code)]
    pub fn insert_file(&self, path: PathBuf, file: FormFile) {
        self.files.lock().unwrap().push((path, file));
    }
}

impl FilePicker for FilePickerFake {
    fn pick_image(&self) -> Result<Option<PathBuf>, Box<dyn std::error::Error + Send + Sync>> {
        self.logger.info("Opening file chooser...")?;
        let pick = self.picks.lock().unwrap().pop_front().flatten();
        Ok(pick)
    }

    fn read_file(&self, path: &Path) -> Result<FormFile, Box<dyn std::error::Error + Send + Sync>> {
        self.files
            .lock()
            .unwrap()
            .iter()
            .find(|(registered, _)| registered == path)
            .map(|(_, file)| file.clone())
            .ok_or_else(|| format!("no such file: {}", path.display()).into())
    }
}
