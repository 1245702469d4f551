use crate::form_input::interface::{FormFile, FormInput};
use crate::library::logger::interface::Logger;
use std::sync::{Arc, Mutex};

pub struct FormInputMemory {
    logger: Arc<dyn Logger + Send + Sync>,
    slot: Mutex<Option<FormFile>>,
}

impl FormInputMemory {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("form_input"),
            slot: Mutex::new(None),
        }
    }
}

impl FormInput for FormInputMemory {
    fn attach(&self, file: FormFile) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.logger.info(&format!(
            "Attached {} ({}, {} bytes)",
            file.name,
            file.mime,
            file.bytes.len()
        ))?;
        *self.slot.lock().unwrap() = Some(file);
        Ok(())
    }

    fn file(&self) -> Result<Option<FormFile>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.slot.lock().unwrap().clone())
    }
}
