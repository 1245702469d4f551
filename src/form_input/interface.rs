use std::fmt;

/// A named file as the host form sees it: display name, MIME type and the
/// encoded bytes.
#[derive(Clone, PartialEq)]
pub struct FormFile {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for FormFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormFile")
            .field("name", &self.name)
            .field("mime", &self.mime)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

/// The single file slot the host form submits. Attaching replaces any
/// previous file; the slot never holds more than one.
pub trait FormInput: Send + Sync {
    fn attach(&self, file: FormFile) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// What the surrounding form will submit.
    #[allow(dead_code)]
    fn file(&self) -> Result<Option<FormFile>, Box<dyn std::error::Error + Send + Sync>>;
}
