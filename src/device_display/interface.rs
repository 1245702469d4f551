use crate::device_camera::interface::Frame;
use std::error::Error;
use std::sync::mpsc::Receiver;

/// User intents coming back from the display's controls.
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceDisplayEvent {
    PickFileRequested,
    OpenCameraRequested,
    TakePhotoRequested,
}

/// A complete snapshot of what the display should show. The preview is
/// present exactly when an image has been selected; `show_open_camera`
/// and `show_camera` are never both set.
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub preview: Option<Frame>,
    pub live_frame: Option<Frame>,
    pub show_open_camera: bool,
    pub show_camera: bool,
    pub attached_file: Option<String>,
    pub status_line: Option<String>,
}

impl Default for View {
    fn default() -> Self {
        Self {
            preview: None,
            live_frame: None,
            show_open_camera: true,
            show_camera: false,
            attached_file: None,
            status_line: None,
        }
    }
}

pub trait DeviceDisplay: Send + Sync {
    /// Bring up the display surface.
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Replace the displayed content with a new snapshot.
    fn render(&mut self, view: &View) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Blocking user-facing notification.
    fn alert(&mut self, message: &str) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// The stream of user intents. May only be subscribed once.
    fn events(&mut self) -> Result<Receiver<DeviceDisplayEvent>, Box<dyn Error + Send + Sync>>;
}
