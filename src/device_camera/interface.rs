use image::{DynamicImage, GenericImageView};
use std::fmt;

/// One frame from the capture device, at the device's native resolution.
#[derive(Clone)]
pub struct Frame(pub DynamicImage);

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (width, height) = self.0.dimensions();
        write!(f, "Frame({}x{})", width, height)
    }
}

impl PartialEq for Frame {
    fn eq(&self, other: &Self) -> bool {
        self.0.dimensions() == other.0.dimensions() && self.0.as_bytes() == other.0.as_bytes()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeviceCameraEvent {
    Disconnected,
    Connected,
}

pub trait DeviceCamera: Send + Sync {
    fn start(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
    fn stop(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
    fn capture_frame(&self) -> Result<Frame, Box<dyn std::error::Error + Send + Sync>>;
    fn events(&self) -> std::sync::mpsc::Receiver<DeviceCameraEvent>;
}
