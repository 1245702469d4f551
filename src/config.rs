use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub tick_rate: Duration,
    pub camera_device_index: usize,
    pub camera_photo_filename: String,
    pub jpeg_quality: u8,
    pub accepted_extensions: Vec<String>,
    pub logger_timezone: chrono::FixedOffset,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_rate: Duration::from_millis(100),
            // Index 0 is the outward-facing device on machines that expose more than one.
            camera_device_index: 0,
            camera_photo_filename: "camera_photo.jpg".to_string(),
            jpeg_quality: 92,
            accepted_extensions: vec![
                "png".to_string(),
                "jpg".to_string(),
                "jpeg".to_string(),
                "gif".to_string(),
            ],
            logger_timezone: mountain_standard_time(),
        }
    }
}

fn mountain_standard_time() -> chrono::FixedOffset {
    chrono::FixedOffset::west_opt(7 * 3600).unwrap()
}
