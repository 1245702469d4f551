use crate::config::Config;
use crate::device_camera::impl_fake::DeviceCameraFake;
use crate::device_display::impl_fake::DeviceDisplayFake;
use crate::device_display::interface::View;
use crate::file_picker::impl_fake::FilePickerFake;
use crate::form_input::impl_memory::FormInputMemory;
use crate::library::logger::impl_console::LoggerConsole;
use crate::library::logger::interface::Logger;
use crate::photo_picker::main::PhotoPicker;
use std::sync::{Arc, Mutex};

#[allow(dead_code)]
pub struct Fixture {
    pub config: Config,
    pub device_camera: Arc<DeviceCameraFake>,
    pub file_picker: Arc<FilePickerFake>,
    pub form_input: Arc<FormInputMemory>,
    pub device_display: Arc<Mutex<DeviceDisplayFake>>,
    pub display_views: Arc<Mutex<Vec<View>>>,
    pub display_alerts: Arc<Mutex<Vec<String>>>,
    pub photo_picker: PhotoPicker,
}

impl Fixture {
    pub fn new() -> Self {
        let config = Config::default();
        let logger: Arc<dyn Logger + Send + Sync> =
            Arc::new(LoggerConsole::new(config.logger_timezone));
        let device_camera = Arc::new(DeviceCameraFake::new(logger.clone()));
        let file_picker = Arc::new(FilePickerFake::new(logger.clone()));
        let form_input = Arc::new(FormInputMemory::new(logger.clone()));

        let display = DeviceDisplayFake::new();
        let display_views = display.views_handle();
        let display_alerts = display.alerts_handle();
        let device_display = Arc::new(Mutex::new(display));

        let photo_picker = PhotoPicker::new(
            config.clone(),
            logger,
            device_camera.clone(),
            file_picker.clone(),
            form_input.clone(),
            device_display.clone(),
        );

        Self {
            config,
            device_camera,
            file_picker,
            form_input,
            device_display,
            display_views,
            display_alerts,
            photo_picker,
        }
    }
}
