use config::Config;
use device_camera::impl_fake::DeviceCameraFake;
#[cfg(target_os = "linux")]
use device_camera::impl_v4l::DeviceCameraV4l;
use device_camera::interface::DeviceCamera;
use device_display::impl_console::DeviceDisplayConsole;
use device_display::impl_gui::DeviceDisplayGui;
use device_display::interface::DeviceDisplay;
use file_picker::impl_rfd::FilePickerRfd;
use form_input::impl_memory::FormInputMemory;
use library::logger::impl_console::LoggerConsole;
use library::logger::interface::Logger;
use photo_picker::main::PhotoPicker;
use std::sync::{Arc, Mutex};

mod config;
mod device_camera;
mod device_display;
mod file_picker;
mod form_input;
mod library;
mod photo_picker;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = Config::default();

    let logger: Arc<dyn Logger + Send + Sync> = Arc::new(LoggerConsole::new(config.logger_timezone));

    let device_camera = build_camera(&config, logger.clone());

    let file_picker = Arc::new(FilePickerRfd::new(
        config.accepted_extensions.clone(),
        logger.clone(),
    ));

    let form_input = Arc::new(FormInputMemory::new(logger.clone()));

    let device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>> =
        if std::env::args().any(|arg| arg == "--console") {
            Arc::new(Mutex::new(DeviceDisplayConsole::new(logger.clone())))
        } else {
            Arc::new(Mutex::new(DeviceDisplayGui::new(logger.clone())))
        };

    let photo_picker = PhotoPicker::new(
        config,
        logger,
        device_camera,
        file_picker,
        form_input,
        device_display,
    );

    photo_picker.run()?;

    Ok(())
}

fn build_camera(
    config: &Config,
    logger: Arc<dyn Logger + Send + Sync>,
) -> Arc<dyn DeviceCamera + Send + Sync> {
    #[cfg(target_os = "linux")]
    {
        match DeviceCameraV4l::probe(config.camera_device_index) {
            Ok(()) => {
                return Arc::new(DeviceCameraV4l::new(
                    config.camera_device_index,
                    logger.clone(),
                ));
            }
            Err(e) => {
                let _ = logger.info(&format!(
                    "No capture device at index {}, using the synthetic camera: {}",
                    config.camera_device_index, e
                ));
            }
        }
    }

    Arc::new(DeviceCameraFake::new(logger))
}
