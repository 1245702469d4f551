use crate::device_camera::interface::Frame;
use crate::photo_picker::core::{Effect, Event, LoadedImage};
use crate::photo_picker::main::PhotoPicker;
use image::codecs::jpeg::JpegEncoder;
use std::io::Cursor;
use std::path::Path;
use std::time::Instant;

impl PhotoPicker {
    pub fn interpret_effect(&self, effect: Effect) {
        let _ = self.logger.info(&format!("Running effect: {:?}", effect));

        match effect {
            Effect::SubscribeToDisplayEvents => {
                let events = match self.device_display.lock().unwrap().events() {
                    Ok(events) => events,
                    Err(e) => {
                        let _ = self
                            .logger
                            .info(&format!("Failed to subscribe to display events: {}", e));
                        return;
                    }
                };
                loop {
                    match events.recv() {
                        Ok(event) => {
                            if self.event_sender.send(Event::DisplayEvent(event)).is_err() {
                                break;
                            }
                        }
                        Err(_) => break,
                    }
                }
            }
            Effect::SubscribeToCameraEvents => {
                let events = self.device_camera.events();
                loop {
                    match events.recv() {
                        Ok(event) => {
                            if self.event_sender.send(Event::CameraEvent(event)).is_err() {
                                break;
                            }
                        }
                        Err(_) => break,
                    }
                }
            }
            Effect::SubscribeTick => loop {
                std::thread::sleep(self.config.tick_rate);
                if self.event_sender.send(Event::Tick(Instant::now())).is_err() {
                    break;
                }
            },
            Effect::OpenFilePicker => {
                let picked = self.file_picker.pick_image();
                let _ = self.event_sender.send(Event::FilePickDone(picked));
            }
            Effect::LoadPickedFile { path } => {
                let loaded = self.load_picked_file(&path);
                if let Err(e) = &loaded {
                    let _ = self
                        .logger
                        .info(&format!("Failed to load {}: {}", path.display(), e));
                }
                let _ = self.event_sender.send(Event::FileLoadDone(loaded));
            }
            Effect::StartCamera => {
                let started = self.device_camera.start();
                if let Err(e) = &started {
                    let _ = self.logger.info(&format!("Failed to start camera: {}", e));
                }
                let _ = self.event_sender.send(Event::CameraStartDone(started));
            }
            Effect::FetchLiveFrame => {
                let frame = self.device_camera.capture_frame();
                let _ = self.event_sender.send(Event::LiveFrameDone(frame));
            }
            Effect::CapturePhoto => {
                let frame = self.device_camera.capture_frame();
                if let Err(e) = &frame {
                    let _ = self.logger.info(&format!("Failed to capture photo: {}", e));
                }
                let _ = self.event_sender.send(Event::PhotoCaptureDone(frame));
            }
            Effect::EncodePhoto { frame } => {
                let encoded = self.encode_jpeg(&frame);
                if let Err(e) = &encoded {
                    let _ = self.logger.info(&format!("Failed to encode photo: {}", e));
                }
                let _ = self.event_sender.send(Event::PhotoEncodeDone(encoded));
            }
            Effect::AttachToForm { file } => {
                if let Err(e) = self.form_input.attach(file) {
                    let _ = self.logger.info(&format!("Failed to attach file: {}", e));
                }
            }
            Effect::StopCamera => {
                if let Err(e) = self.device_camera.stop() {
                    let _ = self.logger.info(&format!("Failed to stop camera: {}", e));
                }
            }
            Effect::Alert { message } => {
                let _ = self.logger.info(&format!("Alert: {}", message));
                if let Err(e) = self.device_display.lock().unwrap().alert(&message) {
                    let _ = self.logger.info(&format!("Failed to show alert: {}", e));
                }
            }
        }
    }

    fn load_picked_file(
        &self,
        path: &Path,
    ) -> Result<LoadedImage, Box<dyn std::error::Error + Send + Sync>> {
        let file = self.file_picker.read_file(path)?;
        let decoded = image::load_from_memory(&file.bytes)?;
        Ok(LoadedImage {
            file,
            image: Frame(decoded),
        })
    }

    fn encode_jpeg(
        &self,
        frame: &Frame,
    ) -> Result<Vec<u8>, Box<dyn std::error::Error + Send + Sync>> {
        let rgb = frame.0.to_rgb8();
        let mut bytes = Vec::new();
        let mut cursor = Cursor::new(&mut bytes);
        let mut encoder = JpegEncoder::new_with_quality(&mut cursor, self.config.jpeg_quality);
        encoder.encode(
            rgb.as_raw(),
            rgb.width(),
            rgb.height(),
            image::ExtendedColorType::Rgb8,
        )?;
        Ok(bytes)
    }
}
