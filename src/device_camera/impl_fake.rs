use crate::device_camera::interface::{DeviceCamera, DeviceCameraEvent, Frame};
use crate::library::logger::interface::Logger;
use image::{DynamicImage, Rgb, RgbImage};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::mpsc::Receiver;
use std::sync::Arc;

/// Synthetic camera that produces a moving test pattern. Stands in for
/// real hardware on machines without a capture device.
pub struct DeviceCameraFake {
    logger: Arc<dyn Logger + Send + Sync>,
    running: AtomicBool,
    frame_counter: AtomicU64,
}

impl DeviceCameraFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("camera").with_namespace("fake"),
            running: AtomicBool::new(false),
            frame_counter: AtomicU64::new(0),
        }
    }
}

impl DeviceCamera for DeviceCameraFake {
    fn start(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if self.running.load(Ordering::SeqCst) {
            return Err("camera already started".into());
        }
        self.logger.info("Starting camera...")?;
        std::thread::sleep(std::time::Duration::from_millis(50));
        self.running.store(true, Ordering::SeqCst);
        self.logger.info("Camera started")?;
        Ok(())
    }

    fn stop(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if !self.running.swap(false, Ordering::SeqCst) {
            return Err("camera is not running".into());
        }
        self.logger.info("Camera stopped")?;
        Ok(())
    }

    fn capture_frame(&self) -> Result<Frame, Box<dyn std::error::Error + Send + Sync>> {
        if !self.running.load(Ordering::SeqCst) {
            return Err("camera is not running".into());
        }

        let tick = self.frame_counter.fetch_add(1, Ordering::SeqCst);
        let shift = (tick * 4 % 256) as u8;
        let image = RgbImage::from_fn(320, 240, |x, y| {
            Rgb([
                (x % 256) as u8 ^ shift,
                (y % 256) as u8,
                ((x + y) % 256) as u8,
            ])
        });

        Ok(Frame(DynamicImage::ImageRgb8(image)))
    }

    fn events(&self) -> Receiver<DeviceCameraEvent> {
        let (tx, rx) = std::sync::mpsc::channel();

        std::thread::spawn(move || {
            if tx.send(DeviceCameraEvent::Connected).is_err() {
                return;
            }

            loop {
                std::thread::sleep(std::time::Duration::from_secs(60));

                // 1% chance of a brief unplug, like a flaky USB webcam.
                if rand::random::<f32>() < 0.01 {
                    if tx.send(DeviceCameraEvent::Disconnected).is_err() {
                        break;
                    }
                    std::thread::sleep(std::time::Duration::from_secs(5));
                    if tx.send(DeviceCameraEvent::Connected).is_err() {
                        break;
                    }
                }
            }
        });

        rx
    }
}
