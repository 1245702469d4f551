use crate::device_camera::interface::{DeviceCamera, DeviceCameraEvent, Frame};
use crate::library::logger::interface::Logger;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Receiver;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use v4l::buffer::Type;
use v4l::io::mmap::Stream;
use v4l::io::traits::CaptureStream;
use v4l::video::Capture;
use v4l::{Device, FourCC};

/// V4L2 capture device. A capture thread owns the device handle while the
/// session is live and publishes the most recent decoded frame.
pub struct DeviceCameraV4l {
    device_index: usize,
    logger: Arc<dyn Logger + Send + Sync>,
    running: Arc<AtomicBool>,
    latest_frame: Arc<Mutex<Option<Frame>>>,
    capture_thread: Mutex<Option<JoinHandle<()>>>,
}

impl DeviceCameraV4l {
    pub fn new(device_index: usize, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            device_index,
            logger: logger.with_namespace("camera").with_namespace("v4l"),
            running: Arc::new(AtomicBool::new(false)),
            latest_frame: Arc::new(Mutex::new(None)),
            capture_thread: Mutex::new(None),
        }
    }

    /// Check whether a capture device exists at the given index without
    /// holding on to it.
    pub fn probe(device_index: usize) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Device::new(device_index)?;
        Ok(())
    }
}

impl DeviceCamera for DeviceCameraV4l {
    fn start(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if self.running.load(Ordering::SeqCst) {
            return Err("camera already started".into());
        }

        self.logger.info("Starting camera...")?;

        let device = Device::new(self.device_index)?;
        let mut format = device.format()?;
        format.fourcc = FourCC::new(b"MJPG");
        let format = device.set_format(&format)?;
        if format.fourcc != FourCC::new(b"MJPG") {
            return Err("device does not support MJPG capture".into());
        }

        self.logger.info(&format!(
            "Camera streaming at {}x{}",
            format.width, format.height
        ))?;

        self.running.store(true, Ordering::SeqCst);

        let running = self.running.clone();
        let latest_frame = self.latest_frame.clone();
        let logger = self.logger.with_namespace("capture_thread");

        let handle = std::thread::spawn(move || {
            let mut stream = match Stream::with_buffers(&device, Type::VideoCapture, 4) {
                Ok(stream) => stream,
                Err(e) => {
                    let _ = logger.info(&format!("Failed to map capture stream: {}", e));
                    running.store(false, Ordering::SeqCst);
                    return;
                }
            };

            while running.load(Ordering::SeqCst) {
                match stream.next() {
                    Ok((data, _meta)) => match image::load_from_memory(data) {
                        Ok(decoded) => {
                            *latest_frame.lock().unwrap() = Some(Frame(decoded));
                        }
                        Err(e) => {
                            let _ = logger.info(&format!("Dropping undecodable frame: {}", e));
                        }
                    },
                    Err(e) => {
                        let _ = logger.info(&format!("Capture stream error: {}", e));
                        break;
                    }
                }
            }
            // Dropping the stream and device here releases the hardware.
        });

        *self.capture_thread.lock().unwrap() = Some(handle);

        Ok(())
    }

    fn stop(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if !self.running.swap(false, Ordering::SeqCst) {
            return Err("camera is not running".into());
        }

        if let Some(handle) = self.capture_thread.lock().unwrap().take() {
            let _ = handle.join();
        }
        *self.latest_frame.lock().unwrap() = None;

        self.logger.info("Camera stopped")?;
        Ok(())
    }

    fn capture_frame(&self) -> Result<Frame, Box<dyn std::error::Error + Send + Sync>> {
        if !self.running.load(Ordering::SeqCst) {
            return Err("camera is not running".into());
        }

        self.latest_frame
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| "no frame available yet".into())
    }

    fn events(&self) -> Receiver<DeviceCameraEvent> {
        let (tx, rx) = std::sync::mpsc::channel();
        let device_index = self.device_index;

        std::thread::spawn(move || {
            let mut was_connected = false;
            loop {
                let is_connected = Device::new(device_index).is_ok();

                if is_connected != was_connected {
                    let event = if is_connected {
                        DeviceCameraEvent::Connected
                    } else {
                        DeviceCameraEvent::Disconnected
                    };
                    if tx.send(event).is_err() {
                        break;
                    }
                    was_connected = is_connected;
                }

                std::thread::sleep(std::time::Duration::from_secs(1));
            }
        });

        rx
    }
}
