use crate::device_display::interface::{DeviceDisplay, DeviceDisplayEvent, View};
use crate::library::logger::interface::Logger;
use image::GenericImageView;
use std::error::Error;
use std::io::BufRead;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};

/// Text rendition of the picker for terminals without a windowing system.
/// Commands are read from stdin: `f` picks a file, `c` opens the camera,
/// `t` takes the photo.
pub struct DeviceDisplayConsole {
    logger: Arc<dyn Logger + Send + Sync>,
    last_view: Option<View>,
    intent_sender: Sender<DeviceDisplayEvent>,
    intent_receiver: Mutex<Option<Receiver<DeviceDisplayEvent>>>,
}

impl DeviceDisplayConsole {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        let (intent_sender, intent_receiver) = channel();
        Self {
            logger: logger.with_namespace("display").with_namespace("console"),
            last_view: None,
            intent_sender,
            intent_receiver: Mutex::new(Some(intent_receiver)),
        }
    }
}

impl DeviceDisplay for DeviceDisplayConsole {
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        println!("photo picker — commands: f = choose image, c = open camera, t = take photo");
        Ok(())
    }

    fn render(&mut self, view: &View) -> Result<(), Box<dyn Error + Send + Sync>> {
        // Live frames arrive on every tick; only repaint on real changes.
        if self.last_view.as_ref() == Some(view) {
            return Ok(());
        }

        println!("┌──────────────────────────────┐");
        println!("│ [f] Choose image...          │");
        if view.show_open_camera {
            println!("│ [c] Open camera              │");
        }
        if view.show_camera {
            match &view.live_frame {
                Some(frame) => {
                    let (width, height) = frame.0.dimensions();
                    println!("│ live feed: {:>5}x{:<5}       │", width, height);
                }
                None => println!("│ live feed: waiting...        │"),
            }
            println!("│ [t] Take photo               │");
        }
        if let Some(status) = &view.status_line {
            println!("│ {:<28} │", status);
        }
        if let Some(attached) = &view.attached_file {
            println!("│ attached: {:<18} │", attached);
        }
        println!("└──────────────────────────────┘");

        self.last_view = Some(view.clone());
        Ok(())
    }

    fn alert(&mut self, message: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        println!("!! {}", message);
        Ok(())
    }

    fn events(&mut self) -> Result<Receiver<DeviceDisplayEvent>, Box<dyn Error + Send + Sync>> {
        let receiver = self
            .intent_receiver
            .lock()
            .unwrap()
            .take()
            .ok_or("display events already subscribed")?;

        let sender = self.intent_sender.clone();
        let logger = self.logger.with_namespace("stdin");

        std::thread::spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(_) => break,
                };

                let intent = match line.trim() {
                    "f" => DeviceDisplayEvent::PickFileRequested,
                    "c" => DeviceDisplayEvent::OpenCameraRequested,
                    "t" => DeviceDisplayEvent::TakePhotoRequested,
                    other => {
                        let _ = logger.info(&format!("Unknown command: {:?}", other));
                        continue;
                    }
                };

                if sender.send(intent).is_err() {
                    break;
                }
            }
        });

        Ok(receiver)
    }
}
