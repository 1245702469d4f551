use crate::config::Config;
use crate::device_camera::interface::DeviceCamera;
use crate::device_display::interface::DeviceDisplay;
use crate::file_picker::interface::FilePicker;
use crate::form_input::interface::FormInput;
use crate::library::logger::interface::Logger;
use crate::photo_picker::core::{init, transition, Effect, Event};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct PhotoPicker {
    pub config: Config,
    pub logger: Arc<dyn Logger + Send + Sync>,
    pub device_camera: Arc<dyn DeviceCamera + Send + Sync>,
    pub file_picker: Arc<dyn FilePicker + Send + Sync>,
    pub form_input: Arc<dyn FormInput + Send + Sync>,
    pub device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
    pub event_sender: Sender<Event>,
    pub event_receiver: Arc<Mutex<Receiver<Event>>>,
}

impl PhotoPicker {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        device_camera: Arc<dyn DeviceCamera + Send + Sync>,
        file_picker: Arc<dyn FilePicker + Send + Sync>,
        form_input: Arc<dyn FormInput + Send + Sync>,
        device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
    ) -> Self {
        let (event_sender, event_receiver) = channel();
        Self {
            config,
            logger,
            device_camera,
            file_picker,
            form_input,
            device_display,
            event_sender,
            event_receiver: Arc::new(Mutex::new(event_receiver)),
        }
    }

    fn spawn_effects(&self, effects: Vec<Effect>) {
        for effect in effects {
            let self_clone = self.clone();
            std::thread::spawn(move || self_clone.interpret_effect(effect));
        }
    }

    pub fn run(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.device_display.lock().unwrap().init()?;

        let (mut current_model, effects) = init();
        self.render(&current_model)?;
        self.spawn_effects(effects);

        loop {
            let event = self.event_receiver.lock().unwrap().recv();
            match event {
                Ok(event) => {
                    // The tick and the live-feed pump fire many times a
                    // second; everything else is worth a log line.
                    if !matches!(event, Event::Tick(_) | Event::LiveFrameDone(_)) {
                        let _ = self.logger.info(&format!("Processing event: {:?}", event));
                    }

                    let (new_model, effects) = transition(&self.config, current_model, event);
                    current_model = new_model;

                    self.render(&current_model)?;
                    self.spawn_effects(effects);
                }
                Err(e) => return Err(Box::new(e)),
            }
        }
    }
}
