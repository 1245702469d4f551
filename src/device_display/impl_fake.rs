use crate::device_display::interface::{DeviceDisplay, DeviceDisplayEvent, View};
use std::error::Error;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};

/// Recording display for tests: captures every rendered view and alert,
/// and lets the test inject user intents.
#[allow(dead_code)]
pub struct DeviceDisplayFake {
    views: Arc<Mutex<Vec<View>>>,
    alerts: Arc<Mutex<Vec<String>>>,
    intent_sender: Sender<DeviceDisplayEvent>,
    intent_receiver: Mutex<Option<Receiver<DeviceDisplayEvent>>>,
}

#[allow(dead_code)]
impl DeviceDisplayFake {
    pub fn new() -> Self {
        let (intent_sender, intent_receiver) = channel();
        Self {
            views: Arc::new(Mutex::new(Vec::new())),
            alerts: Arc::new(Mutex::new(Vec::new())),
            intent_sender,
            intent_receiver: Mutex::new(Some(intent_receiver)),
        }
    }

    pub fn views_handle(&self) -> Arc<Mutex<Vec<View>>> {
        self.views.clone()
    }

    pub fn alerts_handle(&self) -> Arc<Mutex<Vec<String>>> {
        self.alerts.clone()
    }

    pub fn emit(&self, intent: DeviceDisplayEvent) {
        let _ = self.intent_sender.send(intent);
    }
}

impl DeviceDisplay for DeviceDisplayFake {
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        Ok(())
    }

    fn render(&mut self, view: &View) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.views.lock().unwrap().push(view.clone());
        Ok(())
    }

    fn alert(&mut self, message: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.alerts.lock().unwrap().push(message.to_string());
        Ok(())
    }

    fn events(&mut self) -> Result<Receiver<DeviceDisplayEvent>, Box<dyn Error + Send + Sync>> {
        self.intent_receiver
            .lock()
            .unwrap()
            .take()
            .ok_or_else(|| "display events already subscribed".into())
    }
}
