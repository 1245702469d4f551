use crate::device_camera::interface::Frame;
use crate::device_display::interface::{DeviceDisplay, DeviceDisplayEvent, View};
use crate::library::logger::interface::Logger;
use eframe::egui;
use std::error::Error;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread;

struct Shared {
    view: Option<View>,
    dirty: bool,
}

struct PickerWindow {
    shared: Arc<Mutex<Shared>>,
    intents: Sender<DeviceDisplayEvent>,
    view: View,
    preview_texture: Option<egui::TextureHandle>,
    live_texture: Option<egui::TextureHandle>,
}

impl eframe::App for PickerWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        {
            let mut shared = self.shared.lock().unwrap();
            if shared.dirty {
                if let Some(view) = shared.view.clone() {
                    self.preview_texture = view
                        .preview
                        .as_ref()
                        .map(|frame| load_frame_texture(ctx, "preview", frame));
                    self.live_texture = view
                        .live_frame
                        .as_ref()
                        .map(|frame| load_frame_texture(ctx, "live", frame));
                    self.view = view;
                }
                shared.dirty = false;
            }
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(10.0);
                ui.heading("Attach a photo");
                ui.add_space(10.0);

                if ui.button("Choose image...").clicked() {
                    let _ = self.intents.send(DeviceDisplayEvent::PickFileRequested);
                }

                if self.view.show_open_camera && ui.button("Open camera").clicked() {
                    let _ = self.intents.send(DeviceDisplayEvent::OpenCameraRequested);
                }

                if self.view.show_camera {
                    if let Some(texture) = &self.live_texture {
                        ui.add(
                            egui::Image::from_texture(egui::load::SizedTexture::from(texture))
                                .max_width(400.0),
                        );
                    }
                    if ui.button("Take photo").clicked() {
                        let _ = self.intents.send(DeviceDisplayEvent::TakePhotoRequested);
                    }
                }

                if let Some(status) = &self.view.status_line {
                    ui.add_space(6.0);
                    ui.label(status);
                }

                if let Some(texture) = &self.preview_texture {
                    ui.add_space(10.0);
                    ui.separator();
                    ui.add(
                        egui::Image::from_texture(egui::load::SizedTexture::from(texture))
                            .max_width(400.0),
                    );
                }

                if let Some(attached) = &self.view.attached_file {
                    ui.label(egui::RichText::new(attached).monospace());
                }
            });
        });

        // Poll for view snapshots pushed from the event loop.
        ctx.request_repaint_after(std::time::Duration::from_millis(50));
    }
}

fn load_frame_texture(ctx: &egui::Context, name: &str, frame: &Frame) -> egui::TextureHandle {
    let rgba = frame.0.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    let image = egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
    ctx.load_texture(name, image, egui::TextureOptions::LINEAR)
}

pub struct DeviceDisplayGui {
    logger: Arc<dyn Logger + Send + Sync>,
    shared: Arc<Mutex<Shared>>,
    intent_sender: Sender<DeviceDisplayEvent>,
    intent_receiver: Mutex<Option<Receiver<DeviceDisplayEvent>>>,
}

impl DeviceDisplayGui {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        let (intent_sender, intent_receiver) = channel();
        Self {
            logger: logger.with_namespace("display").with_namespace("gui"),
            shared: Arc::new(Mutex::new(Shared {
                view: None,
                dirty: false,
            })),
            intent_sender,
            intent_receiver: Mutex::new(Some(intent_receiver)),
        }
    }
}

impl DeviceDisplay for DeviceDisplayGui {
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let shared = self.shared.clone();
        let intents = self.intent_sender.clone();

        // The window runs on its own thread so the event loop keeps the
        // main thread.
        thread::spawn(move || {
            let options = eframe::NativeOptions {
                viewport: egui::ViewportBuilder::default()
                    .with_inner_size([440.0, 680.0])
                    .with_resizable(true),
                ..Default::default()
            };

            let window = PickerWindow {
                shared,
                intents,
                view: View::default(),
                preview_texture: None,
                live_texture: None,
            };

            let _ = eframe::run_native("Photo Picker", options, Box::new(|_cc| Box::new(window)));
        });

        self.logger.info("Display window started")?;
        Ok(())
    }

    fn render(&mut self, view: &View) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut shared = self.shared.lock().unwrap();
        shared.view = Some(view.clone());
        shared.dirty = true;
        Ok(())
    }

    fn alert(&mut self, message: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        let message = message.to_string();

        // The dialog blocks until dismissed; run it off the caller's
        // thread so rendering can continue behind it.
        thread::spawn(move || {
            rfd::MessageDialog::new()
                .set_level(rfd::MessageLevel::Error)
                .set_title("Photo Picker")
                .set_description(message.as_str())
                .show();
        });

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
