use crate::config::Config;
use crate::device_camera::interface::{DeviceCameraEvent, Frame};
use crate::device_display::interface::DeviceDisplayEvent;
use crate::form_input::interface::FormFile;
use std::path::PathBuf;
use std::time::Instant;

pub const CAMERA_START_FAILED_ALERT: &str = "Failed to start camera";
pub const CAMERA_PHOTO_MIME: &str = "image/jpeg";

/// The image currently backing the preview. The encoded bytes live in the
/// form slot; the decoded raster is kept here for display.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectedImage {
    pub name: String,
    pub mime: String,
    pub image: Frame,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Model {
    pub camera: ModelCamera,
    pub selected: Option<SelectedImage>,
}

/// The camera session as a tagged state. Holding the session state here,
/// rather than deriving it from control visibility, is what makes a second
/// concurrent session unrepresentable.
#[derive(Clone, Debug, PartialEq)]
pub enum ModelCamera {
    Idle,
    Requesting,
    Live(ModelLive),
    Capturing(ModelCapturing),
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct ModelLive {
    pub live_frame: Option<Frame>,
    pub awaiting_frame: bool,
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct ModelCapturing {
    pub frame: Option<Frame>,
}

/// A picked file together with its decoded raster.
#[derive(Clone, Debug, PartialEq)]
pub struct LoadedImage {
    pub file: FormFile,
    pub image: Frame,
}

#[derive(Debug)]
pub enum Event {
    Tick(Instant),
    DisplayEvent(DeviceDisplayEvent),
    CameraEvent(DeviceCameraEvent),
    CameraStartDone(Result<(), Box<dyn std::error::Error + Send + Sync>>),
    LiveFrameDone(Result<Frame, Box<dyn std::error::Error + Send + Sync>>),
    PhotoCaptureDone(Result<Frame, Box<dyn std::error::Error + Send + Sync>>),
    PhotoEncodeDone(Result<Vec<u8>, Box<dyn std::error::Error + Send + Sync>>),
    FilePickDone(Result<Option<PathBuf>, Box<dyn std::error::Error + Send + Sync>>),
    FileLoadDone(Result<LoadedImage, Box<dyn std::error::Error + Send + Sync>>),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    SubscribeToDisplayEvents,
    SubscribeToCameraEvents,
    SubscribeTick,
    OpenFilePicker,
    LoadPickedFile { path: PathBuf },
    StartCamera,
    FetchLiveFrame,
    CapturePhoto,
    EncodePhoto { frame: Frame },
    AttachToForm { file: FormFile },
    StopCamera,
    Alert { message: String },
}

pub fn init() -> (Model, Vec<Effect>) {
    (
        Model {
            camera: ModelCamera::Idle,
            selected: None,
        },
        vec![
            Effect::SubscribeToDisplayEvents,
            Effect::SubscribeToCameraEvents,
            Effect::SubscribeTick,
        ],
    )
}

pub fn transition(config: &Config, model: Model, event: Event) -> (Model, Vec<Effect>) {
    match (model.camera.clone(), event) {
        // File-pick path. Never touches the camera session.
        (_, Event::DisplayEvent(DeviceDisplayEvent::PickFileRequested)) => {
            (model, vec![Effect::OpenFilePicker])
        }
        (_, Event::FilePickDone(Ok(Some(path)))) => {
            (model, vec![Effect::LoadPickedFile { path }])
        }
        (_, Event::FilePickDone(Ok(None))) => (model, vec![]),
        (_, Event::FilePickDone(Err(_))) => (model, vec![]),
        (_, Event::FileLoadDone(Ok(loaded))) => {
            let selected = SelectedImage {
                name: loaded.file.name.clone(),
                mime: loaded.file.mime.clone(),
                image: loaded.image,
            };
            (
                Model {
                    selected: Some(selected),
                    ..model
                },
                vec![Effect::AttachToForm { file: loaded.file }],
            )
        }
        (_, Event::FileLoadDone(Err(_))) => (model, vec![]),

        // Camera path: Idle -> Requesting -> Live -> Capturing -> Idle.
        (ModelCamera::Idle, Event::DisplayEvent(DeviceDisplayEvent::OpenCameraRequested)) => (
            Model {
                camera: ModelCamera::Requesting,
                ..model
            },
            vec![Effect::StartCamera],
        ),
        (ModelCamera::Requesting, Event::CameraStartDone(Ok(()))) => (
            Model {
                camera: ModelCamera::Live(ModelLive::default()),
                ..model
            },
            vec![],
        ),
        (ModelCamera::Requesting, Event::CameraStartDone(Err(_))) => (
            Model {
                camera: ModelCamera::Idle,
                ..model
            },
            vec![Effect::Alert {
                message: CAMERA_START_FAILED_ALERT.to_string(),
            }],
        ),
        // A grant that lands after the session was torn down releases the
        // device instead of leaking it.
        (ModelCamera::Idle, Event::CameraStartDone(Ok(()))) => {
            (model, vec![Effect::StopCamera])
        }

        // Live feed pump, one fetch in flight at a time.
        (ModelCamera::Live(live), Event::Tick(_)) => {
            if live.awaiting_frame {
                (model, vec![])
            } else {
                (
                    Model {
                        camera: ModelCamera::Live(ModelLive {
                            awaiting_frame: true,
                            ..live
                        }),
                        ..model
                    },
                    vec![Effect::FetchLiveFrame],
                )
            }
        }
        (ModelCamera::Live(live), Event::LiveFrameDone(result)) => {
            let live_frame = match result {
                Ok(frame) => Some(frame),
                Err(_) => live.live_frame,
            };
            (
                Model {
                    camera: ModelCamera::Live(ModelLive {
                        live_frame,
                        awaiting_frame: false,
                    }),
                    ..model
                },
                vec![],
            )
        }

        (ModelCamera::Live(_), Event::DisplayEvent(DeviceDisplayEvent::TakePhotoRequested)) => (
            Model {
                camera: ModelCamera::Capturing(ModelCapturing::default()),
                ..model
            },
            vec![Effect::CapturePhoto],
        ),
        (ModelCamera::Capturing(_), Event::PhotoCaptureDone(Ok(frame))) => (
            Model {
                camera: ModelCamera::Capturing(ModelCapturing {
                    frame: Some(frame.clone()),
                }),
                ..model
            },
            vec![Effect::EncodePhoto { frame }],
        ),
        (ModelCamera::Capturing(capturing), Event::PhotoEncodeDone(Ok(bytes))) => {
            match capturing.frame {
                Some(frame) => {
                    let file = FormFile {
                        name: config.camera_photo_filename.clone(),
                        mime: CAMERA_PHOTO_MIME.to_string(),
                        bytes,
                    };
                    let selected = SelectedImage {
                        name: file.name.clone(),
                        mime: file.mime.clone(),
                        image: frame,
                    };
                    (
                        Model {
                            camera: ModelCamera::Idle,
                            selected: Some(selected),
                        },
                        vec![Effect::AttachToForm { file }, Effect::StopCamera],
                    )
                }
                None => (model, vec![]),
            }
        }
        // A failed capture or encode keeps the session alive so the user
        // can press the button again.
        (ModelCamera::Capturing(_), Event::PhotoCaptureDone(Err(_))) => (
            Model {
                camera: ModelCamera::Live(ModelLive::default()),
                ..model
            },
            vec![],
        ),
        (ModelCamera::Capturing(_), Event::PhotoEncodeDone(Err(_))) => (
            Model {
                camera: ModelCamera::Live(ModelLive::default()),
                ..model
            },
            vec![],
        ),

        // Session teardown when the device goes away.
        (
            ModelCamera::Live(_) | ModelCamera::Capturing(_),
            Event::CameraEvent(DeviceCameraEvent::Disconnected),
        ) => (
            Model {
                camera: ModelCamera::Idle,
                ..model
            },
            vec![Effect::StopCamera],
        ),
        (ModelCamera::Requesting, Event::CameraEvent(DeviceCameraEvent::Disconnected)) => (
            Model {
                camera: ModelCamera::Idle,
                ..model
            },
            vec![],
        ),

        // Everything else is ignored. In particular: opening the camera
        // while a session exists, and taking a photo outside the live
        // state, so sessions and captures can never overlap.
        _ => (model, vec![]),
    }
}
