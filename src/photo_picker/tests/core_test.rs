#[cfg(test)]
mod core_test {

    use std::path::PathBuf;
    use std::time::Instant;

    use crate::config::Config;
    use crate::device_camera::interface::{DeviceCameraEvent, Frame};
    use crate::device_display::interface::DeviceDisplayEvent;
    use crate::form_input::interface::FormFile;
    use crate::photo_picker::core::{
        init, transition, Effect, Event, LoadedImage, Model, ModelCamera, ModelCapturing,
        ModelLive, CAMERA_PHOTO_MIME, CAMERA_START_FAILED_ALERT,
    };
    use crate::photo_picker::render::build_view;
    use image::{DynamicImage, Rgb, RgbImage};

    fn test_frame() -> Frame {
        Frame(DynamicImage::ImageRgb8(RgbImage::from_pixel(
            2,
            2,
            Rgb([10, 20, 30]),
        )))
    }

    fn boom() -> Box<dyn std::error::Error + Send + Sync> {
        "boom".into()
    }

    fn live_model() -> Model {
        Model {
            camera: ModelCamera::Live(ModelLive::default()),
            selected: None,
        }
    }

    #[test]
    fn test_init() {
        let (model, effects) = init();

        assert_eq!(model.camera, ModelCamera::Idle);
        assert!(model.selected.is_none());
        assert_eq!(
            effects,
            vec![
                Effect::SubscribeToDisplayEvents,
                Effect::SubscribeToCameraEvents,
                Effect::SubscribeTick,
            ]
        );
    }

    #[test]
    fn test_file_pick_flow() {
        let config = Config::default();
        let (model, _) = init();

        let (model, effects) = transition(
            &config,
            model,
            Event::DisplayEvent(DeviceDisplayEvent::PickFileRequested),
        );
        assert_eq!(effects, vec![Effect::OpenFilePicker]);

        let path = PathBuf::from("/photos/dog.png");
        let (model, effects) = transition(&config, model, Event::FilePickDone(Ok(Some(path.clone()))));
        assert_eq!(effects, vec![Effect::LoadPickedFile { path }]);

        let file = FormFile {
            name: "dog.png".to_string(),
            mime: "image/png".to_string(),
            bytes: vec![1, 2, 3],
        };
        let loaded = LoadedImage {
            file: file.clone(),
            image: test_frame(),
        };
        let (model, effects) = transition(&config, model, Event::FileLoadDone(Ok(loaded)));
        assert_eq!(effects, vec![Effect::AttachToForm { file }]);

        let selected = model.selected.as_ref().expect("an image is selected");
        assert_eq!(selected.name, "dog.png");
        assert_eq!(selected.mime, "image/png");
        assert_eq!(selected.image, test_frame());

        let view = build_view(&model);
        assert_eq!(view.preview, Some(test_frame()));
    }

    #[test]
    fn test_cancelled_file_dialog_is_a_noop() {
        let config = Config::default();
        let (model, _) = init();
        let before = model.clone();

        let (model, effects) = transition(&config, model, Event::FilePickDone(Ok(None)));

        assert_eq!(model, before);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_file_load_failure_is_logged_not_shown() {
        let config = Config::default();
        let (model, _) = init();
        let before = model.clone();

        let (model, effects) = transition(&config, model, Event::FileLoadDone(Err(boom())));

        assert_eq!(model, before);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_camera_grant_flow() {
        let config = Config::default();
        let (model, _) = init();

        let (model, effects) = transition(
            &config,
            model,
            Event::DisplayEvent(DeviceDisplayEvent::OpenCameraRequested),
        );
        assert_eq!(model.camera, ModelCamera::Requesting);
        assert_eq!(effects, vec![Effect::StartCamera]);

        // Controls are unchanged while the request is in flight.
        let view = build_view(&model);
        assert!(view.show_open_camera);
        assert!(!view.show_camera);

        let (model, effects) = transition(&config, model, Event::CameraStartDone(Ok(())));
        assert_eq!(model.camera, ModelCamera::Live(ModelLive::default()));
        assert!(effects.is_empty());

        let view = build_view(&model);
        assert!(!view.show_open_camera);
        assert!(view.show_camera);
    }

    #[test]
    fn test_camera_grant_failure_alerts_and_reverts() {
        let config = Config::default();
        let (model, _) = init();
        let before_view = build_view(&model);

        let (model, _) = transition(
            &config,
            model,
            Event::DisplayEvent(DeviceDisplayEvent::OpenCameraRequested),
        );
        let (model, effects) = transition(&config, model, Event::CameraStartDone(Err(boom())));

        assert_eq!(model.camera, ModelCamera::Idle);
        assert_eq!(
            effects,
            vec![Effect::Alert {
                message: CAMERA_START_FAILED_ALERT.to_string(),
            }]
        );
        assert_eq!(build_view(&model), before_view);
    }

    #[test]
    fn test_capture_flow() {
        let config = Config::default();

        let (model, effects) = transition(
            &config,
            live_model(),
            Event::DisplayEvent(DeviceDisplayEvent::TakePhotoRequested),
        );
        assert!(matches!(model.camera, ModelCamera::Capturing(_)));
        assert_eq!(effects, vec![Effect::CapturePhoto]);

        let frame = test_frame();
        let (model, effects) =
            transition(&config, model, Event::PhotoCaptureDone(Ok(frame.clone())));
        assert_eq!(
            effects,
            vec![Effect::EncodePhoto {
                frame: frame.clone(),
            }]
        );

        let bytes = vec![0xff, 0xd8, 0xff, 0xe0];
        let (model, effects) = transition(&config, model, Event::PhotoEncodeDone(Ok(bytes.clone())));

        assert_eq!(model.camera, ModelCamera::Idle);
        let expected_file = FormFile {
            name: config.camera_photo_filename.clone(),
            mime: CAMERA_PHOTO_MIME.to_string(),
            bytes,
        };
        assert_eq!(
            effects,
            vec![
                Effect::AttachToForm {
                    file: expected_file,
                },
                Effect::StopCamera,
            ]
        );

        let selected = model.selected.as_ref().expect("the photo is selected");
        assert_eq!(selected.name, "camera_photo.jpg");
        assert_eq!(selected.mime, "image/jpeg");
        assert_eq!(selected.image, frame);

        // Controls are back to their pre-session arrangement, with the
        // capture showing in the preview.
        let view = build_view(&model);
        assert!(view.show_open_camera);
        assert!(!view.show_camera);
        assert_eq!(view.preview, Some(frame));
    }

    #[test]
    fn test_capture_failure_keeps_the_session() {
        let config = Config::default();
        let model = Model {
            camera: ModelCamera::Capturing(ModelCapturing::default()),
            selected: None,
        };

        let (model, effects) = transition(&config, model, Event::PhotoCaptureDone(Err(boom())));

        assert_eq!(model.camera, ModelCamera::Live(ModelLive::default()));
        assert!(effects.is_empty());
    }

    #[test]
    fn test_encode_failure_keeps_the_session() {
        let config = Config::default();
        let model = Model {
            camera: ModelCamera::Capturing(ModelCapturing {
                frame: Some(test_frame()),
            }),
            selected: None,
        };

        let (model, effects) = transition(&config, model, Event::PhotoEncodeDone(Err(boom())));

        assert_eq!(model.camera, ModelCamera::Live(ModelLive::default()));
        assert!(effects.is_empty());
    }

    #[test]
    fn test_open_camera_ignored_while_a_session_exists() {
        let config = Config::default();
        let states = vec![
            ModelCamera::Requesting,
            ModelCamera::Live(ModelLive::default()),
            ModelCamera::Capturing(ModelCapturing::default()),
        ];

        for camera in states {
            let model = Model {
                camera,
                selected: None,
            };
            let before = model.clone();
            let (model, effects) = transition(
                &config,
                model,
                Event::DisplayEvent(DeviceDisplayEvent::OpenCameraRequested),
            );
            assert_eq!(model, before);
            assert!(effects.is_empty());
        }
    }

    #[test]
    fn test_take_photo_ignored_outside_live() {
        let config = Config::default();
        let states = vec![
            ModelCamera::Idle,
            ModelCamera::Requesting,
            ModelCamera::Capturing(ModelCapturing::default()),
        ];

        for camera in states {
            let model = Model {
                camera,
                selected: None,
            };
            let before = model.clone();
            let (model, effects) = transition(
                &config,
                model,
                Event::DisplayEvent(DeviceDisplayEvent::TakePhotoRequested),
            );
            assert_eq!(model, before);
            assert!(effects.is_empty());
        }
    }

    #[test]
    fn test_controls_mutually_exclusive_in_every_state() {
        let states = vec![
            ModelCamera::Idle,
            ModelCamera::Requesting,
            ModelCamera::Live(ModelLive::default()),
            ModelCamera::Live(ModelLive {
                live_frame: Some(test_frame()),
                awaiting_frame: true,
            }),
            ModelCamera::Capturing(ModelCapturing::default()),
        ];

        for camera in states {
            let model = Model {
                camera,
                selected: None,
            };
            let view = build_view(&model);
            assert!(view.show_open_camera != view.show_camera);
        }
    }

    #[test]
    fn test_preview_visible_exactly_when_an_image_is_selected() {
        let (model, _) = init();
        let view = build_view(&model);
        assert!(view.preview.is_none());
        assert!(view.attached_file.is_none());

        let model = Model {
            selected: Some(crate::photo_picker::core::SelectedImage {
                name: "dog.png".to_string(),
                mime: "image/png".to_string(),
                image: test_frame(),
            }),
            ..model
        };
        let view = build_view(&model);
        assert!(view.preview.is_some());
        assert_eq!(view.attached_file, Some("dog.png (image/png)".to_string()));
    }

    #[test]
    fn test_live_feed_pump() {
        let config = Config::default();

        let (model, effects) = transition(&config, live_model(), Event::Tick(Instant::now()));
        assert_eq!(effects, vec![Effect::FetchLiveFrame]);

        // Only one fetch in flight at a time.
        let (model, effects) = transition(&config, model, Event::Tick(Instant::now()));
        assert!(effects.is_empty());

        let frame = test_frame();
        let (model, effects) = transition(&config, model, Event::LiveFrameDone(Ok(frame.clone())));
        assert!(effects.is_empty());
        match model.camera {
            ModelCamera::Live(live) => {
                assert_eq!(live.live_frame, Some(frame));
                assert!(!live.awaiting_frame);
            }
            _ => panic!("Unexpected state"),
        }
    }

    #[test]
    fn test_file_pick_replaces_camera_capture() {
        let config = Config::default();

        // Run a full capture first.
        let (model, _) = transition(
            &config,
            live_model(),
            Event::DisplayEvent(DeviceDisplayEvent::TakePhotoRequested),
        );
        let (model, _) = transition(&config, model, Event::PhotoCaptureDone(Ok(test_frame())));
        let (model, _) = transition(&config, model, Event::PhotoEncodeDone(Ok(vec![0xff, 0xd8])));
        assert_eq!(
            model.selected.as_ref().map(|s| s.name.as_str()),
            Some("camera_photo.jpg")
        );

        // Then pick a file; the capture is fully replaced and no session
        // is left behind.
        let file = FormFile {
            name: "scan.jpg".to_string(),
            mime: "image/jpeg".to_string(),
            bytes: vec![9, 9, 9],
        };
        let loaded = LoadedImage {
            file: file.clone(),
            image: test_frame(),
        };
        let (model, effects) = transition(&config, model, Event::FileLoadDone(Ok(loaded)));

        assert_eq!(model.camera, ModelCamera::Idle);
        assert_eq!(
            model.selected.as_ref().map(|s| s.name.as_str()),
            Some("scan.jpg")
        );
        assert_eq!(effects, vec![Effect::AttachToForm { file }]);
    }

    #[test]
    fn test_camera_capture_replaces_picked_file() {
        let config = Config::default();

        let file = FormFile {
            name: "scan.jpg".to_string(),
            mime: "image/jpeg".to_string(),
            bytes: vec![9, 9, 9],
        };
        let (model, _) = transition(
            &config,
            live_model(),
            Event::FileLoadDone(Ok(LoadedImage {
                file,
                image: test_frame(),
            })),
        );

        let (model, _) = transition(
            &config,
            model,
            Event::DisplayEvent(DeviceDisplayEvent::TakePhotoRequested),
        );
        let (model, _) = transition(&config, model, Event::PhotoCaptureDone(Ok(test_frame())));
        let (model, _) = transition(&config, model, Event::PhotoEncodeDone(Ok(vec![0xff, 0xd8])));

        assert_eq!(
            model.selected.as_ref().map(|s| s.name.as_str()),
            Some("camera_photo.jpg")
        );
    }

    #[test]
    fn test_pick_file_while_live_keeps_the_session() {
        let config = Config::default();

        let (model, effects) = transition(
            &config,
            live_model(),
            Event::DisplayEvent(DeviceDisplayEvent::PickFileRequested),
        );
        assert_eq!(effects, vec![Effect::OpenFilePicker]);
        assert!(matches!(model.camera, ModelCamera::Live(_)));
    }

    #[test]
    fn test_device_disconnect_releases_the_session() {
        let config = Config::default();

        let (model, effects) = transition(
            &config,
            live_model(),
            Event::CameraEvent(DeviceCameraEvent::Disconnected),
        );
        assert_eq!(model.camera, ModelCamera::Idle);
        assert_eq!(effects, vec![Effect::StopCamera]);

        let capturing = Model {
            camera: ModelCamera::Capturing(ModelCapturing::default()),
            selected: None,
        };
        let (model, effects) = transition(
            &config,
            capturing,
            Event::CameraEvent(DeviceCameraEvent::Disconnected),
        );
        assert_eq!(model.camera, ModelCamera::Idle);
        assert_eq!(effects, vec![Effect::StopCamera]);

        // Nothing was started yet while requesting, so nothing to stop.
        let requesting = Model {
            camera: ModelCamera::Requesting,
            selected: None,
        };
        let (model, effects) = transition(
            &config,
            requesting,
            Event::CameraEvent(DeviceCameraEvent::Disconnected),
        );
        assert_eq!(model.camera, ModelCamera::Idle);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_late_grant_after_teardown_releases_the_device() {
        let config = Config::default();
        let (model, _) = init();

        let (model, effects) = transition(&config, model, Event::CameraStartDone(Ok(())));

        assert_eq!(model.camera, ModelCamera::Idle);
        assert_eq!(effects, vec![Effect::StopCamera]);
    }
}
