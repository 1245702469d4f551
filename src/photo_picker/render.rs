use crate::device_display::interface::View;
use crate::photo_picker::core::{Model, ModelCamera};
use crate::photo_picker::main::PhotoPicker;

impl PhotoPicker {
    pub fn render(&self, model: &Model) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let view = build_view(model);
        self.device_display.lock().unwrap().render(&view)
    }
}

/// Project the model into what the display shows. Control visibility is
/// derived from the camera state alone; the preview mirrors the selection.
pub fn build_view(model: &Model) -> View {
    let (live_frame, show_open_camera, show_camera, status_line) = match &model.camera {
        ModelCamera::Idle => (None, true, false, None),
        ModelCamera::Requesting => (None, true, false, Some("Starting camera...".to_string())),
        ModelCamera::Live(live) => (live.live_frame.clone(), false, true, None),
        ModelCamera::Capturing(capturing) => (
            capturing.frame.clone(),
            false,
            true,
            Some("Taking photo...".to_string()),
        ),
    };

    View {
        preview: model.selected.as_ref().map(|selected| selected.image.clone()),
        live_frame,
        show_open_camera,
        show_camera,
        attached_file: model
            .selected
            .as_ref()
            .map(|selected| format!("{} ({})", selected.name, selected.mime)),
        status_line,
    }
}
