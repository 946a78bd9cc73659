// src/application/commands/camera_commands.rs
//
// Camera and face-attendance command handlers
//
// RULES:
// - The webview answers open requests and pushes frames without taking the
//   camera lock, so an open waiting on the webview never deadlocks
// - Closing abandons a pending open first, so it never queues behind a
//   permission prompt
// - Captures either return the photo or drop it into a page form field

use std::sync::Arc;

use tauri::State;
use uuid::Uuid;

use crate::application::dto::{CameraStatusDto, CaptureDto, CaptureTarget, FrameDto};
use crate::application::error_handling::ToErrorResponse;
use crate::application::state::AppState;
use crate::camera::{CameraCapture, CameraState, WebviewAnswer};
use crate::domain::{AttendanceKind, FaceAttendance};
use crate::error::{AppError, AppResult};
use crate::form::ChangeEvent;
use crate::notify::{with_toast, ToastMessages};

fn status(camera: &CameraCapture) -> CameraStatusDto {
    CameraStatusDto {
        state: camera.state(),
        error: camera.error_message().map(str::to_string),
    }
}

/// Follow the open flag of the camera dialog
#[tauri::command]
pub async fn camera_set_open(open: bool, state: State<'_, AppState>) -> Result<CameraStatusDto, String> {
    if !open {
        let abandoned = state.media.cancel_pending();
        if abandoned > 0 {
            log::debug!("abandoned {} pending camera open(s)", abandoned);
        }
    }

    let mut camera = state.camera.lock().await;

    match camera.set_open(open).await {
        Ok(()) => Ok(status(&camera)),
        // The inline message and toast carry the failure
        Err(e) => {
            log::debug!("camera stayed closed: {}", e);
            Ok(status(&camera))
        }
    }
}

#[tauri::command]
pub async fn camera_status(state: State<'_, AppState>) -> Result<CameraStatusDto, String> {
    if state.media.is_waiting() {
        return Ok(CameraStatusDto {
            state: CameraState::Opening,
            error: None,
        });
    }

    let camera = state.camera.lock().await;
    Ok(status(&camera))
}

/// The webview's reply to a `camera://open` request
#[tauri::command]
pub fn camera_webview_answer(
    request_id: Uuid,
    answer: WebviewAnswer,
    state: State<'_, AppState>,
) -> Result<(), String> {
    state
        .media
        .answer(request_id, answer)
        .map_err(AppError::from)
        .to_error_response()
}

#[tauri::command]
pub fn camera_push_frame(frame: FrameDto, state: State<'_, AppState>) -> Result<(), String> {
    let (stream_id, frame) = frame.into_frame().to_error_response()?;
    state.media.push_frame(stream_id, frame);
    Ok(())
}

/// Take a photo and close the camera
#[tauri::command]
pub async fn camera_capture(
    target: CaptureTarget,
    state: State<'_, AppState>,
) -> Result<CaptureDto, String> {
    let image = capture_image(&state).await.to_error_response()?;

    if let CaptureTarget::Field { page, field } = target {
        let page = state.host.page(page).to_error_response()?;
        page.lock().await.change(ChangeEvent::text(&field, &image));
    }

    Ok(CaptureDto { image })
}

async fn capture_image(state: &AppState) -> AppResult<String> {
    let mut camera = state.camera.lock().await;
    Ok(camera.capture()?)
}

/// Record a check-in or check-out by face.
///
/// Uses `image` when given, otherwise captures from the open camera.
#[tauri::command]
pub async fn face_attendance_recognize(
    kind: AttendanceKind,
    image: Option<String>,
    state: State<'_, AppState>,
) -> Result<FaceAttendance, String> {
    let image = match image {
        Some(image) => image,
        None => capture_image(&state).await.to_error_response()?,
    };

    let attendance = state.attendance.clone();
    let recognize = with_toast(
        state.notifier.clone(),
        ToastMessages::new(
            "Recognizing face...",
            "Attendance registered",
            "Face could not be recognized",
        ),
        move |(image, kind): (String, AttendanceKind)| {
            let attendance = Arc::clone(&attendance);
            async move { attendance.recognize(&image, kind).await }
        },
    );

    recognize((image, kind)).await.to_error_response()
}
