// src/api/attendance.rs
//
// Face-recognition attendance: the captured camera frame is posted to the
// backend, which matches the face and records a check-in or check-out.

use reqwest::Method;
use serde_json::json;

use super::body::RequestBody;
use super::client::ApiClient;
use crate::domain::{AttendanceKind, FaceAttendance, Resource};
use crate::error::{AppError, AppResult};

pub struct FaceAttendanceClient {
    client: ApiClient,
}

impl FaceAttendanceClient {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// `image` must be a `data:image/jpeg;base64,` URL as produced by the camera
    pub async fn recognize(&self, image: &str, kind: AttendanceKind) -> AppResult<FaceAttendance> {
        if !image.starts_with("data:image/") {
            return Err(AppError::Validation(
                "Attendance photo must be an image data URL".to_string(),
            ));
        }

        let path = format!("{}/recognize/", FaceAttendance::ENDPOINT);
        let body = RequestBody::Json(json!({
            "image": image,
            "kind": kind.as_str(),
        }));

        let record: FaceAttendance = self.client.send(Method::POST, &path, body).await?;
        log::info!(
            "attendance {} recorded for {}",
            kind.as_str(),
            record.person_name.as_deref().unwrap_or("unknown person")
        );
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BackofficeConfig;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_recognize_posts_image() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/security/face-attendance/recognize/"))
            .and(body_partial_json(json!({"kind": "check_in"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": 11,
                "person_name": "Luis Rojas",
                "kind": "check_in",
                "confidence": 0.97
            })))
            .mount(&server)
            .await;

        let config = BackofficeConfig {
            api_base_url: server.uri(),
            ..Default::default()
        };
        let client = FaceAttendanceClient::new(ApiClient::new(&config).unwrap());

        let record = client
            .recognize("data:image/jpeg;base64,AAAA", AttendanceKind::CheckIn)
            .await
            .unwrap();

        assert_eq!(record.id, 11);
        assert_eq!(record.person_name.as_deref(), Some("Luis Rojas"));
    }

    #[tokio::test]
    async fn test_recognize_rejects_non_image() {
        let client = FaceAttendanceClient::new(ApiClient::new(&BackofficeConfig::default()).unwrap());
        let err = client
            .recognize("hello", AttendanceKind::CheckOut)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
