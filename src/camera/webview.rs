// src/camera/webview.rs
//
// Webview media bridge
//
// The webview owns `getUserMedia`. This side asks it to open a stream,
// waits for the answer, keeps the latest frame the webview pushes and asks
// it to stop the tracks when the stream is released.
//
// RULES:
// - An open request waits at most `open_timeout`; its pending entry goes
//   away on answer, timeout, cancellation or when the waiting future drops
// - A grant that arrives with nobody waiting is stopped straight away

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;
use uuid::Uuid;

use super::device::{CameraError, MediaDevices, MediaStream, VideoConstraints, VideoFrame};

/// Outgoing requests to the webview
pub trait CameraChannel: Send + Sync {
    fn request_open(&self, request_id: Uuid, constraints: &VideoConstraints);
    fn request_stop(&self, stream_id: Uuid);
}

/// The webview's answer to an open request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WebviewAnswer {
    Granted { stream_id: Uuid, track_count: usize },
    Denied { reason: String },
}

type FrameSlots = Arc<Mutex<HashMap<Uuid, VideoFrame>>>;
type PendingOpens = Mutex<HashMap<Uuid, oneshot::Sender<WebviewAnswer>>>;

pub const DEFAULT_OPEN_TIMEOUT: Duration = Duration::from_secs(30);

pub struct WebviewMediaDevices {
    channel: Arc<dyn CameraChannel>,
    pending: PendingOpens,
    frames: FrameSlots,
    open_timeout: Duration,
}

impl WebviewMediaDevices {
    pub fn new(channel: Arc<dyn CameraChannel>) -> Self {
        Self {
            channel,
            pending: Mutex::new(HashMap::new()),
            frames: Arc::new(Mutex::new(HashMap::new())),
            open_timeout: DEFAULT_OPEN_TIMEOUT,
        }
    }

    pub fn with_open_timeout(mut self, timeout: Duration) -> Self {
        self.open_timeout = timeout;
        self
    }

    /// Deliver the webview's answer to a pending open request
    pub fn answer(&self, request_id: Uuid, answer: WebviewAnswer) -> Result<(), CameraError> {
        let sender = self
            .pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(&request_id);

        let unclaimed = match sender {
            Some(sender) => match sender.send(answer) {
                Ok(()) => return Ok(()),
                Err(answer) => answer,
            },
            None => answer,
        };

        if let WebviewAnswer::Granted { stream_id, .. } = unclaimed {
            log::info!("stopping camera stream {} granted after its request ended", stream_id);
            self.channel.request_stop(stream_id);
        }

        Err(CameraError::Unavailable(format!(
            "camera request {} is no longer waiting",
            request_id
        )))
    }

    /// Abandon every open request still waiting on the webview.
    ///
    /// Waiters resolve with `CameraError::Cancelled`. Returns how many there were.
    pub fn cancel_pending(&self) -> usize {
        let abandoned: Vec<_> = self
            .pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .drain()
            .collect();

        abandoned.len()
    }

    /// Whether an open request is waiting on the webview
    pub fn is_waiting(&self) -> bool {
        !self
            .pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .is_empty()
    }

    /// Store the newest frame of a live stream
    pub fn push_frame(&self, stream_id: Uuid, frame: VideoFrame) {
        self.frames
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(stream_id, frame);
    }
}

#[async_trait]
impl MediaDevices for WebviewMediaDevices {
    async fn get_user_media(
        &self,
        constraints: &VideoConstraints,
    ) -> Result<Box<dyn MediaStream>, CameraError> {
        let request_id = Uuid::new_v4();
        let (tx, rx) = oneshot::channel();

        self.pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(request_id, tx);
        let _entry = PendingEntry {
            pending: &self.pending,
            request_id,
        };
        self.channel.request_open(request_id, constraints);

        let answer = tokio::time::timeout(self.open_timeout, rx)
            .await
            .map_err(|_| {
                log::warn!("camera request {} got no answer in {:?}", request_id, self.open_timeout);
                CameraError::Timeout(self.open_timeout.as_secs())
            })?;

        match answer {
            Ok(WebviewAnswer::Granted {
                stream_id,
                track_count,
            }) => Ok(Box::new(WebviewStream {
                stream_id,
                track_count,
                frames: self.frames.clone(),
                channel: self.channel.clone(),
            })),
            Ok(WebviewAnswer::Denied { reason }) => Err(CameraError::PermissionDenied(reason)),
            Err(_) => Err(CameraError::Cancelled),
        }
    }
}

/// Removes a request from the pending map however the wait ends
struct PendingEntry<'a> {
    pending: &'a PendingOpens,
    request_id: Uuid,
}

impl Drop for PendingEntry<'_> {
    fn drop(&mut self) {
        self.pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(&self.request_id);
    }
}

struct WebviewStream {
    stream_id: Uuid,
    track_count: usize,
    frames: FrameSlots,
    channel: Arc<dyn CameraChannel>,
}

impl MediaStream for WebviewStream {
    fn track_count(&self) -> usize {
        self.track_count
    }

    fn current_frame(&mut self) -> Result<VideoFrame, CameraError> {
        if self.track_count == 0 {
            return Err(CameraError::NotStreaming);
        }

        self.frames
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(&self.stream_id)
            .cloned()
            .ok_or(CameraError::FrameUnavailable)
    }

    fn stop_tracks(&mut self) {
        if self.track_count == 0 {
            return;
        }

        self.track_count = 0;
        self.frames
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(&self.stream_id);
        self.channel.request_stop(self.stream_id);
    }
}

impl Drop for WebviewStream {
    fn drop(&mut self) {
        self.stop_tracks();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[derive(Default)]
    struct RecordingChannel {
        opened: Mutex<Vec<(Uuid, VideoConstraints)>>,
        stopped: Mutex<Vec<Uuid>>,
    }

    impl CameraChannel for RecordingChannel {
        fn request_open(&self, request_id: Uuid, constraints: &VideoConstraints) {
            self.opened.lock().unwrap().push((request_id, constraints.clone()));
        }

        fn request_stop(&self, stream_id: Uuid) {
            self.stopped.lock().unwrap().push(stream_id);
        }
    }

    async fn wait_for_request(channel: &RecordingChannel) -> Uuid {
        for _ in 0..100 {
            if let Some((id, _)) = channel.opened.lock().unwrap().first() {
                return *id;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("no open request reached the webview");
    }

    #[tokio::test]
    async fn test_granted_stream_serves_frames_and_stops_once() {
        let channel = Arc::new(RecordingChannel::default());
        let devices = Arc::new(WebviewMediaDevices::new(channel.clone()));

        let opener = {
            let devices = devices.clone();
            tokio::spawn(async move { devices.get_user_media(&VideoConstraints::default()).await })
        };

        let request_id = wait_for_request(&channel).await;
        let stream_id = Uuid::new_v4();
        devices
            .answer(request_id, WebviewAnswer::Granted { stream_id, track_count: 1 })
            .unwrap();

        let mut stream = opener.await.unwrap().unwrap();
        assert!(matches!(stream.current_frame(), Err(CameraError::FrameUnavailable)));

        let frame = VideoFrame {
            width: 1,
            height: 1,
            rgba: vec![1, 2, 3, 255],
        };
        devices.push_frame(stream_id, frame.clone());
        assert_eq!(stream.current_frame().unwrap(), frame);

        stream.stop_tracks();
        drop(stream);
        assert_eq!(channel.stopped.lock().unwrap().as_slice(), &[stream_id]);
    }

    #[tokio::test]
    async fn test_denied_answer_is_permission_error() {
        let channel = Arc::new(RecordingChannel::default());
        let devices = Arc::new(WebviewMediaDevices::new(channel.clone()));

        let opener = {
            let devices = devices.clone();
            tokio::spawn(async move { devices.get_user_media(&VideoConstraints::default()).await })
        };

        let request_id = wait_for_request(&channel).await;
        devices
            .answer(
                request_id,
                WebviewAnswer::Denied {
                    reason: "NotAllowedError".into(),
                },
            )
            .unwrap();

        let result = opener.await.unwrap();
        assert!(matches!(result, Err(CameraError::PermissionDenied(_))));
        assert!(channel.stopped.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unanswered_open_times_out_and_forgets_request() {
        let channel = Arc::new(RecordingChannel::default());
        let devices = WebviewMediaDevices::new(channel.clone())
            .with_open_timeout(Duration::from_millis(20));

        let result = devices.get_user_media(&VideoConstraints::default()).await;

        assert!(matches!(result, Err(CameraError::Timeout(_))));
        assert!(!devices.is_waiting());
        assert_eq!(channel.opened.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_grant_after_timeout_stops_the_stream() {
        let channel = Arc::new(RecordingChannel::default());
        let devices = WebviewMediaDevices::new(channel.clone())
            .with_open_timeout(Duration::from_millis(20));

        let result = devices.get_user_media(&VideoConstraints::default()).await;
        assert!(result.is_err());

        let request_id = channel.opened.lock().unwrap()[0].0;
        let stream_id = Uuid::new_v4();
        let late = devices.answer(request_id, WebviewAnswer::Granted { stream_id, track_count: 1 });

        assert!(late.is_err());
        assert_eq!(channel.stopped.lock().unwrap().as_slice(), &[stream_id]);
    }

    #[tokio::test]
    async fn test_cancel_pending_releases_the_waiter() {
        let channel = Arc::new(RecordingChannel::default());
        let devices = Arc::new(WebviewMediaDevices::new(channel.clone()));

        let opener = {
            let devices = devices.clone();
            tokio::spawn(async move { devices.get_user_media(&VideoConstraints::default()).await })
        };

        wait_for_request(&channel).await;
        assert!(devices.is_waiting());
        assert_eq!(devices.cancel_pending(), 1);

        let result = opener.await.unwrap();
        assert!(matches!(result, Err(CameraError::Cancelled)));
        assert!(!devices.is_waiting());
    }

    #[tokio::test]
    async fn test_dropped_wait_forgets_request() {
        let channel = Arc::new(RecordingChannel::default());
        let devices = Arc::new(WebviewMediaDevices::new(channel.clone()));

        let opener = {
            let devices = devices.clone();
            tokio::spawn(async move { devices.get_user_media(&VideoConstraints::default()).await })
        };

        wait_for_request(&channel).await;
        opener.abort();
        let _ = opener.await;

        assert!(!devices.is_waiting());
    }

    #[test]
    fn test_unknown_answer_is_rejected() {
        let devices = WebviewMediaDevices::new(Arc::new(RecordingChannel::default()));
        let result = devices.answer(
            Uuid::new_v4(),
            WebviewAnswer::Denied {
                reason: "late".into(),
            },
        );
        assert!(result.is_err());
    }
}
