//! Scripted generation driver for testing.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use storyboard_board::BoardEvent;
use storyboard_config::StoryboardConfig;
use storyboard_core::{GenerateRequest, GenerateResponse, ImageData, Output, Part};
use storyboard_error::{GeminiError, GeminiErrorKind, StoryboardResult};
use storyboard_interface::GenerationDriver;
use tokio::sync::mpsc::UnboundedReceiver;

/// A single scripted reply.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Reply with text
    Text(String),
    /// Reply with an image
    Image(ImageData),
    /// Reply with no outputs
    Empty,
    /// Fail with the given error
    Error(GeminiErrorKind),
}

type Responder = dyn Fn(&GenerateRequest, usize) -> MockResponse + Send + Sync;

/// Mock driver that answers from a responder and records every request.
///
/// With an event receiver attached, board events received so far are drained
/// into the log before each request is recorded, so the log shows the exact
/// interleaving of state updates and outgoing requests.
#[derive(Clone)]
pub struct MockDriver {
    responder: Arc<Responder>,
    requests: Arc<Mutex<Vec<GenerateRequest>>>,
    log: Arc<Mutex<Vec<String>>>,
    events: Arc<Mutex<Option<UnboundedReceiver<BoardEvent>>>>,
}

impl MockDriver {
    /// Answer each request with `responder(request, call_index)`.
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&GenerateRequest, usize) -> MockResponse + Send + Sync + 'static,
    {
        Self {
            responder: Arc::new(responder),
            requests: Arc::new(Mutex::new(Vec::new())),
            log: Arc::new(Mutex::new(Vec::new())),
            events: Arc::new(Mutex::new(None)),
        }
    }

    /// Answer requests from a fixed sequence, failing once it runs out.
    pub fn sequence(responses: Vec<MockResponse>) -> Self {
        Self::new(move |_, call| {
            responses.get(call).cloned().unwrap_or_else(|| {
                MockResponse::Error(GeminiErrorKind::ApiRequest(format!(
                    "Mock sequence exhausted (call {} beyond {} responses)",
                    call + 1,
                    responses.len()
                )))
            })
        })
    }

    /// Always fail.
    pub fn failing() -> Self {
        Self::new(|_, _| MockResponse::Error(GeminiErrorKind::ApiRequest("offline".to_string())))
    }

    /// Drain board events from `receiver` into the log on every call.
    pub fn attach_events(&self, receiver: UnboundedReceiver<BoardEvent>) {
        *self.events.lock().unwrap() = Some(receiver);
    }

    /// Every request received so far.
    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of generate() calls.
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Interleaved event and request log.
    pub fn log(&self) -> Vec<String> {
        self.drain_events();
        self.log.lock().unwrap().clone()
    }

    fn drain_events(&self) {
        let mut events = self.events.lock().unwrap();
        if let Some(receiver) = events.as_mut() {
            let mut log = self.log.lock().unwrap();
            while let Ok(event) = receiver.try_recv() {
                log.push(match event {
                    BoardEvent::ScenesCreated(n) => format!("created {}", n),
                    BoardEvent::SceneUpdated { index, scene } => {
                        format!("updated {} {}", index, scene.status())
                    }
                    BoardEvent::ReferenceSynthesized(kind) => format!("synthesized {}", kind),
                });
            }
        }
    }
}

#[async_trait]
impl GenerationDriver for MockDriver {
    async fn generate(&self, req: &GenerateRequest) -> StoryboardResult<GenerateResponse> {
        tokio::time::sleep(tokio::time::Duration::from_millis(1)).await;

        self.drain_events();
        let call = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(req.clone());
            requests.len() - 1
        };
        self.log
            .lock()
            .unwrap()
            .push(format!("request {}", request_text(req)));

        match (self.responder)(req, call) {
            MockResponse::Text(text) => Ok(GenerateResponse::new(vec![Output::Text(text)])),
            MockResponse::Image(image) => Ok(GenerateResponse::new(vec![Output::Image(image)])),
            MockResponse::Empty => Ok(GenerateResponse::new(Vec::new())),
            MockResponse::Error(kind) => Err(GeminiError::new(kind).into()),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

/// First text part of a request.
pub fn request_text(req: &GenerateRequest) -> String {
    req.parts()
        .iter()
        .find_map(Part::as_text)
        .unwrap_or_default()
        .to_string()
}

/// A distinguishable PNG payload.
pub fn image(tag: u8) -> ImageData {
    ImageData::png(vec![0x89, tag])
}

/// Bundled configuration.
pub fn test_config() -> StoryboardConfig {
    StoryboardConfig::bundled().expect("bundled config parses")
}
