pub mod http;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::advice::chat::ChatTurn;
use crate::predict::form::FormSnapshot;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server returned {0}")]
    Status(reqwest::StatusCode),
}

/// One history entry as the advice endpoints see it: the result value only.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ScorePoint {
    pub result: f64,
}

#[derive(Debug, Deserialize)]
pub struct PredictResponse {
    pub prediction: f64,
}

#[derive(Debug, Serialize)]
pub struct RecommendRequest {
    pub history: Vec<ScorePoint>,
}

#[derive(Debug, Deserialize)]
pub struct RecommendResponse {
    pub recommendation: String,
}

#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub history: Vec<ScorePoint>,
    pub chat_history: Vec<ChatTurn>,
    pub question: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub answer: String,
}

/// Seam between the app and the prediction service. The app only ever talks
/// through this trait; worker threads hold an `Arc<dyn Api>` and post results
/// back over the event channel.
pub trait Api: Send + Sync {
    fn predict(&self, snapshot: &FormSnapshot) -> Result<f64, ApiError>;
    fn recommend(&self, history: &[ScorePoint]) -> Result<String, ApiError>;
    fn chat(&self, request: &ChatRequest) -> Result<String, ApiError>;
}
