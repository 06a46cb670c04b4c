use std::time::Duration;

use reqwest::blocking::Client;

use crate::api::{
    Api, ApiError, ChatRequest, ChatResponse, PredictResponse, RecommendRequest,
    RecommendResponse, ScorePoint,
};
use crate::predict::form::FormSnapshot;

/// Blocking HTTP implementation of [`Api`]. Calls run on worker threads,
/// never on the event loop, so blocking here keeps the UI interactive.
pub struct HttpApi {
    client: Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn post<B: serde::Serialize, R: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.client.post(&url).json(body).send()?;
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }
        Ok(response.json()?)
    }
}

impl Api for HttpApi {
    fn predict(&self, snapshot: &FormSnapshot) -> Result<f64, ApiError> {
        let response: PredictResponse = self.post("/predict", snapshot)?;
        Ok(response.prediction)
    }

    fn recommend(&self, history: &[ScorePoint]) -> Result<String, ApiError> {
        let request = RecommendRequest {
            history: history.to_vec(),
        };
        let response: RecommendResponse = self.post("/recommend/ai", &request)?;
        Ok(response.recommendation)
    }

    fn chat(&self, request: &ChatRequest) -> Result<String, ApiError> {
        let response: ChatResponse = self.post("/recommend/chat", request)?;
        Ok(response.answer)
    }
}
