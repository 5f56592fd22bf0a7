//! HTTP client for the evidence map backend.

use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;

use crate::types::{AppError, AppResult, FilterSelection, MapResponse, OptionsResponse};

/// Fetch dropdown values and the confidence categories found.
pub async fn fetch_options(backend_url: &str) -> AppResult<OptionsResponse> {
    let url = format!("{}/api/options", backend_url);
    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| AppError::Network(e.to_string()))?;

    decode(response).await
}

/// Fetch the filtered map, chart included.
pub async fn fetch_map(backend_url: &str, selection: &FilterSelection) -> AppResult<MapResponse> {
    let url = format!("{}/api/map", backend_url);
    let response = Request::get(&url)
        .query(selection.query_pairs())
        .send()
        .await
        .map_err(|e| AppError::Network(e.to_string()))?;

    decode(response).await
}

async fn decode<T: DeserializeOwned>(response: Response) -> AppResult<T> {
    if !response.ok() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(AppError::Server(format!(
            "({}) {}",
            response.status(),
            error_message(&body)
        )));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| AppError::Decode(e.to_string()))
}

/// Pull `error` out of a `{status: "error", error}` body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
        .unwrap_or_else(|| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_from_json_body() {
        assert_eq!(
            error_message(r#"{"status":"error","error":"Drawing error: boom"}"#),
            "Drawing error: boom"
        );
    }

    #[test]
    fn test_error_message_plain_text() {
        assert_eq!(error_message("Bad Gateway"), "Bad Gateway");
    }
}
