use crate::prelude::{eprintln, *};
use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use bfhl_core::envelope::{self, OperationCode, ServiceInfo};
use serde_json::Value;
use std::any::Any;
use std::sync::Arc;

use super::AppState;

/// `POST /bfhl`
///
/// The body is parsed here rather than through the `Json` extractor so that a
/// malformed body gets the same failure envelope as a missing `data` array.
pub async fn process(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    match process_body(&state, &body) {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

fn process_body(state: &AppState, body: &[u8]) -> Result<Response, Error> {
    let payload: Value = serde_json::from_slice(body)
        .map_err(|e| Error::InvalidInputShape(f!("malformed JSON body: {e}")))?;

    if state.verbose {
        eprintln!("Received: {payload}");
    }

    let envelope = envelope::respond(&payload, &state.identity)?;

    log::info!(
        "classified request: odd={} even={} alphabets={} special={} sum={}",
        envelope.result.odd_numbers.len(),
        envelope.result.even_numbers.len(),
        envelope.result.alphabets.len(),
        envelope.result.special_characters.len(),
        envelope.result.sum
    );

    let body = serde_json::to_vec(&envelope)
        .map_err(|e| Error::InternalFault(f!("failed to serialize response: {e}")))?;

    if state.verbose {
        eprintln!("Sending: {}", String::from_utf8_lossy(&body));
    }

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response())
}

/// `GET /bfhl`
pub async fn operation_code() -> Json<OperationCode> {
    Json(OperationCode::default())
}

/// `GET /`
pub async fn service_info() -> Json<ServiceInfo> {
    Json(envelope::service_info())
}

pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    Error::InternalFault(f!("handler panicked: {detail}")).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bfhl_core::envelope::Identity;
    use serde_json::json;

    fn state() -> Arc<AppState> {
        Arc::new(AppState {
            identity: Identity {
                user_id: "jane_doe_17091999".to_string(),
                email: "jane@example.com".to_string(),
                roll_number: "XYZ789".to_string(),
            },
            verbose: false,
        })
    }

    async fn read_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn post(body: &str) -> (StatusCode, Value) {
        let response = process(State(state()), Bytes::from(body.to_string())).await;
        let status = response.status();
        (status, read_json(response).await)
    }

    // ============================================================================
    // POST /bfhl tests
    // ============================================================================

    #[tokio::test]
    async fn test_process_mixed_tokens() {
        let (status, body) = post(r#"{"data": ["a","1","334","4","R","$"]}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "is_success": true,
                "user_id": "jane_doe_17091999",
                "email": "jane@example.com",
                "roll_number": "XYZ789",
                "odd_numbers": ["1"],
                "even_numbers": ["334", "4"],
                "alphabets": ["A", "R"],
                "special_characters": ["$"],
                "sum": "339",
                "concat_string": "Ra"
            })
        );
    }

    #[tokio::test]
    async fn test_process_only_alphabetic() {
        let (status, body) = post(r#"{"data": ["A","ABcD","DOE"]}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["alphabets"], json!(["A", "ABCD", "DOE"]));
        assert_eq!(body["sum"], json!("0"));
        assert_eq!(body["concat_string"], json!("EoDdCbAa"));
    }

    #[tokio::test]
    async fn test_process_empty_array() {
        let (status, body) = post(r#"{"data": []}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["odd_numbers"], json!([]));
        assert_eq!(body["even_numbers"], json!([]));
        assert_eq!(body["alphabets"], json!([]));
        assert_eq!(body["special_characters"], json!([]));
        assert_eq!(body["sum"], json!("0"));
        assert_eq!(body["concat_string"], json!(""));
    }

    #[tokio::test]
    async fn test_process_rejects_non_array_data() {
        for raw in [r#"{"data": "abc"}"#, r#"{}"#, r#"{"data": null}"#, r#"["a"]"#] {
            let (status, body) = post(raw).await;

            assert_eq!(status, StatusCode::BAD_REQUEST, "{raw} should be rejected");
            assert_eq!(
                body,
                json!({
                    "is_success": false,
                    "message": "Invalid input. 'data' should be an array."
                })
            );
        }
    }

    #[tokio::test]
    async fn test_process_rejects_malformed_json() {
        let (status, body) = post("not json").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["is_success"], json!(false));
    }

    #[tokio::test]
    async fn test_process_sets_json_content_type() {
        let response = process(State(state()), Bytes::from_static(br#"{"data": ["1"]}"#)).await;

        assert_eq!(
            response
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok()),
            Some("application/json")
        );
    }

    // ============================================================================
    // GET handler tests
    // ============================================================================

    #[tokio::test]
    async fn test_operation_code() {
        let Json(body) = operation_code().await;
        assert_eq!(body.operation_code, 1);
    }

    #[tokio::test]
    async fn test_service_info() {
        let Json(body) = service_info().await;

        assert_eq!(body.message, "BFHL API is running!");
        assert_eq!(body.endpoints.len(), 2);
    }

    // ============================================================================
    // Fault handling tests
    // ============================================================================

    #[tokio::test]
    async fn test_handle_panic_hides_detail() {
        let response = handle_panic(Box::new("secret detail".to_string()));

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = read_json(response).await;
        assert_eq!(
            body,
            json!({ "is_success": false, "message": "Internal server error" })
        );
    }
}
