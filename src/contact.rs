// src/contact.rs
// =============================================================================
// The contact form: POSTs the form fields as a JSON object to a
// form-submission service and reports the service's answer.
//
// Outcomes:
// - HTTP 200           -> Sent(message from the service)
// - any other status   -> Rejected(message from the service)
// - transport failure or an unreadable body -> Failed
//
// One attempt only; the form is cleared afterwards either way.
// =============================================================================

use anyhow::{anyhow, Result};
use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{info, warn};

/// Shown when the service could not be reached at all
pub const FALLBACK_MESSAGE: &str = "Something went wrong!";
/// Shown while the request is in flight
pub const SENDING_MESSAGE: &str = "Sending...";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "message", rename_all = "snake_case")]
pub enum ContactOutcome {
    Sent(String),
    Rejected(String),
    Failed,
}

impl ContactOutcome {
    pub fn message(&self) -> &str {
        match self {
            ContactOutcome::Sent(msg) | ContactOutcome::Rejected(msg) => msg,
            ContactOutcome::Failed => FALLBACK_MESSAGE,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ContactOutcome::Sent(_))
    }
}

#[derive(Debug, Deserialize)]
struct FormResponse {
    #[serde(default)]
    message: String,
}

// Parses "key=value" pairs from the command line
pub fn parse_field(raw: &str) -> Result<(String, String)> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(anyhow!("Invalid form field '{}', expected key=value", raw)),
    }
}

// Field name/value pairs as a JSON object. A repeated name keeps its last value.
pub fn form_body(fields: &[(String, String)]) -> Value {
    let mut object = Map::new();
    for (key, value) in fields {
        object.insert(key.clone(), Value::String(value.clone()));
    }
    Value::Object(object)
}

pub async fn submit_contact(client: &Client, endpoint: &str, fields: &[(String, String)]) -> ContactOutcome {
    let response = client
        .post(endpoint)
        .header(ACCEPT, "application/json")
        .json(&form_body(fields))
        .send()
        .await;

    let response = match response {
        Ok(response) => response,
        Err(e) => {
            warn!(error = %e, "contact form request failed");
            return ContactOutcome::Failed;
        }
    };

    let status = response.status();
    match response.json::<FormResponse>().await {
        Ok(body) if status == StatusCode::OK => {
            info!("contact form accepted");
            ContactOutcome::Sent(body.message)
        }
        Ok(body) => {
            warn!(status = status.as_u16(), message = %body.message, "contact form rejected");
            ContactOutcome::Rejected(body.message)
        }
        Err(e) => {
            warn!(status = status.as_u16(), error = %e, "contact form response unreadable");
            ContactOutcome::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::test_server::{closed_port, serve_once};

    fn fields() -> Vec<(String, String)> {
        vec![
            ("name".to_string(), "Ada".to_string()),
            ("email".to_string(), "ada@example.com".to_string()),
            ("message".to_string(), "Hello = world".to_string()),
        ]
    }

    #[test]
    fn test_parse_field() {
        assert_eq!(
            parse_field("message=a=b").unwrap(),
            ("message".to_string(), "a=b".to_string())
        );
        assert!(parse_field("novalue").is_err());
        assert!(parse_field("=value").is_err());
    }

    #[test]
    fn test_form_body() {
        let body = form_body(&fields());
        assert_eq!(body["name"], "Ada");
        assert_eq!(body["message"], "Hello = world");
    }

    #[tokio::test]
    async fn test_accepted_submission() {
        let endpoint = serve_once("200 OK", r#"{"success":true,"message":"Email sent successfully!"}"#).await;
        let outcome = submit_contact(&Client::new(), &endpoint, &fields()).await;
        assert_eq!(outcome, ContactOutcome::Sent("Email sent successfully!".into()));
        assert!(outcome.is_success());
    }

    #[tokio::test]
    async fn test_rejected_submission_keeps_message() {
        let endpoint = serve_once("400 Bad Request", r#"{"success":false,"message":"Invalid access key"}"#).await;
        let outcome = submit_contact(&Client::new(), &endpoint, &fields()).await;
        assert_eq!(outcome, ContactOutcome::Rejected("Invalid access key".into()));
        assert_eq!(outcome.message(), "Invalid access key");
    }

    #[tokio::test]
    async fn test_unreachable_service() {
        let outcome = submit_contact(&Client::new(), &closed_port().await, &fields()).await;
        assert_eq!(outcome, ContactOutcome::Failed);
        assert_eq!(outcome.message(), "Something went wrong!");
    }
}
