// ABOUTME: Convex ask action: runs a Convex action over the deployment's HTTP API.
// ABOUTME: Thin reqwest wrapper around POST /api/action; response parsing is a pure function.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{AskAction, AskError};
use crate::config::AskConfig;

/// Ask action backed by a Convex deployment.
pub struct ConvexAction {
    http: reqwest::Client,
    endpoint: String,
    action: String,
    auth_token: Option<String>,
}

impl ConvexAction {
    pub fn new(
        deployment_url: &str,
        action: &str,
        timeout: Option<Duration>,
        connect_timeout: Duration,
        auth_token: Option<String>,
    ) -> Result<Self, AskError> {
        let mut builder = reqwest::Client::builder().connect_timeout(connect_timeout);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| AskError::ClientBuild(e.to_string()))?;
        Ok(Self {
            http,
            endpoint: format!("{}/api/action", deployment_url.trim_end_matches('/')),
            action: action.to_string(),
            auth_token,
        })
    }

    /// Build from config, reading the bearer token from the configured env var.
    pub fn from_config(config: &AskConfig) -> Result<Self, AskError> {
        let timeout =
            (config.timeout_seconds > 0).then(|| Duration::from_secs(config.timeout_seconds));
        let auth_token = std::env::var(&config.auth_token_env)
            .ok()
            .filter(|s| !s.is_empty());
        Self::new(
            &config.deployment_url,
            &config.action,
            timeout,
            Duration::from_secs(config.connect_timeout_seconds),
            auth_token,
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl AskAction for ConvexAction {
    async fn ask(&self, question: &str) -> Result<Option<String>, AskError> {
        let body = ActionRequest {
            path: &self.action,
            args: ActionArgs { question },
            format: "json",
        };

        let mut request = self.http.post(&self.endpoint).json(&body);
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(map_transport_error)?;

        parse_response(status, &text)
    }

    fn label(&self) -> String {
        format!("convex:{}", self.action)
    }
}

fn map_transport_error(e: reqwest::Error) -> AskError {
    if e.is_timeout() {
        AskError::Timeout
    } else {
        AskError::Network(e.to_string())
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
struct ActionRequest<'a> {
    path: &'a str,
    args: ActionArgs<'a>,
    format: &'static str,
}

#[derive(Serialize)]
struct ActionArgs<'a> {
    question: &'a str,
}

#[derive(Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
enum ActionResponse {
    Success {
        #[serde(default)]
        value: Value,
    },
    #[serde(rename_all = "camelCase")]
    Error {
        #[serde(default)]
        error_message: String,
    },
}

// =============================================================================
// PARSING
// =============================================================================

/// Interpret an HTTP status and body from `/api/action`.
fn parse_response(status: u16, body: &str) -> Result<Option<String>, AskError> {
    let parsed: ActionResponse = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(_) if !(200..300).contains(&status) => {
            return Err(AskError::Rejected {
                status,
                message: body.chars().take(200).collect(),
            });
        }
        Err(e) => return Err(AskError::Decode(e.to_string())),
    };

    match parsed {
        ActionResponse::Success { value } => match value {
            Value::String(answer) => Ok(Some(answer)),
            Value::Null => Ok(None),
            other => Err(AskError::Decode(format!(
                "expected string answer, got {}",
                json_kind(&other)
            ))),
        },
        ActionResponse::Error { error_message } => Err(AskError::Rejected {
            status,
            message: error_message,
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
