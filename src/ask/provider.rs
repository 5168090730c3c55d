// ABOUTME: Ask action factory: creates the right action based on config.
// ABOUTME: Supports convex and echo; convex without a deployment URL falls back to echo.

use std::sync::Arc;

use super::AskAction;
use super::convex::ConvexAction;
use super::echo::EchoAction;
use crate::config::AskConfig;

/// Create an ask action based on the provider name in config.
pub fn create_action(config: &AskConfig) -> anyhow::Result<Arc<dyn AskAction>> {
    match config.provider.as_str() {
        "convex" => {
            if config.deployment_url.trim().is_empty() {
                tracing::warn!(
                    "ask: no convex deployment URL configured, answering with the echo action"
                );
                return Ok(Arc::new(EchoAction));
            }
            let action = ConvexAction::from_config(config)?;
            Ok(Arc::new(action))
        }
        "echo" => Ok(Arc::new(EchoAction)),
        other => anyhow::bail!(
            "Unknown ask provider: '{}'. Expected: convex, echo",
            other
        ),
    }
}
