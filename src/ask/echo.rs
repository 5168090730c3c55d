// ABOUTME: Echo ask action: answers locally without a backend.
// ABOUTME: Used for offline runs and demos of the widget.

use async_trait::async_trait;

use super::{AskAction, AskError};

/// Ask action that repeats the question back.
#[derive(Debug, Default)]
pub struct EchoAction;

#[async_trait]
impl AskAction for EchoAction {
    async fn ask(&self, question: &str) -> Result<Option<String>, AskError> {
        Ok(Some(format!("You asked: {}", question)))
    }

    fn label(&self) -> String {
        "echo".to_string()
    }
}
