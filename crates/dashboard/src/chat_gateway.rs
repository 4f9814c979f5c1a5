//! Reachability probe for the external chat tool.
//!
//! Not part of the trials data flow: the chat view either redirects the browser to the chat
//! backend or explains why it cannot. The probe is one POST to the backend's health route
//! with an empty JSON body.

use serde_json::json;

/// Outcome of the reachability probe.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChatGateway {
    /// The backend answered; the view should redirect here.
    Redirect(String),
    /// The backend could not be used; the message carries a remediation hint.
    Unavailable(String),
}

/// Probe the chat backend at `base_url` and decide where the chat view should go.
pub async fn check(base_url: &str) -> ChatGateway {
    let base_url = base_url.trim_end_matches('/');
    let health_url = format!("{base_url}/mcp/health");

    let response = reqwest::Client::new()
        .post(&health_url)
        .json(&json!({}))
        .send()
        .await;

    match response {
        Ok(res) if res.status().is_success() => ChatGateway::Redirect(base_url.to_string()),
        Ok(res) => {
            tracing::warn!("chat backend health probe returned {}", res.status());
            ChatGateway::Unavailable(unhealthy_message())
        }
        Err(err) => {
            tracing::warn!("chat backend unreachable: {err}");
            ChatGateway::Unavailable(unreachable_message(base_url))
        }
    }
}

fn unhealthy_message() -> String {
    "Chat backend is not responding properly".to_string()
}

fn unreachable_message(base_url: &str) -> String {
    format!("Cannot connect to the chat backend. Please make sure it is running at {base_url}.")
}
