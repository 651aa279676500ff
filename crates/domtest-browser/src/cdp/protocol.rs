//! CDP wire messages and the handful of domain types the page driver reads.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::CdpError;

/// Outgoing command. `session_id` routes it to an attached page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Command<'a> {
    pub id: u64,
    pub method: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<&'a str>,
}

/// Anything the browser sends: a command reply (has `id`) or an event.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Incoming {
    pub id: Option<u64>,
    pub result: Option<Value>,
    pub error: Option<ResponseError>,
    pub method: Option<String>,
    pub session_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ResponseError {
    pub code: i64,
    pub message: String,
}

impl Incoming {
    /// Split a reply into its request id and outcome; events yield `None`.
    pub fn into_reply(self) -> Option<(u64, Result<Value, CdpError>)> {
        let id = self.id?;
        let outcome = match self.error {
            Some(e) => Err(CdpError::Protocol {
                code: e.code,
                message: e.message,
            }),
            None => Ok(self.result.unwrap_or(Value::Null)),
        };
        Some((id, outcome))
    }
}

/// A target as listed by `/json/list` and `/json/new`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub url: String,
}

/// `/json/version`. Chrome mixes key styles here.
#[derive(Debug, Clone, Deserialize)]
pub struct VersionInfo {
    #[serde(rename = "Browser")]
    pub browser: String,
    #[serde(rename = "Protocol-Version")]
    pub protocol_version: String,
    #[serde(rename = "webSocketDebuggerUrl")]
    pub web_socket_debugger_url: String,
}

/// `DOM.getBoxModel` result. Quads are eight numbers (four x,y corners) in
/// CSS pixels relative to the main frame viewport, also for nodes inside
/// same-process iframes.
#[derive(Debug, Clone, Deserialize)]
pub struct BoxModel {
    pub content: Vec<f64>,
    pub border: Vec<f64>,
    pub width: i64,
    pub height: i64,
}

impl BoxModel {
    /// Centre of the content quad; `None` for collapsed boxes.
    pub fn center(&self) -> Option<(f64, f64)> {
        if self.content.len() < 8 || self.width == 0 || self.height == 0 {
            return None;
        }
        let xs = self.content.iter().step_by(2).take(4).sum::<f64>();
        let ys = self.content.iter().skip(1).step_by(2).take(4).sum::<f64>();
        Some((xs / 4.0, ys / 4.0))
    }
}

/// Handle or value returned by the Runtime domain.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteObject {
    #[serde(rename = "type")]
    pub object_type: String,
    pub subtype: Option<String>,
    pub value: Option<Value>,
    pub description: Option<String>,
    pub object_id: Option<String>,
}

impl RemoteObject {
    /// `null`/`undefined` results carry no object id.
    pub fn is_nullish(&self) -> bool {
        self.object_type == "undefined"
            || self.subtype.as_deref() == Some("null")
            || self.object_id.is_none()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExceptionDetails {
    pub text: String,
    pub exception: Option<RemoteObject>,
}

impl ExceptionDetails {
    /// Most specific message available, e.g. `SyntaxError: '..' is not a valid selector`.
    pub fn message(&self) -> String {
        self.exception
            .as_ref()
            .and_then(|e| e.description.as_deref())
            .and_then(|d| d.lines().next())
            .unwrap_or(&self.text)
            .to_string()
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    None,
    Left,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MouseEventType {
    MousePressed,
    MouseReleased,
    MouseMoved,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScreenshotFormat {
    Jpeg,
    Png,
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
