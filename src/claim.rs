//! Token reward claims
//!
//! The reward service is external: it takes `{hederaAccountId, score}` and
//! airdrops tokens proportional to the score. This module validates the
//! request before it leaves the client, interprets the service's reply, and
//! turns either into a message the player can read. Claim outcomes never
//! touch round state.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const INVALID_INPUT_TEXT: &str =
    "Please enter a valid Hedera Account ID (e.g. 0.0.X) and have a score greater than 0.";
const REJECTED_FALLBACK_TEXT: &str = "Failed to claim tokens. Please try again.";
const TRANSPORT_TEXT: &str = "An error occurred while communicating with the server.";

/// Errors from building, sending or reading a claim
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("invalid Hedera account id: {0:?}")]
    InvalidAccountId(String),

    #[error("score must be greater than zero")]
    NonPositiveScore,

    #[error("claim rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("malformed claim payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Hedera account id in `shard.realm.num` form (digits only)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountId(String);

impl AccountId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for AccountId {
    type Err = ClaimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('.').collect();
        let valid = parts.len() == 3
            && parts
                .iter()
                .all(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()));
        if valid {
            Ok(Self(s.to_string()))
        } else {
            Err(ClaimError::InvalidAccountId(s.to_string()))
        }
    }
}

impl TryFrom<String> for AccountId {
    type Error = ClaimError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AccountId> for String {
    fn from(id: AccountId) -> Self {
        id.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Body of `POST /api/claim-tokens`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimRequest {
    pub hedera_account_id: AccountId,
    pub score: u32,
}

impl ClaimRequest {
    /// Validate a claim for `score` to `account_id`
    pub fn new(account_id: &str, score: u32) -> Result<Self, ClaimError> {
        let hedera_account_id: AccountId = account_id.trim().parse()?;
        if score == 0 {
            return Err(ClaimError::NonPositiveScore);
        }
        Ok(Self {
            hedera_account_id,
            score,
        })
    }

    pub fn to_json(&self) -> Result<String, ClaimError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Successful airdrop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimReceipt {
    pub message: String,
    pub transaction_id: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Read the service's reply
///
/// 200 carries a receipt; anything else is a rejection whose `message` is
/// surfaced as-is when present.
pub fn interpret_response(status: u16, body: &str) -> Result<ClaimReceipt, ClaimError> {
    if status == 200 {
        return Ok(serde_json::from_str(body)?);
    }

    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .unwrap_or_else(|| REJECTED_FALLBACK_TEXT.to_string());
    Err(ClaimError::Rejected { status, message })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimMessageKind {
    Success,
    Error,
}

/// Player-facing outcome of a claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimMessage {
    #[serde(rename = "type")]
    pub kind: ClaimMessageKind,
    pub text: String,
}

impl ClaimMessage {
    pub fn from_result(result: &Result<ClaimReceipt, ClaimError>) -> Self {
        match result {
            Ok(receipt) => Self {
                kind: ClaimMessageKind::Success,
                text: format!("{} Tx ID: {}", receipt.message, receipt.transaction_id),
            },
            Err(err) => Self::from_error(err),
        }
    }

    pub fn from_error(err: &ClaimError) -> Self {
        let text = match err {
            ClaimError::InvalidAccountId(_) | ClaimError::NonPositiveScore => INVALID_INPUT_TEXT,
            ClaimError::Rejected { message, .. } => message.as_str(),
            ClaimError::Transport(_) | ClaimError::Decode(_) => TRANSPORT_TEXT,
        };
        Self {
            kind: ClaimMessageKind::Error,
            text: text.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind == ClaimMessageKind::Success
    }
}

/// POST a claim with the browser's `fetch`
#[cfg(target_arch = "wasm32")]
pub async fn submit_claim(endpoint: &str, request: &ClaimRequest) -> Result<ClaimReceipt, ClaimError> {
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Request, RequestInit, Response};

    let js_err = |e: JsValue| ClaimError::Transport(format!("{:?}", e));

    let body = request.to_json()?;
    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_body(&JsValue::from_str(&body));

    let req = Request::new_with_str_and_init(endpoint, &opts).map_err(js_err)?;
    req.headers()
        .set("Content-Type", "application/json")
        .map_err(js_err)?;

    let window = web_sys::window().ok_or_else(|| ClaimError::Transport("no window".into()))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&req))
        .await
        .map_err(js_err)?;
    let resp: Response = resp_value.dyn_into().map_err(js_err)?;
    let text = JsFuture::from(resp.text().map_err(js_err)?)
        .await
        .map_err(js_err)?
        .as_string()
        .unwrap_or_default();

    log::info!("Claim response status {}", resp.status());
    interpret_response(resp.status(), &text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_id_format() {
        assert!("0.0.12345".parse::<AccountId>().is_ok());
        assert!("12.345.6789".parse::<AccountId>().is_ok());
        assert!("0.0".parse::<AccountId>().is_err());
        assert!("0.0.1.2".parse::<AccountId>().is_err());
        assert!("0..1".parse::<AccountId>().is_err());
        assert!("0.0.x".parse::<AccountId>().is_err());
        assert!("".parse::<AccountId>().is_err());
    }

    #[test]
    fn test_request_requires_positive_score() {
        assert!(matches!(
            ClaimRequest::new("0.0.1", 0),
            Err(ClaimError::NonPositiveScore)
        ));
        assert!(matches!(
            ClaimRequest::new("bob", 10),
            Err(ClaimError::InvalidAccountId(_))
        ));
    }

    #[test]
    fn test_request_body_shape() {
        let req = ClaimRequest::new(" 0.0.5818470 ", 70).unwrap();
        let json: serde_json::Value = serde_json::from_str(&req.to_json().unwrap()).unwrap();
        assert_eq!(json["hederaAccountId"], "0.0.5818470");
        assert_eq!(json["score"], 70);
    }

    #[test]
    fn test_request_deserialize_validates_account() {
        let bad = r#"{"hederaAccountId": "abc", "score": 10}"#;
        assert!(serde_json::from_str::<ClaimRequest>(bad).is_err());
    }

    #[test]
    fn test_success_response() {
        let body = r#"{"message": "Successfully airdropped 70 tokens!", "transactionId": "0.0.2@123.456"}"#;
        let result = interpret_response(200, body);
        let message = ClaimMessage::from_result(&result);
        assert!(message.is_success());
        assert_eq!(
            message.text,
            "Successfully airdropped 70 tokens! Tx ID: 0.0.2@123.456"
        );
    }

    #[test]
    fn test_rejection_surfaces_server_message() {
        let result = interpret_response(400, r#"{"message": "Invalid or missing Hedera Account ID."}"#);
        match &result {
            Err(ClaimError::Rejected { status, message }) => {
                assert_eq!(*status, 400);
                assert_eq!(message, "Invalid or missing Hedera Account ID.");
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(!ClaimMessage::from_result(&result).is_success());
    }

    #[test]
    fn test_rejection_without_body_uses_fallback() {
        let result = interpret_response(500, "<html>oops</html>");
        assert_eq!(
            ClaimMessage::from_result(&result).text,
            REJECTED_FALLBACK_TEXT
        );
    }

    #[test]
    fn test_malformed_success_is_transport_error() {
        let result = interpret_response(200, "{}");
        assert!(matches!(result, Err(ClaimError::Decode(_))));
        assert_eq!(ClaimMessage::from_result(&result).text, TRANSPORT_TEXT);
    }
}
