use jokes_core::{Joke, JokeResponse};
use serde_json::Value;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("malformed joke response: {0}")]
    Malformed(String),
    #[error("provider reported an error: {message}")]
    Provider { message: String },
    #[error("response declares {declared} jokes but carries {actual}")]
    AmountMismatch { declared: usize, actual: usize },
}

/// Decode a provider body into a batch of jokes.
///
/// Accepts the `{error, amount, jokes}` envelope and the bare joke object the
/// provider sends when a single joke is requested. An envelope flagged with
/// `error: true` or whose `amount` disagrees with its `jokes` is rejected.
pub fn decode_response(bytes: &[u8]) -> Result<JokeResponse, DecodeError> {
    let value: Value = serde_json::from_slice(bytes).map_err(malformed)?;

    if value.get("error").and_then(Value::as_bool) == Some(true) {
        return Err(DecodeError::Provider {
            message: provider_message(&value),
        });
    }

    if value.get("jokes").is_none() && value.get("type").is_some() {
        let joke: Joke = serde_json::from_value(value).map_err(malformed)?;
        return Ok(JokeResponse::from_jokes(vec![joke]));
    }

    let response: JokeResponse = serde_json::from_value(value).map_err(malformed)?;
    if response.amount != response.jokes.len() {
        return Err(DecodeError::AmountMismatch {
            declared: response.amount,
            actual: response.jokes.len(),
        });
    }
    Ok(response)
}

fn provider_message(value: &Value) -> String {
    let message = value
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("unknown error");
    match value.get("additionalInfo").and_then(Value::as_str) {
        Some(info) => format!("{message} ({info})"),
        None => message.to_string(),
    }
}

fn malformed(err: serde_json::Error) -> DecodeError {
    DecodeError::Malformed(err.to_string())
}
