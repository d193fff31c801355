use {super::*, reqwest::StatusCode, thiserror::Error};

#[derive(Debug, Error)]
pub(crate) enum ClientError {
  #[error("could not decode response: {0}")]
  Decode(#[from] serde_json::Error),
  #[error(
    "HTTP error {status}{}",
    .message.as_ref().map(|message| format!(": {message}")).unwrap_or_default()
  )]
  Status {
    message: Option<String>,
    status: StatusCode,
  },
  #[error(transparent)]
  Transport(#[from] reqwest::Error),
}

#[derive(Deserialize)]
struct ErrorBody {
  error: Option<String>,
}

impl ClientError {
  /// Builds a `Status` error from a non-2xx response body, picking up the
  /// server's `{"error": ...}` message when there is one.
  pub(crate) fn from_status(status: StatusCode, body: &[u8]) -> Self {
    let message = serde_json::from_slice::<ErrorBody>(body)
      .ok()
      .and_then(|body| body.error)
      .map(|message| message.trim().to_string())
      .filter(|message| !message.is_empty());

    Self::Status { message, status }
  }

  /// The message to show a user, or `fallback` when the server gave none.
  pub(crate) fn user_message(&self, fallback: &str) -> String {
    match self {
      Self::Status {
        message: Some(message),
        ..
      } => message.clone(),
      _ => fallback.to_string(),
    }
  }
}
