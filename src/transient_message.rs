use super::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum NoticeKind {
  Error,
  Success,
}

impl NoticeKind {
  pub(crate) fn color(self) -> Color {
    match self {
      Self::Error => Color::Red,
      Self::Success => Color::Green,
    }
  }
}

/// A status-line notice that disappears after a few seconds.
#[derive(Clone)]
pub(crate) struct TransientMessage {
  current: String,
  expires_at: Instant,
  kind: NoticeKind,
}

impl TransientMessage {
  const LIFETIME: Duration = Duration::from_secs(3);

  pub(crate) fn current(&self) -> &str {
    &self.current
  }

  #[cfg(test)]
  pub(crate) fn expired(current: String, kind: NoticeKind) -> Self {
    Self {
      current,
      expires_at: Instant::now(),
      kind,
    }
  }

  pub(crate) fn is_expired(&self) -> bool {
    Instant::now() >= self.expires_at
  }

  pub(crate) fn kind(&self) -> NoticeKind {
    self.kind
  }

  pub(crate) fn new(current: String, kind: NoticeKind) -> Self {
    Self {
      current,
      expires_at: Instant::now() + Self::LIFETIME,
      kind,
    }
  }
}
