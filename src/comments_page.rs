use super::*;

/// Body of a successful `GET /comments`. Pagination fields beyond `total`
/// are ignored.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct CommentsPage {
  #[serde(default, deserialize_with = "deserialize_null_default")]
  pub(crate) comments: Vec<Comment>,
  #[serde(default)]
  pub(crate) total: usize,
}

impl CommentsPage {
  /// The backend only fills `total` when paginating.
  pub(crate) fn total(&self) -> usize {
    self.total.max(self.comments.len())
  }
}
