use super::*;

#[derive(
  Clone,
  Copy,
  Debug,
  Deserialize,
  Eq,
  Hash,
  Ord,
  PartialEq,
  PartialOrd,
  Serialize,
)]
#[serde(transparent)]
pub(crate) struct CommentId(pub(crate) i64);

impl Display for CommentId {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// A comment as served by `GET /comments`.
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct Comment {
  pub(crate) author: String,
  pub(crate) content: String,
  pub(crate) created_at: DateTime<Utc>,
  #[serde(default)]
  pub(crate) deleted_at: Option<DateTime<Utc>>,
  pub(crate) id: CommentId,
  #[serde(default)]
  pub(crate) level: Option<u32>,
  /// `None` for root comments; the backend may send `null` or `0`.
  #[serde(default, deserialize_with = "deserialize_parent_id")]
  pub(crate) parent_id: Option<CommentId>,
}

impl Comment {
  pub(crate) fn author(&self) -> String {
    let author = terminal_text(&self.author);

    if self.deleted_at.is_some() {
      format!("{author} (deleted)")
    } else {
      author
    }
  }

  pub(crate) fn body(&self) -> String {
    terminal_text(&self.content)
  }

  pub(crate) fn date(&self) -> String {
    format_timestamp(&self.created_at.with_timezone(&Local))
  }

  pub(crate) fn is_root(&self) -> bool {
    self.parent_id.is_none()
  }

  pub(crate) fn level(&self) -> u32 {
    self.level.unwrap_or(0)
  }
}

/// Orders comments oldest first, keeping the server's order for ties.
pub(crate) fn sort_chronologically(comments: &mut [Comment]) {
  comments.sort_by_key(|comment| comment.created_at);
}

#[cfg(test)]
pub(crate) fn sample(id: i64, minute: u32) -> Comment {
  Comment {
    author: format!("user{id}"),
    content: format!("comment {id}"),
    created_at: Utc
      .with_ymd_and_hms(2024, 5, 1, 12, minute, 0)
      .single()
      .expect("valid timestamp"),
    deleted_at: None,
    id: CommentId(id),
    level: None,
    parent_id: None,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn deserializes_backend_payload() {
    let comment = serde_json::from_str::<Comment>(
      r#"{
        "id": 7,
        "parent_id": 3,
        "author": "ann",
        "content": "hello",
        "created_at": "2024-05-01T15:04:05.123456+03:00",
        "updated_at": "2024-05-01T15:04:05.123456+03:00",
        "level": 2
      }"#,
    )
    .unwrap();

    assert_eq!(comment.id, CommentId(7));
    assert_eq!(comment.parent_id, Some(CommentId(3)));
    assert_eq!(comment.level(), 2);
    assert_eq!(
      comment.created_at,
      Utc.with_ymd_and_hms(2024, 5, 1, 12, 4, 5).unwrap()
        + chrono::Duration::microseconds(123_456)
    );
    assert!(!comment.is_root());
  }

  #[test]
  fn zero_or_missing_parent_marks_root() {
    let zero = serde_json::from_str::<Comment>(
      r#"{"id": 1, "parent_id": 0, "author": "a", "content": "b",
          "created_at": "2024-05-01T12:00:00Z"}"#,
    )
    .unwrap();

    let missing = serde_json::from_str::<Comment>(
      r#"{"id": 2, "author": "a", "content": "b",
          "created_at": "2024-05-01T12:00:00Z", "level": null}"#,
    )
    .unwrap();

    assert!(zero.is_root());
    assert!(missing.is_root());
    assert_eq!(missing.level(), 0);
  }

  #[test]
  fn sort_orders_by_creation_time() {
    let mut comments = vec![sample(1, 30), sample(2, 10), sample(3, 20)];

    sort_chronologically(&mut comments);

    let ids = comments.iter().map(|c| c.id.0).collect::<Vec<_>>();

    assert_eq!(ids, vec![2, 3, 1]);

    assert!(
      comments
        .windows(2)
        .all(|pair| pair[0].created_at <= pair[1].created_at)
    );
  }

  #[test]
  fn deleted_comments_are_marked() {
    let mut comment = sample(1, 0);
    comment.deleted_at = Some(comment.created_at);

    assert_eq!(comment.author(), "user1 (deleted)");
  }
}
