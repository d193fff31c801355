use {super::*, thiserror::Error};

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub(crate) enum ValidationError {
  #[error("Author must be at most {max} bytes.")]
  AuthorTooLong { max: usize },
  #[error("Please fill in both author and comment.")]
  Blank,
  #[error("Comment must be at most {max} bytes.")]
  ContentTooLong { max: usize },
}

/// Body of `POST /comments`. `parent_id` is sent as `null` for a root
/// comment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub(crate) struct NewComment {
  pub(crate) author: String,
  pub(crate) content: String,
  pub(crate) parent_id: Option<CommentId>,
}

impl NewComment {
  // The backend measures both limits in UTF-8 bytes.
  const MAX_AUTHOR_BYTES: usize = 50;
  const MAX_CONTENT_BYTES: usize = 1000;

  pub(crate) fn new(
    author: &str,
    content: &str,
    parent_id: Option<CommentId>,
  ) -> Result<Self, ValidationError> {
    let (author, content) = (author.trim(), content.trim());

    if author.is_empty() || content.is_empty() {
      return Err(ValidationError::Blank);
    }

    if author.len() > Self::MAX_AUTHOR_BYTES {
      return Err(ValidationError::AuthorTooLong {
        max: Self::MAX_AUTHOR_BYTES,
      });
    }

    if content.len() > Self::MAX_CONTENT_BYTES {
      return Err(ValidationError::ContentTooLong {
        max: Self::MAX_CONTENT_BYTES,
      });
    }

    Ok(Self {
      author: author.to_string(),
      content: content.to_string(),
      parent_id,
    })
  }
}
