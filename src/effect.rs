use super::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Effect {
  FetchReplies {
    generation: u64,
    parent: CommentId,
  },
  FetchRoots {
    request_id: u64,
    search: Option<String>,
  },
  OpenUrl {
    url: String,
  },
  Search {
    query: String,
    request_id: u64,
  },
  SubmitComment {
    comment: NewComment,
    request_id: u64,
  },
}
