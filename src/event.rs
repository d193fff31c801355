use super::*;

pub(crate) enum Event {
  CommentSubmitted {
    request_id: u64,
    result: Result<(), ClientError>,
  },
  Replies {
    generation: u64,
    parent: CommentId,
    result: Result<Vec<Comment>, ClientError>,
  },
  Roots {
    request_id: u64,
    result: Result<CommentsPage, ClientError>,
  },
  SearchResults {
    request_id: u64,
    result: Result<Vec<Comment>, ClientError>,
  },
}
