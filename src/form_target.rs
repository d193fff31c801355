use super::*;

/// The form that currently receives typed keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FormTarget {
  Reply(CommentId),
  Root,
}

impl FormTarget {
  pub(crate) fn parent_id(self) -> Option<CommentId> {
    match self {
      Self::Reply(id) => Some(id),
      Self::Root => None,
    }
  }
}
