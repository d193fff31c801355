#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum LoadStatus {
  Failed(String),
  Loading,
  Ready,
}

impl LoadStatus {
  /// Text shown in place of the list while nothing can be listed.
  pub(crate) fn placeholder<'a>(
    &'a self,
    loading: &'a str,
    empty: &'a str,
    is_empty: bool,
  ) -> Option<&'a str> {
    match self {
      Self::Failed(message) => Some(message),
      Self::Loading => Some(loading),
      Self::Ready if is_empty => Some(empty),
      Self::Ready => None,
    }
  }
}
