use super::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Action {
  CancelDelete,
  CancelForm,
  CancelSearch,
  ClearSearch,
  ComposeRoot,
  ConfirmDelete,
  Delete,
  HideHelp,
  LeaveForm,
  None,
  OpenInBrowser,
  Quit,
  Reload,
  Reply,
  ShowHelp,
  ShowReplies,
  StartSearch,
  SubmitForm,
  SubmitSearch,
}

/// Outcome of dispatching one action: the I/O to perform and whether the
/// app should stop.
pub(crate) struct ActionDispatch {
  pub(crate) effects: Vec<Effect>,
  pub(crate) should_exit: bool,
}
