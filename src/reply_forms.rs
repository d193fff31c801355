use super::*;

/// Inline reply forms, one per comment, built on first use.
///
/// At most one form is visible. Showing a form hides the others without
/// clearing them; cancelling clears and hides.
#[derive(Debug, Default)]
pub(crate) struct ReplyForms {
  forms: HashMap<CommentId, ComposeForm>,
  visible: Option<CommentId>,
}

impl ReplyForms {
  pub(crate) fn cancel(&mut self, id: CommentId) {
    if let Some(form) = self.forms.get_mut(&id) {
      form.reset();
    }

    self.hide(id);
  }

  pub(crate) fn clear(&mut self) {
    self.forms.clear();
    self.visible = None;
  }

  pub(crate) fn form(&self, id: CommentId) -> Option<&ComposeForm> {
    self.forms.get(&id)
  }

  pub(crate) fn form_mut(&mut self, id: CommentId) -> Option<&mut ComposeForm> {
    self.forms.get_mut(&id)
  }

  pub(crate) fn hide(&mut self, id: CommentId) {
    if self.visible == Some(id) {
      self.visible = None;
    }
  }

  pub(crate) fn is_visible(&self, id: CommentId) -> bool {
    self.visible == Some(id)
  }

  /// Shows the form for `id`, hiding any other open form.
  pub(crate) fn show(&mut self, id: CommentId) -> &mut ComposeForm {
    self.visible = Some(id);
    self.forms.entry(id).or_default()
  }

  pub(crate) fn visible(&self) -> Option<CommentId> {
    self.visible
  }

  /// The visible form, if any, with its comment id.
  pub(crate) fn visible_form(&self) -> Option<(CommentId, &ComposeForm)> {
    let id = self.visible?;
    self.forms.get(&id).map(|form| (id, form))
  }
}
