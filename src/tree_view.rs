use super::*;

pub(crate) struct TreeView {
  pub(crate) loading_replies: HashSet<CommentId>,
  pub(crate) offset: usize,
  pub(crate) selected: Option<CommentId>,
  pub(crate) status: LoadStatus,
  pub(crate) tree: CommentTree,
}

impl TreeView {
  pub(crate) fn failed(reason: &str) -> Self {
    Self {
      status: LoadStatus::Failed(format!("Could not load comments: {reason}")),
      ..Self::loading()
    }
  }

  pub(crate) fn loading() -> Self {
    Self {
      loading_replies: HashSet::new(),
      offset: 0,
      selected: None,
      status: LoadStatus::Loading,
      tree: CommentTree::default(),
    }
  }

  pub(crate) fn move_by(&mut self, delta: isize) {
    let (visible, selected_pos) = self.visible_with_selection();

    if visible.is_empty() {
      self.selected = None;
      return;
    }

    let current = selected_pos.unwrap_or(0);
    let magnitude = delta.unsigned_abs();

    let target = if delta >= 0 {
      current
        .saturating_add(magnitude)
        .min(visible.len().saturating_sub(1))
    } else {
      current.saturating_sub(magnitude)
    };

    self.selected = Some(visible[target].0);
  }

  pub(crate) fn placeholder(&self) -> Option<&str> {
    self
      .status
      .placeholder(LOADING_COMMENTS_STATUS, NO_COMMENTS, self.tree.is_empty())
  }

  /// A freshly loaded tree. The previous selection survives when the same
  /// comment is still a root.
  pub(crate) fn ready(tree: CommentTree, previous: Option<CommentId>) -> Self {
    let selected = previous
      .filter(|id| tree.contains(*id))
      .or_else(|| tree.visible().first().map(|(id, _)| *id));

    Self {
      loading_replies: HashSet::new(),
      offset: 0,
      selected,
      status: LoadStatus::Ready,
      tree,
    }
  }

  pub(crate) fn select_index_at(&mut self, pos: usize) {
    let visible = self.tree.visible();

    self.selected = visible
      .get(pos.min(visible.len().saturating_sub(1)))
      .map(|(id, _)| *id);
  }

  pub(crate) fn select_last(&mut self) {
    self.select_index_at(usize::MAX);
  }

  pub(crate) fn visible_with_selection(
    &self,
  ) -> (Vec<(CommentId, usize)>, Option<usize>) {
    let visible = self.tree.visible();

    let selected_pos = self
      .selected
      .and_then(|selected| visible.iter().position(|(id, _)| *id == selected));

    (visible, selected_pos)
  }
}
