use super::*;

/// In-memory view model of the loaded comments.
///
/// Rebuilt from scratch on every root load. A parent present in `children`
/// has had its replies fetched, even when the list is empty.
#[derive(Debug, Default)]
pub(crate) struct CommentTree {
  children: HashMap<CommentId, Vec<CommentId>>,
  nodes: HashMap<CommentId, Comment>,
  roots: Vec<CommentId>,
}

impl CommentTree {
  pub(crate) fn comment(&self, id: CommentId) -> Option<&Comment> {
    self.nodes.get(&id)
  }

  pub(crate) fn contains(&self, id: CommentId) -> bool {
    self.nodes.contains_key(&id)
  }

  pub(crate) fn from_roots(mut comments: Vec<Comment>) -> Self {
    sort_chronologically(&mut comments);

    let mut tree = Self::default();

    for comment in comments {
      if tree.nodes.contains_key(&comment.id) {
        continue;
      }

      tree.roots.push(comment.id);
      tree.nodes.insert(comment.id, comment);
    }

    tree
  }

  pub(crate) fn has_no_replies(&self, id: CommentId) -> bool {
    self.children.get(&id).is_some_and(Vec::is_empty)
  }

  pub(crate) fn is_empty(&self) -> bool {
    self.roots.is_empty()
  }

  pub(crate) fn replies_loaded(&self, id: CommentId) -> bool {
    self.children.contains_key(&id)
  }

  /// Attaches one level of replies under `parent`, oldest first.
  ///
  /// Returns `false` when `parent` is not in the tree or already has its
  /// replies. Replies whose id is already present are skipped so the tree
  /// cannot form a cycle.
  pub(crate) fn set_replies(
    &mut self,
    parent: CommentId,
    mut replies: Vec<Comment>,
  ) -> bool {
    if !self.nodes.contains_key(&parent) || self.replies_loaded(parent) {
      return false;
    }

    sort_chronologically(&mut replies);

    let mut child_ids = Vec::with_capacity(replies.len());

    for reply in replies {
      if reply.id == parent || self.nodes.contains_key(&reply.id) {
        continue;
      }

      child_ids.push(reply.id);
      self.nodes.insert(reply.id, reply);
    }

    self.children.insert(parent, child_ids);

    true
  }

  /// Comment ids in display order with their depth: each root followed by
  /// its loaded replies, depth first.
  pub(crate) fn visible(&self) -> Vec<(CommentId, usize)> {
    let mut visible = Vec::with_capacity(self.nodes.len());

    let mut stack = self
      .roots
      .iter()
      .rev()
      .map(|id| (*id, 0))
      .collect::<Vec<_>>();

    while let Some((id, depth)) = stack.pop() {
      visible.push((id, depth));

      if let Some(children) = self.children.get(&id) {
        stack.extend(children.iter().rev().map(|child| (*child, depth + 1)));
      }
    }

    visible
  }
}

#[cfg(test)]
mod tests {
  use {super::*, crate::comment::sample};

  fn reply(id: i64, parent: i64, minute: u32) -> Comment {
    let mut comment = sample(id, minute);
    comment.parent_id = Some(CommentId(parent));
    comment.level = Some(1);
    comment
  }

  fn ids(tree: &CommentTree) -> Vec<(i64, usize)> {
    tree
      .visible()
      .into_iter()
      .map(|(id, depth)| (id.0, depth))
      .collect()
  }

  #[test]
  fn roots_are_sorted_chronologically() {
    let tree =
      CommentTree::from_roots(vec![sample(1, 20), sample(2, 5), sample(3, 10)]);

    assert_eq!(ids(&tree), vec![(2, 0), (3, 0), (1, 0)]);
  }

  #[test]
  fn replies_follow_their_parent() {
    let mut tree = CommentTree::from_roots(vec![sample(1, 0), sample(2, 1)]);

    assert!(tree.set_replies(
      CommentId(1),
      vec![reply(11, 1, 30), reply(10, 1, 20)]
    ));

    assert_eq!(ids(&tree), vec![(1, 0), (10, 1), (11, 1), (2, 0)]);
    assert!(tree.replies_loaded(CommentId(1)));
    assert!(!tree.replies_loaded(CommentId(2)));
  }

  #[test]
  fn empty_reply_list_is_remembered() {
    let mut tree = CommentTree::from_roots(vec![sample(1, 0)]);

    assert!(!tree.has_no_replies(CommentId(1)));

    tree.set_replies(CommentId(1), Vec::new());

    assert!(tree.has_no_replies(CommentId(1)));
  }

  #[test]
  fn replies_for_unknown_parent_are_rejected() {
    let mut tree = CommentTree::from_roots(vec![sample(1, 0)]);

    assert!(!tree.set_replies(CommentId(9), vec![reply(10, 9, 1)]));
    assert!(!tree.contains(CommentId(10)));
  }

  #[test]
  fn known_ids_are_not_attached_twice() {
    let mut tree = CommentTree::from_roots(vec![sample(1, 0), sample(2, 1)]);

    tree.set_replies(CommentId(1), vec![sample(2, 1), reply(3, 1, 2)]);

    assert_eq!(ids(&tree), vec![(1, 0), (3, 1), (2, 0)]);
  }

  #[test]
  fn second_reply_batch_keeps_the_first() {
    let mut tree = CommentTree::from_roots(vec![sample(1, 0)]);

    assert!(tree.set_replies(
      CommentId(1),
      vec![reply(10, 1, 1), reply(11, 1, 2)]
    ));
    assert!(!tree.set_replies(
      CommentId(1),
      vec![reply(10, 1, 1), reply(11, 1, 2)]
    ));

    assert_eq!(ids(&tree), vec![(1, 0), (10, 1), (11, 1)]);
    assert!(!tree.has_no_replies(CommentId(1)));
  }

  #[test]
  fn duplicate_roots_keep_first() {
    let tree = CommentTree::from_roots(vec![sample(1, 0), sample(1, 0)]);

    assert_eq!(tree.visible().len(), 1);
    assert!(!tree.is_empty());
  }
}
