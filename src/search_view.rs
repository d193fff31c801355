use super::*;

/// Flat, chronologically ordered search results.
pub(crate) struct SearchView {
  pub(crate) query: String,
  pub(crate) results: ListView<Comment>,
  pub(crate) status: LoadStatus,
}

impl SearchView {
  pub(crate) fn failed(&mut self, reason: &str) {
    self.results = ListView::default();
    self.status = LoadStatus::Failed(format!("Search failed: {reason}"));
  }

  pub(crate) fn loading(query: String) -> Self {
    Self {
      query,
      results: ListView::default(),
      status: LoadStatus::Loading,
    }
  }

  pub(crate) fn placeholder(&self) -> Option<&str> {
    self.status.placeholder(
      LOADING_SEARCH_STATUS,
      NO_SEARCH_RESULTS,
      self.results.is_empty(),
    )
  }

  pub(crate) fn selected_id(&self) -> Option<CommentId> {
    self.results.selected_item().map(|comment| comment.id)
  }

  pub(crate) fn set_results(&mut self, mut results: Vec<Comment>) {
    sort_chronologically(&mut results);

    self.results = ListView::new(results);
    self.status = LoadStatus::Ready;
  }
}
