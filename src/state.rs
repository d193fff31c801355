use super::*;

/// The whole view state of the client.
///
/// Actions and events mutate it and queue effects; it never performs I/O
/// itself. Every mutation that changes comments on the server is followed
/// by a full reload of the root tree rather than a targeted patch.
pub(crate) struct State {
  form_focus: Option<FormTarget>,
  help: HelpView,
  list_height: usize,
  mode: Mode,
  next_request_id: u64,
  pending_delete: Option<CommentId>,
  pending_effects: Vec<Effect>,
  pending_roots: Option<u64>,
  pending_search: Option<u64>,
  pending_submission: Option<PendingSubmission>,
  reply_forms: ReplyForms,
  root_form: ComposeForm,
  root_form_open: bool,
  search_input: Option<SearchInput>,
  search_query: String,
  transient_message: Option<TransientMessage>,
  tree_generation: u64,
  web_url: String,
}

impl State {
  const ADD_COMMENT_FALLBACK: &str = "Could not add comment.";
  const ADD_REPLY_FALLBACK: &str = "Could not add reply.";

  fn cancel_form(&mut self) {
    match self.form_focus.take() {
      Some(FormTarget::Reply(id)) => self.reply_forms.cancel(id),
      Some(FormTarget::Root) => {
        self.root_form.reset();
        self.root_form_open = false;
      }
      None => {}
    }
  }

  fn clear_search(&mut self) {
    self.search_input = None;
    self.search_query.clear();
    self.reload_roots();
  }

  fn compose_root(&mut self) {
    self.root_form_open = true;
    self.form_focus = Some(FormTarget::Root);
  }

  fn confirm_delete(&mut self) {
    if let Some(id) = self.pending_delete.take() {
      tracing::info!(%id, "delete requested but not supported");
      self.set_notice(DELETE_UNIMPLEMENTED.into(), NoticeKind::Error);
    }
  }

  pub(crate) fn dispatch_action(&mut self, action: Action) -> ActionDispatch {
    let mut should_exit = false;

    match action {
      Action::Quit => should_exit = true,
      Action::ShowHelp => self.help.show(),
      Action::HideHelp => self.help.hide(),
      Action::StartSearch => self.start_search(),
      Action::CancelSearch => self.search_input = None,
      Action::SubmitSearch => self.submit_search(),
      Action::ClearSearch => self.clear_search(),
      Action::Reload => self.reload_roots(),
      Action::ShowReplies => self.show_replies(),
      Action::Reply => self.reply(),
      Action::ComposeRoot => self.compose_root(),
      Action::SubmitForm => self.submit_form(),
      Action::CancelForm => self.cancel_form(),
      Action::LeaveForm => self.form_focus = None,
      Action::Delete => self.pending_delete = self.mode.selected_id(),
      Action::ConfirmDelete => self.confirm_delete(),
      Action::CancelDelete => self.pending_delete = None,
      Action::OpenInBrowser => self.pending_effects.push(Effect::OpenUrl {
        url: self.web_url.clone(),
      }),
      Action::None => {}
    }

    ActionDispatch {
      effects: self.take_effects(),
      should_exit,
    }
  }

  pub(crate) fn form_focus(&self) -> Option<FormTarget> {
    self.form_focus
  }

  fn handle_delete_key(key: KeyEvent) -> Action {
    match key.code {
      KeyCode::Char('y' | 'Y') => Action::ConfirmDelete,
      KeyCode::Char('n' | 'N') | KeyCode::Esc => Action::CancelDelete,
      _ => Action::None,
    }
  }

  pub(crate) fn handle_event(&mut self, event: Event) -> Vec<Effect> {
    match event {
      Event::Roots { request_id, result } => {
        if self.pending_roots != Some(request_id) {
          tracing::debug!(request_id, "dropping stale root comments");
          return Vec::new();
        }

        self.pending_roots = None;
        self.tree_generation = request_id;
        self.reply_forms.clear();

        if matches!(self.form_focus, Some(FormTarget::Reply(_))) {
          self.form_focus = None;
        }

        match result {
          Ok(page) => {
            tracing::info!(
              count = page.comments.len(),
              total = page.total(),
              "root comments loaded"
            );

            let previous = self.mode.selected_id();

            self.mode = Mode::Tree(TreeView::ready(
              CommentTree::from_roots(page.comments),
              previous,
            ));
          }
          Err(error) => {
            tracing::error!(%error, "could not load root comments");

            self.mode = Mode::Tree(TreeView::failed(&error.to_string()));
          }
        }
      }
      Event::Replies {
        generation,
        parent,
        result,
      } => {
        if generation != self.tree_generation {
          tracing::debug!(%parent, generation, "dropping replies for old tree");
          return Vec::new();
        }

        let Mode::Tree(view) = &mut self.mode else {
          tracing::debug!(%parent, "dropping replies outside the tree view");
          return Vec::new();
        };

        view.loading_replies.remove(&parent);

        match result {
          Ok(replies) => {
            let count = replies.len();

            if view.tree.set_replies(parent, replies) {
              tracing::info!(%parent, count, "replies loaded");
            } else {
              tracing::debug!(%parent, "ignoring replies for this parent");
            }
          }
          Err(error) => {
            tracing::error!(%parent, %error, "could not load replies");

            self.set_notice(
              format!("Could not load replies: {error}"),
              NoticeKind::Error,
            );
          }
        }
      }
      Event::SearchResults { request_id, result } => {
        if self.pending_search != Some(request_id) {
          tracing::debug!(request_id, "dropping stale search results");
          return Vec::new();
        }

        self.pending_search = None;

        let Mode::Search(view) = &mut self.mode else {
          return Vec::new();
        };

        match result {
          Ok(results) => {
            tracing::info!(
              query = %view.query,
              count = results.len(),
              "search finished"
            );

            view.set_results(results);
          }
          Err(error) => {
            tracing::error!(query = %view.query, %error, "search failed");

            view.failed(&error.to_string());
          }
        }
      }
      Event::CommentSubmitted { request_id, result } => {
        let Some(pending) = self
          .pending_submission
          .take_if(|pending| pending.request_id == request_id)
        else {
          tracing::debug!(request_id, "dropping stale submission result");
          return Vec::new();
        };

        match (result, pending.target) {
          (Ok(()), FormTarget::Reply(id)) => {
            tracing::info!(parent = %id, "reply added");

            self.reply_forms.cancel(id);

            if self.form_focus == Some(FormTarget::Reply(id)) {
              self.form_focus = None;
            }

            self.reload_roots();
            self.set_notice("Reply added.".into(), NoticeKind::Success);
          }
          (Ok(()), FormTarget::Root) => {
            tracing::info!("comment added");

            self.root_form.reset();
            self.root_form_open = false;

            if self.form_focus == Some(FormTarget::Root) {
              self.form_focus = None;
            }

            self.reload_roots();
            self.set_notice("Comment added.".into(), NoticeKind::Success);
          }
          (Err(error), target) => {
            tracing::error!(?target, %error, "could not submit comment");

            let fallback = match target {
              FormTarget::Reply(_) => Self::ADD_REPLY_FALLBACK,
              FormTarget::Root => Self::ADD_COMMENT_FALLBACK,
            };

            self.set_notice(error.user_message(fallback), NoticeKind::Error);
          }
        }
      }
    }

    self.take_effects()
  }

  fn handle_search_key(&mut self, key: KeyEvent) -> Action {
    let Some(input) = self.search_input.as_mut() else {
      return Action::None;
    };

    match key.code {
      KeyCode::Esc => Action::CancelSearch,
      KeyCode::Enter => Action::SubmitSearch,
      KeyCode::Backspace => {
        input.buffer.pop();
        Action::None
      }
      KeyCode::Char(ch) => {
        let modifiers = key.modifiers;

        if !(modifiers.contains(KeyModifiers::CONTROL)
          || modifiers.contains(KeyModifiers::ALT)
          || modifiers.contains(KeyModifiers::SUPER))
        {
          input.buffer.push(ch);
        }

        Action::None
      }
      _ => Action::None,
    }
  }

  pub(crate) fn help(&self) -> &HelpView {
    &self.help
  }

  /// Routes a key to whatever currently owns the keyboard: the help popup,
  /// the delete prompt, the search prompt, a focused form, or the list.
  pub(crate) fn input_action(&mut self, key: KeyEvent) -> Action {
    if key.code == KeyCode::Char('c')
      && key.modifiers.contains(KeyModifiers::CONTROL)
    {
      return Action::Quit;
    }

    if self.help.is_visible() {
      return HelpView::handle_key(key);
    }

    if self.pending_delete.is_some() {
      return Self::handle_delete_key(key);
    }

    if self.search_input.is_some() {
      return self.handle_search_key(key);
    }

    if let Some(target) = self.form_focus {
      let form = match target {
        FormTarget::Reply(id) => self.reply_forms.form_mut(id),
        FormTarget::Root => Some(&mut self.root_form),
      };

      return match form.map(|form| form.handle_key(key)) {
        Some(FormInput::Submit) => Action::SubmitForm,
        Some(FormInput::Cancel) => Action::CancelForm,
        Some(FormInput::Leave) => Action::LeaveForm,
        Some(FormInput::Edited | FormInput::None) => Action::None,
        None => Action::LeaveForm,
      };
    }

    let page = self.list_height.max(1);

    self.mode.handle_key(key, page)
  }

  pub(crate) fn list_height(&self) -> usize {
    self.list_height
  }

  pub(crate) fn mode(&self) -> &Mode {
    &self.mode
  }

  pub(crate) fn mode_mut(&mut self) -> &mut Mode {
    &mut self.mode
  }

  /// A fresh state that shows the loading tree and has queued the first
  /// root load.
  pub(crate) fn new(web_url: String) -> Self {
    let mut state = Self {
      form_focus: None,
      help: HelpView::new(),
      list_height: 0,
      mode: Mode::Tree(TreeView::loading()),
      next_request_id: 0,
      pending_delete: None,
      pending_effects: Vec::new(),
      pending_roots: None,
      pending_search: None,
      pending_submission: None,
      reply_forms: ReplyForms::default(),
      root_form: ComposeForm::default(),
      root_form_open: false,
      search_input: None,
      search_query: String::new(),
      transient_message: None,
      tree_generation: 0,
      web_url,
    };

    state.reload_roots();

    state
  }

  fn next_request_id(&mut self) -> u64 {
    let request_id = self.next_request_id;
    self.next_request_id = self.next_request_id.wrapping_add(1);
    request_id
  }

  pub(crate) fn pending_delete(&self) -> Option<CommentId> {
    self.pending_delete
  }

  pub(crate) fn pending_target(&self) -> Option<FormTarget> {
    self.pending_submission.as_ref().map(|pending| pending.target)
  }

  /// Queues a load of the root comments, filtered by the active search
  /// string when there is one. The current view stays until it arrives.
  fn reload_roots(&mut self) {
    let request_id = self.next_request_id();

    self.pending_roots = Some(request_id);
    self.pending_search = None;

    let search =
      (!self.search_query.is_empty()).then(|| self.search_query.clone());

    tracing::debug!(request_id, ?search, "loading root comments");

    self
      .pending_effects
      .push(Effect::FetchRoots { request_id, search });
  }

  fn reply(&mut self) {
    let Some(id) = self.mode.selected_id() else {
      return;
    };

    self.reply_forms.show(id);
    self.form_focus = Some(FormTarget::Reply(id));
  }

  pub(crate) fn reply_forms(&self) -> &ReplyForms {
    &self.reply_forms
  }

  pub(crate) fn root_form(&self) -> Option<&ComposeForm> {
    self.root_form_open.then_some(&self.root_form)
  }

  pub(crate) fn search_query(&self) -> &str {
    &self.search_query
  }

  pub(crate) fn set_list_height(&mut self, height: usize) {
    self.list_height = height;
  }

  pub(crate) fn set_notice(&mut self, message: String, kind: NoticeKind) {
    self.transient_message = Some(TransientMessage::new(message, kind));
  }

  fn show_replies(&mut self) {
    let Mode::Tree(view) = &mut self.mode else {
      return;
    };

    let Some(id) = view.selected else {
      return;
    };

    let expandable = view.tree.comment(id).is_some_and(Comment::is_root)
      && !view.tree.replies_loaded(id);

    if !expandable || !view.loading_replies.insert(id) {
      return;
    }

    tracing::debug!(parent = %id, "loading replies");

    self.pending_effects.push(Effect::FetchReplies {
      generation: self.tree_generation,
      parent: id,
    });
  }

  fn start_search(&mut self) {
    if self.search_input.is_none() {
      self.search_input = Some(SearchInput::new(self.search_query.clone()));
    }
  }

  /// The status line and, for notices, their colour.
  pub(crate) fn status_line(&self) -> (String, Option<NoticeKind>) {
    if let Some(input) = &self.search_input {
      return (truncate(&input.prompt(), 80), None);
    }

    if self.help.is_visible() {
      return (HELP_STATUS.into(), None);
    }

    if let Some(notice) = &self.transient_message {
      return (notice.current().to_string(), Some(notice.kind()));
    }

    let status = match self.mode {
      Mode::Search(_) => SEARCH_STATUS,
      Mode::Tree(_) => TREE_STATUS,
    };

    (status.into(), None)
  }

  fn submit_form(&mut self) {
    let Some(target) = self.form_focus else {
      return;
    };

    if self.pending_submission.is_some() {
      self.set_notice(
        "Still sending the previous comment.".into(),
        NoticeKind::Error,
      );
      return;
    }

    let form = match target {
      FormTarget::Reply(id) => self.reply_forms.form(id),
      FormTarget::Root => Some(&self.root_form),
    };

    let Some(form) = form else {
      return;
    };

    let comment =
      match NewComment::new(&form.author, &form.content, target.parent_id()) {
        Ok(comment) => comment,
        Err(error) => {
          tracing::warn!(?target, %error, "comment failed validation");
          self.set_notice(error.to_string(), NoticeKind::Error);
          return;
        }
      };

    let request_id = self.next_request_id();

    self.pending_submission = Some(PendingSubmission { request_id, target });

    self
      .pending_effects
      .push(Effect::SubmitComment { comment, request_id });
  }

  fn submit_search(&mut self) {
    let Some(input) = self.search_input.take() else {
      return;
    };

    let query = input.buffer.trim().to_string();

    if query.is_empty() {
      self.clear_search();
      return;
    }

    let request_id = self.next_request_id();

    self.search_query.clone_from(&query);
    self.pending_search = Some(request_id);
    self.pending_roots = None;
    self.mode = Mode::Search(SearchView::loading(query.clone()));

    tracing::debug!(request_id, %query, "searching comments");

    self
      .pending_effects
      .push(Effect::Search { query, request_id });
  }

  pub(crate) fn take_effects(&mut self) -> Vec<Effect> {
    std::mem::take(&mut self.pending_effects)
  }

  pub(crate) fn update_transient_message(&mut self) {
    if self
      .transient_message
      .as_ref()
      .is_some_and(TransientMessage::is_expired)
    {
      self.transient_message = None;
    }
  }
}

#[cfg(test)]
mod tests {
  use {super::*, crate::comment::sample, reqwest::StatusCode};

  fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
  }

  fn type_text(state: &mut State, text: &str) {
    for ch in text.chars() {
      assert_eq!(state.input_action(key(KeyCode::Char(ch))), Action::None);
    }
  }

  fn page(comments: Vec<Comment>) -> CommentsPage {
    CommentsPage {
      comments,
      ..CommentsPage::default()
    }
  }

  fn reply_to(id: i64, parent: i64, minute: u32) -> Comment {
    let mut comment = sample(id, minute);
    comment.parent_id = Some(CommentId(parent));
    comment.level = Some(1);
    comment
  }

  fn initial_roots_request(state: &mut State) -> u64 {
    match state.take_effects().as_slice() {
      [Effect::FetchRoots { request_id, search: None }] => *request_id,
      effects => panic!("unexpected effects: {effects:?}"),
    }
  }

  fn loaded_state(comments: Vec<Comment>) -> State {
    let mut state = State::new("http://localhost:8080".into());

    let request_id = initial_roots_request(&mut state);

    let effects = state.handle_event(Event::Roots {
      request_id,
      result: Ok(page(comments)),
    });

    assert!(effects.is_empty());

    state
  }

  fn reply_generation(state: &mut State) -> u64 {
    match state.dispatch_action(Action::ShowReplies).effects.as_slice() {
      [Effect::FetchReplies { generation, .. }] => *generation,
      effects => panic!("unexpected effects: {effects:?}"),
    }
  }

  fn reload_request(state: &mut State) -> u64 {
    match state.dispatch_action(Action::Reload).effects.as_slice() {
      [Effect::FetchRoots { request_id, .. }] => *request_id,
      effects => panic!("unexpected effects: {effects:?}"),
    }
  }

  fn tree(state: &State) -> &TreeView {
    match state.mode() {
      Mode::Tree(view) => view,
      Mode::Search(_) => panic!("expected tree view"),
    }
  }

  fn visible_ids(state: &State) -> Vec<i64> {
    tree(state)
      .tree
      .visible()
      .into_iter()
      .map(|(id, _)| id.0)
      .collect()
  }

  fn select(state: &mut State, id: i64) {
    if let Mode::Tree(view) = state.mode_mut() {
      view.selected = Some(CommentId(id));
    }
  }

  fn notice(state: &State) -> Option<(String, NoticeKind)> {
    state
      .transient_message
      .as_ref()
      .map(|notice| (notice.current().to_string(), notice.kind()))
  }

  #[test]
  fn new_state_queues_root_load_and_shows_loading() {
    let mut state = State::new("http://localhost:8080".into());

    initial_roots_request(&mut state);

    assert_eq!(tree(&state).placeholder(), Some(LOADING_COMMENTS_STATUS));
  }

  #[test]
  fn roots_render_in_chronological_order() {
    let state = loaded_state(vec![sample(1, 30), sample(2, 10), sample(3, 20)]);

    assert_eq!(visible_ids(&state), vec![2, 3, 1]);
    assert_eq!(state.mode().selected_id(), Some(CommentId(2)));
  }

  #[test]
  fn zero_roots_show_placeholder() {
    let state = loaded_state(Vec::new());

    assert_eq!(tree(&state).placeholder(), Some(NO_COMMENTS));
  }

  #[test]
  fn failed_root_load_is_shown_inline() {
    let mut state = State::new("http://localhost:8080".into());
    let request_id = initial_roots_request(&mut state);

    state.handle_event(Event::Roots {
      request_id,
      result: Err(ClientError::from_status(
        StatusCode::INTERNAL_SERVER_ERROR,
        b"",
      )),
    });

    assert_eq!(
      tree(&state).placeholder(),
      Some("Could not load comments: HTTP error 500 Internal Server Error")
    );
  }

  #[test]
  fn stale_root_results_are_dropped() {
    let mut state = State::new("http://localhost:8080".into());
    let stale = initial_roots_request(&mut state);

    let dispatch = state.dispatch_action(Action::Reload);
    assert_eq!(dispatch.effects.len(), 1);

    state.handle_event(Event::Roots {
      request_id: stale,
      result: Ok(page(vec![sample(1, 0)])),
    });

    assert_eq!(tree(&state).status, LoadStatus::Loading);
  }

  #[test]
  fn show_replies_fetches_once_and_renders_sorted_replies() {
    let mut state = loaded_state(vec![sample(1, 0), sample(2, 1)]);

    let dispatch = state.dispatch_action(Action::ShowReplies);
    assert_eq!(
      dispatch.effects,
      vec![Effect::FetchReplies {
        generation: state.tree_generation,
        parent: CommentId(1),
      }]
    );

    assert!(state.dispatch_action(Action::ShowReplies).effects.is_empty());

    state.handle_event(Event::Replies {
      generation: state.tree_generation,
      parent: CommentId(1),
      result: Ok(vec![reply_to(11, 1, 40), reply_to(10, 1, 20)]),
    });

    assert_eq!(visible_ids(&state), vec![1, 10, 11, 2]);
    assert!(tree(&state).tree.replies_loaded(CommentId(1)));

    assert!(state.dispatch_action(Action::ShowReplies).effects.is_empty());
  }

  #[test]
  fn zero_replies_are_remembered_for_the_placeholder() {
    let mut state = loaded_state(vec![sample(1, 0)]);

    state.dispatch_action(Action::ShowReplies);

    state.handle_event(Event::Replies {
      generation: state.tree_generation,
      parent: CommentId(1),
      result: Ok(Vec::new()),
    });

    assert!(tree(&state).tree.has_no_replies(CommentId(1)));
  }

  #[test]
  fn reply_load_failure_shows_notice_and_keeps_tree() {
    let mut state = loaded_state(vec![sample(1, 0)]);

    state.dispatch_action(Action::ShowReplies);

    state.handle_event(Event::Replies {
      generation: state.tree_generation,
      parent: CommentId(1),
      result: Err(ClientError::from_status(StatusCode::NOT_FOUND, b"")),
    });

    assert_eq!(visible_ids(&state), vec![1]);
    assert!(!tree(&state).tree.replies_loaded(CommentId(1)));
    assert!(!tree(&state).loading_replies.contains(&CommentId(1)));
    assert!(matches!(notice(&state), Some((_, NoticeKind::Error))));
  }

  #[test]
  fn replies_requested_before_a_reload_are_dropped() {
    let mut state = loaded_state(vec![sample(1, 0)]);

    let old = reply_generation(&mut state);
    let reload = reload_request(&mut state);

    state.handle_event(Event::Roots {
      request_id: reload,
      result: Ok(page(vec![sample(1, 0)])),
    });

    let new = reply_generation(&mut state);

    assert_ne!(old, new);

    for generation in [old, new] {
      state.handle_event(Event::Replies {
        generation,
        parent: CommentId(1),
        result: Ok(vec![reply_to(10, 1, 5), reply_to(11, 1, 6)]),
      });
    }

    assert_eq!(visible_ids(&state), vec![1, 10, 11]);
    assert!(!tree(&state).tree.has_no_replies(CommentId(1)));
    assert!(tree(&state).loading_replies.is_empty());
  }

  #[test]
  fn stale_reply_result_keeps_the_new_load_marker() {
    let mut state = loaded_state(vec![sample(1, 0)]);

    let old = state.tree_generation;

    state.dispatch_action(Action::ShowReplies);

    let reload = reload_request(&mut state);

    state.handle_event(Event::Roots {
      request_id: reload,
      result: Ok(page(vec![sample(1, 0)])),
    });

    state.dispatch_action(Action::ShowReplies);

    state.handle_event(Event::Replies {
      generation: old,
      parent: CommentId(1),
      result: Ok(vec![reply_to(10, 1, 5)]),
    });

    assert!(tree(&state).loading_replies.contains(&CommentId(1)));
    assert!(!tree(&state).tree.replies_loaded(CommentId(1)));
  }

  #[test]
  fn replies_cannot_be_expanded_from_a_reply() {
    let mut state = loaded_state(vec![sample(1, 0)]);

    state.dispatch_action(Action::ShowReplies);
    state.handle_event(Event::Replies {
      generation: state.tree_generation,
      parent: CommentId(1),
      result: Ok(vec![reply_to(10, 1, 5)]),
    });

    select(&mut state, 10);

    assert!(state.dispatch_action(Action::ShowReplies).effects.is_empty());
  }

  #[test]
  fn blank_submission_never_reaches_the_network() {
    let mut state = loaded_state(vec![sample(1, 0)]);

    state.dispatch_action(Action::ComposeRoot);
    type_text(&mut state, "   ");

    assert_eq!(state.input_action(key(KeyCode::Enter)), Action::None);
    type_text(&mut state, "hello");

    let action = state.input_action(key(KeyCode::Enter));
    assert_eq!(action, Action::SubmitForm);

    let dispatch = state.dispatch_action(action);

    assert!(dispatch.effects.is_empty());
    assert_eq!(
      notice(&state),
      Some((ValidationError::Blank.to_string(), NoticeKind::Error))
    );
    assert!(state.pending_submission.is_none());
  }

  #[test]
  fn blank_reply_never_reaches_the_network() {
    let mut state = loaded_state(vec![sample(1, 0)]);

    state.dispatch_action(Action::Reply);
    state.input_action(key(KeyCode::Tab));
    type_text(&mut state, "content only");

    let action = state.input_action(key(KeyCode::Enter));
    let dispatch = state.dispatch_action(action);

    assert!(dispatch.effects.is_empty());
    assert_eq!(
      notice(&state),
      Some((ValidationError::Blank.to_string(), NoticeKind::Error))
    );
  }

  #[test]
  fn root_submission_success_clears_form_and_reloads_once() {
    let mut state = loaded_state(vec![sample(1, 0)]);

    state.dispatch_action(Action::ComposeRoot);
    type_text(&mut state, " ann ");
    state.input_action(key(KeyCode::Enter));
    type_text(&mut state, "hello");

    let action = state.input_action(key(KeyCode::Enter));
    let dispatch = state.dispatch_action(action);

    let request_id = match dispatch.effects.as_slice() {
      [Effect::SubmitComment {
        comment,
        request_id,
      }] => {
        assert_eq!(
          comment,
          &NewComment {
            author: "ann".into(),
            content: "hello".into(),
            parent_id: None,
          }
        );
        *request_id
      }
      effects => panic!("unexpected effects: {effects:?}"),
    };

    assert_eq!(state.pending_target(), Some(FormTarget::Root));

    let effects = state.handle_event(Event::CommentSubmitted {
      request_id,
      result: Ok(()),
    });

    let reloads = effects
      .iter()
      .filter(|effect| matches!(effect, Effect::FetchRoots { .. }))
      .count();

    assert_eq!(reloads, 1);
    assert_eq!(effects.len(), 1);
    assert!(state.root_form().is_none());
    assert_eq!(state.root_form, ComposeForm::default());
    assert_eq!(state.form_focus(), None);
    assert_eq!(
      notice(&state),
      Some(("Comment added.".to_string(), NoticeKind::Success))
    );
  }

  #[test]
  fn root_submission_failure_keeps_form_contents() {
    let mut state = loaded_state(vec![sample(1, 0)]);

    state.dispatch_action(Action::ComposeRoot);
    type_text(&mut state, "ann");
    state.input_action(key(KeyCode::Tab));
    type_text(&mut state, "hello");

    let dispatch = state.dispatch_action(Action::SubmitForm);

    let [Effect::SubmitComment { request_id, .. }] = dispatch.effects.as_slice()
    else {
      panic!("expected a submission");
    };

    let effects = state.handle_event(Event::CommentSubmitted {
      request_id: *request_id,
      result: Err(ClientError::from_status(
        StatusCode::BAD_REQUEST,
        br#"{"error": "author too long"}"#,
      )),
    });

    assert!(effects.is_empty());
    assert_eq!(state.root_form().map(|form| form.author.as_str()), Some("ann"));
    assert_eq!(state.root_form.content, "hello");
    assert_eq!(
      notice(&state),
      Some(("author too long".to_string(), NoticeKind::Error))
    );
  }

  #[test]
  fn reply_submission_success_hides_form_and_reloads() {
    let mut state = loaded_state(vec![sample(1, 0), sample(2, 1)]);

    select(&mut state, 2);
    state.dispatch_action(Action::Reply);
    type_text(&mut state, "bob");
    state.input_action(key(KeyCode::Enter));
    type_text(&mut state, "agreed");

    let action = state.input_action(key(KeyCode::Enter));
    let dispatch = state.dispatch_action(action);

    let request_id = match dispatch.effects.as_slice() {
      [Effect::SubmitComment {
        comment,
        request_id,
      }] => {
        assert_eq!(comment.parent_id, Some(CommentId(2)));
        *request_id
      }
      effects => panic!("unexpected effects: {effects:?}"),
    };

    let effects = state.handle_event(Event::CommentSubmitted {
      request_id,
      result: Ok(()),
    });

    assert!(matches!(
      effects.as_slice(),
      [Effect::FetchRoots { search: None, .. }]
    ));
    assert!(!state.reply_forms().is_visible(CommentId(2)));
    assert_eq!(state.form_focus(), None);
    assert_eq!(
      notice(&state),
      Some(("Reply added.".to_string(), NoticeKind::Success))
    );
  }

  #[test]
  fn reply_failure_uses_fallback_message() {
    let mut state = loaded_state(vec![sample(1, 0)]);

    state.dispatch_action(Action::Reply);
    type_text(&mut state, "bob");
    state.input_action(key(KeyCode::Tab));
    type_text(&mut state, "hi");

    let dispatch = state.dispatch_action(Action::SubmitForm);

    let [Effect::SubmitComment { request_id, .. }] = dispatch.effects.as_slice()
    else {
      panic!("expected a submission");
    };

    state.handle_event(Event::CommentSubmitted {
      request_id: *request_id,
      result: Err(ClientError::from_status(StatusCode::BAD_GATEWAY, b"")),
    });

    assert!(state.reply_forms().is_visible(CommentId(1)));
    assert_eq!(
      notice(&state),
      Some(("Could not add reply.".to_string(), NoticeKind::Error))
    );
  }

  #[test]
  fn replying_to_another_comment_hides_the_open_form() {
    let mut state = loaded_state(vec![sample(1, 0), sample(2, 1)]);

    state.dispatch_action(Action::Reply);
    type_text(&mut state, "draft");
    assert!(state.reply_forms().is_visible(CommentId(1)));

    assert_eq!(state.input_action(key(KeyCode::Down)), Action::LeaveForm);
    state.dispatch_action(Action::LeaveForm);

    assert_eq!(state.input_action(key(KeyCode::Char('j'))), Action::None);
    assert_eq!(state.input_action(key(KeyCode::Char('r'))), Action::Reply);
    state.dispatch_action(Action::Reply);

    assert!(!state.reply_forms().is_visible(CommentId(1)));
    assert!(state.reply_forms().is_visible(CommentId(2)));
    assert_eq!(state.form_focus(), Some(FormTarget::Reply(CommentId(2))));
    assert_eq!(
      state.reply_forms().form(CommentId(1)).unwrap().author,
      "draft"
    );
  }

  #[test]
  fn cancelling_a_reply_resets_and_hides_it() {
    let mut state = loaded_state(vec![sample(1, 0)]);

    state.dispatch_action(Action::Reply);
    type_text(&mut state, "draft");

    let action = state.input_action(key(KeyCode::Esc));
    assert_eq!(action, Action::CancelForm);
    state.dispatch_action(action);

    assert_eq!(state.reply_forms().visible(), None);
    assert!(state.reply_forms().form(CommentId(1)).unwrap().author.is_empty());
    assert_eq!(state.form_focus(), None);
  }

  #[test]
  fn search_issues_one_request_and_renders_sorted_results() {
    let mut state = loaded_state(vec![sample(1, 0)]);

    state.dispatch_action(Action::StartSearch);
    type_text(&mut state, " rust ");

    let action = state.input_action(key(KeyCode::Enter));
    assert_eq!(action, Action::SubmitSearch);

    let dispatch = state.dispatch_action(action);

    let request_id = match dispatch.effects.as_slice() {
      [Effect::Search { query, request_id }] => {
        assert_eq!(query, "rust");
        *request_id
      }
      effects => panic!("unexpected effects: {effects:?}"),
    };

    assert_eq!(state.search_query(), "rust");

    state.handle_event(Event::SearchResults {
      request_id,
      result: Ok(vec![sample(5, 50), reply_to(6, 5, 10)]),
    });

    let Mode::Search(view) = state.mode() else {
      panic!("expected search view");
    };

    let ids = view
      .results
      .items()
      .iter()
      .map(|comment| comment.id.0)
      .collect::<Vec<_>>();

    assert_eq!(ids, vec![6, 5]);
  }

  #[test]
  fn failed_search_is_shown_inline() {
    let mut state = loaded_state(vec![sample(1, 0)]);

    state.dispatch_action(Action::StartSearch);
    type_text(&mut state, "rust");
    let dispatch = state.dispatch_action(Action::SubmitSearch);

    let [Effect::Search { request_id, .. }] = dispatch.effects.as_slice() else {
      panic!("expected a search");
    };

    state.handle_event(Event::SearchResults {
      request_id: *request_id,
      result: Err(ClientError::from_status(StatusCode::BAD_GATEWAY, b"")),
    });

    let Mode::Search(view) = state.mode() else {
      panic!("expected search view");
    };

    assert_eq!(
      view.placeholder(),
      Some("Search failed: HTTP error 502 Bad Gateway")
    );
  }

  #[test]
  fn clearing_search_restores_root_tree() {
    let mut state = loaded_state(vec![sample(1, 0)]);

    state.dispatch_action(Action::StartSearch);
    type_text(&mut state, "rust");
    state.dispatch_action(Action::SubmitSearch);

    let dispatch = state.dispatch_action(Action::ClearSearch);

    let request_id = match dispatch.effects.as_slice() {
      [Effect::FetchRoots { request_id, search: None }] => *request_id,
      effects => panic!("unexpected effects: {effects:?}"),
    };

    assert!(state.search_query().is_empty());

    state.handle_event(Event::Roots {
      request_id,
      result: Ok(page(vec![sample(1, 0)])),
    });

    assert!(matches!(state.mode(), Mode::Tree(_)));
  }

  #[test]
  fn blank_search_behaves_like_clear() {
    let mut state = loaded_state(vec![sample(1, 0)]);

    state.dispatch_action(Action::StartSearch);
    type_text(&mut state, "   ");

    let dispatch = state.dispatch_action(Action::SubmitSearch);

    assert!(matches!(
      dispatch.effects.as_slice(),
      [Effect::FetchRoots { search: None, .. }]
    ));
  }

  #[test]
  fn submission_during_search_reloads_roots_with_search_filter() {
    let mut state = loaded_state(vec![sample(1, 0)]);

    state.dispatch_action(Action::StartSearch);
    type_text(&mut state, "rust");
    let dispatch = state.dispatch_action(Action::SubmitSearch);

    let [Effect::Search { request_id, .. }] = dispatch.effects.as_slice() else {
      panic!("expected a search");
    };

    state.handle_event(Event::SearchResults {
      request_id: *request_id,
      result: Ok(vec![sample(1, 0)]),
    });

    state.dispatch_action(Action::Reply);
    type_text(&mut state, "ann");
    state.input_action(key(KeyCode::Tab));
    type_text(&mut state, "rust rocks");

    let dispatch = state.dispatch_action(Action::SubmitForm);

    let [Effect::SubmitComment { request_id, .. }] = dispatch.effects.as_slice()
    else {
      panic!("expected a submission");
    };

    let effects = state.handle_event(Event::CommentSubmitted {
      request_id: *request_id,
      result: Ok(()),
    });

    assert!(matches!(
      effects.as_slice(),
      [Effect::FetchRoots { search: Some(search), .. }] if search == "rust"
    ));
  }

  #[test]
  fn delete_is_confirmation_gated_and_never_calls_the_backend() {
    let mut state = loaded_state(vec![sample(1, 0)]);

    assert!(state.dispatch_action(Action::Delete).effects.is_empty());
    assert_eq!(state.pending_delete(), Some(CommentId(1)));

    let action = state.input_action(key(KeyCode::Char('n')));
    assert_eq!(action, Action::CancelDelete);
    state.dispatch_action(action);
    assert_eq!(state.pending_delete(), None);
    assert!(notice(&state).is_none());

    state.dispatch_action(Action::Delete);

    let action = state.input_action(key(KeyCode::Char('y')));
    assert_eq!(action, Action::ConfirmDelete);

    let dispatch = state.dispatch_action(action);

    assert!(dispatch.effects.is_empty());
    assert_eq!(
      notice(&state),
      Some((DELETE_UNIMPLEMENTED.to_string(), NoticeKind::Error))
    );
  }

  #[test]
  fn open_in_browser_targets_web_interface() {
    let mut state = loaded_state(Vec::new());

    let dispatch = state.dispatch_action(Action::OpenInBrowser);

    assert_eq!(
      dispatch.effects,
      vec![Effect::OpenUrl {
        url: "http://localhost:8080".into()
      }]
    );
  }

  #[test]
  fn second_submission_waits_for_the_first() {
    let mut state = loaded_state(vec![sample(1, 0)]);

    state.dispatch_action(Action::ComposeRoot);
    type_text(&mut state, "ann");
    state.input_action(key(KeyCode::Tab));
    type_text(&mut state, "hello");

    assert_eq!(state.dispatch_action(Action::SubmitForm).effects.len(), 1);
    assert!(state.dispatch_action(Action::SubmitForm).effects.is_empty());
  }

  #[test]
  fn status_line_prefers_prompt_then_notice() {
    let mut state = loaded_state(Vec::new());

    assert_eq!(state.status_line(), (TREE_STATUS.to_string(), None));

    state.set_notice("Comment added.".into(), NoticeKind::Success);
    assert_eq!(
      state.status_line(),
      ("Comment added.".to_string(), Some(NoticeKind::Success))
    );

    state.dispatch_action(Action::StartSearch);
    assert_eq!(state.status_line(), ("Search: ".to_string(), None));
  }

  #[test]
  fn expired_notices_are_cleared() {
    let mut state = loaded_state(Vec::new());

    state.transient_message =
      Some(TransientMessage::expired("old".into(), NoticeKind::Error));

    state.update_transient_message();

    assert!(state.transient_message.is_none());
  }

  #[test]
  fn ctrl_c_quits_even_while_typing() {
    let mut state = loaded_state(Vec::new());

    state.dispatch_action(Action::ComposeRoot);

    let action = state
      .input_action(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));

    assert_eq!(action, Action::Quit);
    assert!(state.dispatch_action(action).should_exit);
  }
}
