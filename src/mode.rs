use super::*;

pub(crate) enum Mode {
  Search(SearchView),
  Tree(TreeView),
}

impl Mode {
  pub(crate) fn handle_key(&mut self, key: KeyEvent, page: usize) -> Action {
    let modifiers = key.modifiers;

    let step =
      isize::try_from(page.saturating_sub(1).max(1)).unwrap_or(isize::MAX);

    match key.code {
      KeyCode::Char('d') if modifiers.contains(KeyModifiers::CONTROL) => {
        self.move_by(step);
        Action::None
      }
      KeyCode::Char('u') if modifiers.contains(KeyModifiers::CONTROL) => {
        self.move_by(-step);
        Action::None
      }
      KeyCode::Char('q' | 'Q') => Action::Quit,
      KeyCode::Char('?') => Action::ShowHelp,
      KeyCode::Down | KeyCode::Char('j') => {
        self.move_by(1);
        Action::None
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.move_by(-1);
        Action::None
      }
      KeyCode::PageDown => {
        self.move_by(step);
        Action::None
      }
      KeyCode::PageUp => {
        self.move_by(-step);
        Action::None
      }
      KeyCode::Home => {
        self.move_by(isize::MIN);
        Action::None
      }
      KeyCode::End => {
        self.select_last();
        Action::None
      }
      KeyCode::Char('r') => Action::Reply,
      KeyCode::Char('c') => Action::ComposeRoot,
      KeyCode::Char('d') => Action::Delete,
      KeyCode::Char('/') => Action::StartSearch,
      KeyCode::Char('o' | 'O') => Action::OpenInBrowser,
      KeyCode::Char('R') => Action::Reload,
      KeyCode::Char('x') => Action::ClearSearch,
      KeyCode::Esc => match self {
        Mode::Search(_) => Action::ClearSearch,
        Mode::Tree(_) => Action::Quit,
      },
      KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => match self {
        Mode::Search(_) => Action::None,
        Mode::Tree(_) => Action::ShowReplies,
      },
      _ => Action::None,
    }
  }

  fn move_by(&mut self, delta: isize) {
    match self {
      Mode::Search(view) => view.results.move_by(delta),
      Mode::Tree(view) => view.move_by(delta),
    }
  }

  fn select_last(&mut self) {
    match self {
      Mode::Search(view) => view.results.select_last(),
      Mode::Tree(view) => view.select_last(),
    }
  }

  pub(crate) fn selected_id(&self) -> Option<CommentId> {
    match self {
      Mode::Search(view) => view.selected_id(),
      Mode::Tree(view) => view.selected,
    }
  }

  pub(crate) fn set_offset(&mut self, offset: usize) {
    match self {
      Mode::Search(view) => view.results.set_offset(offset),
      Mode::Tree(view) => view.offset = offset,
    }
  }
}
