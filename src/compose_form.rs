use super::*;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum FormField {
  #[default]
  Author,
  Content,
}

/// What a key press did to a form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FormInput {
  Cancel,
  Edited,
  Leave,
  None,
  Submit,
}

/// Author and content inputs shared by the root form and reply forms.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct ComposeForm {
  pub(crate) author: String,
  pub(crate) content: String,
  pub(crate) focus: FormField,
}

impl ComposeForm {
  const CURSOR: &str = "▏";
  const HINT: &str = "enter next/send • tab switch • ↑/↓ leave • esc cancel";

  fn field_line(
    indent: &str,
    label: &'static str,
    value: &str,
    cursor: bool,
  ) -> Line<'static> {
    let mut spans = vec![
      Span::raw(indent.to_string()),
      Span::styled(label, Style::default().fg(Color::DarkGray)),
      Span::styled(terminal_text(value), Style::default().fg(Color::White)),
    ];

    if cursor {
      spans.push(Span::styled(Self::CURSOR, Style::default().fg(Color::Cyan)));
    }

    Line::from(spans)
  }

  fn focused_buffer(&mut self) -> &mut String {
    match self.focus {
      FormField::Author => &mut self.author,
      FormField::Content => &mut self.content,
    }
  }

  pub(crate) fn handle_key(&mut self, key: KeyEvent) -> FormInput {
    match key.code {
      KeyCode::Esc => FormInput::Cancel,
      KeyCode::Up | KeyCode::Down => FormInput::Leave,
      KeyCode::Tab | KeyCode::BackTab => {
        self.toggle_focus();
        FormInput::None
      }
      KeyCode::Enter => match self.focus {
        FormField::Author => {
          self.focus = FormField::Content;
          FormInput::None
        }
        FormField::Content => FormInput::Submit,
      },
      KeyCode::Backspace => {
        self.focused_buffer().pop();
        FormInput::Edited
      }
      KeyCode::Char(ch) => {
        let modifiers = key.modifiers;

        if modifiers.contains(KeyModifiers::CONTROL)
          || modifiers.contains(KeyModifiers::ALT)
          || modifiers.contains(KeyModifiers::SUPER)
        {
          return FormInput::None;
        }

        self.focused_buffer().push(ch);

        FormInput::Edited
      }
      _ => FormInput::None,
    }
  }

  /// Renders the form below `title`, with a cursor on the focused field
  /// when the form has keyboard focus.
  pub(crate) fn lines(
    &self,
    indent: &str,
    title: String,
    focused: bool,
  ) -> Vec<Line<'static>> {
    let title_style = if focused {
      Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
      Style::default().fg(Color::Cyan)
    };

    vec![
      Line::from(vec![
        Span::raw(indent.to_string()),
        Span::styled(title, title_style),
      ]),
      Self::field_line(
        indent,
        "author: ",
        &self.author,
        focused && self.focus == FormField::Author,
      ),
      Self::field_line(
        indent,
        "comment: ",
        &self.content,
        focused && self.focus == FormField::Content,
      ),
      Line::from(vec![
        Span::raw(indent.to_string()),
        Span::styled(Self::HINT, Style::default().fg(Color::DarkGray)),
      ]),
    ]
  }

  pub(crate) fn reset(&mut self) {
    *self = Self::default();
  }

  fn toggle_focus(&mut self) {
    self.focus = match self.focus {
      FormField::Author => FormField::Content,
      FormField::Content => FormField::Author,
    };
  }
}
