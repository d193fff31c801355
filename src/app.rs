use super::*;

pub(crate) struct App {
  client: Client,
  event_rx: UnboundedReceiver<Event>,
  event_tx: UnboundedSender<Event>,
  handle: Handle,
  state: State,
}

impl App {
  const ROOT_FORM_TITLE: &str = "New comment";

  fn comment_lines(
    comment: &Comment,
    indent: &str,
    marker: Option<&'static str>,
    show_level: bool,
    available_width: u16,
  ) -> Vec<Line<'static>> {
    let mut header = vec![Span::raw(indent.to_string())];

    if let Some(marker) = marker {
      header.push(Span::styled(marker, Style::default().fg(Color::DarkGray)));
      header.push(Span::raw(" "));
    }

    header.push(Span::styled(
      comment.author(),
      Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    ));

    header.push(Span::styled(
      format!("  {}", comment.date()),
      Style::default().fg(Color::DarkGray),
    ));

    if show_level {
      header.push(Span::styled(
        format!("  level {}", comment.level()),
        Style::default().fg(Color::DarkGray),
      ));
    }

    let mut lines = vec![Line::from(header)];

    let wrap_width = usize::from(available_width)
      .saturating_sub(indent.chars().count())
      .max(1);

    for line in wrap_text(&comment.body(), wrap_width) {
      lines.push(Line::from(vec![
        Span::raw(indent.to_string()),
        Span::styled(line, Style::default().fg(Color::Gray)),
      ]));
    }

    lines
  }

  fn draw(&mut self, frame: &mut Frame) {
    let root_form_height = if self.state.root_form().is_some() { 5 } else { 0 };

    let layout = Layout::default()
      .direction(Direction::Vertical)
      .margin(1)
      .constraints([
        Constraint::Length(2),
        Constraint::Min(0),
        Constraint::Length(root_form_height),
        Constraint::Length(1),
      ])
      .split(frame.area());

    self.state.set_list_height(usize::from(layout[1].height));

    frame.render_widget(self.title(), layout[0]);

    self.draw_list(frame, layout[1]);

    if let Some(form) = self.state.root_form() {
      let focused = self.state.form_focus() == Some(FormTarget::Root);

      let title = Self::form_title(
        Self::ROOT_FORM_TITLE.into(),
        self.state.pending_target() == Some(FormTarget::Root),
      );

      let panel = Paragraph::new(form.lines(BASE_INDENT, title, focused))
        .block(Block::default().borders(Borders::TOP));

      frame.render_widget(panel, layout[2]);
    }

    let (message, kind) = self.state.status_line();

    let status = Paragraph::new(message).style(
      Style::default().fg(kind.map_or(Color::DarkGray, NoticeKind::color)),
    );

    frame.render_widget(status, layout[3]);

    if self.state.pending_delete().is_some() {
      Self::draw_delete_prompt(frame);
    }

    self.state.help().draw(frame);
  }

  fn draw_delete_prompt(frame: &mut Frame) {
    let area = centered_area(
      frame.area(),
      saturating_u16(DELETE_PROMPT.chars().count().saturating_add(4)),
      3,
    );

    frame.render_widget(Clear, area);

    let prompt = Paragraph::new(format!(" {DELETE_PROMPT}"))
      .block(Block::default().title(DELETE_TITLE).borders(Borders::ALL))
      .style(Style::default().fg(Color::Yellow));

    frame.render_widget(prompt, area);
  }

  fn draw_list(&mut self, frame: &mut Frame, area: Rect) {
    let focus = self.state.form_focus();
    let pending = self.state.pending_target();
    let reply_forms = self.state.reply_forms();

    let reply_form_lines = |id: CommentId, indent: &str| {
      reply_forms
        .visible_form()
        .filter(|(visible, _)| *visible == id)
        .map(|(_, form)| {
          form.lines(
            indent,
            Self::form_title(
              "Reply".into(),
              pending == Some(FormTarget::Reply(id)),
            ),
            focus == Some(FormTarget::Reply(id)),
          )
        })
        .unwrap_or_default()
    };

    let (list_items, selected_index, offset) = match self.state.mode() {
      Mode::Tree(view) => {
        let (visible, selected_pos) = view.visible_with_selection();

        let list_items = if let Some(text) = view.placeholder() {
          vec![Self::placeholder_item(text)]
        } else {
          visible
            .iter()
            .filter_map(|&(id, depth)| {
              let comment = view.tree.comment(id)?;

              let indent = format!("{BASE_INDENT}{}", "  ".repeat(depth));

              let marker = (comment.is_root() && !view.tree.replies_loaded(id))
                .then_some("[+]");

              let mut lines = Self::comment_lines(
                comment,
                &indent,
                marker,
                !comment.is_root(),
                area.width,
              );

              let note_indent = format!("{indent}  ");

              if view.loading_replies.contains(&id) {
                lines
                  .push(Self::note_line(&note_indent, LOADING_REPLIES_STATUS));
              } else if view.tree.has_no_replies(id) {
                lines.push(Self::note_line(&note_indent, NO_REPLIES));
              }

              lines.extend(reply_form_lines(id, &note_indent));
              lines.push(Line::from(Span::raw(indent)));

              Some(ListItem::new(lines))
            })
            .collect()
        };

        let offset = view.offset.min(selected_pos.unwrap_or(0));

        (list_items, selected_pos, offset)
      }
      Mode::Search(view) => {
        let list_items = if let Some(text) = view.placeholder() {
          vec![Self::placeholder_item(text)]
        } else {
          view
            .results
            .items()
            .iter()
            .map(|comment| {
              let mut lines = Self::comment_lines(
                comment,
                BASE_INDENT,
                None,
                true,
                area.width,
              );

              lines.extend(reply_form_lines(
                comment.id,
                &format!("{BASE_INDENT}  "),
              ));

              lines.push(Line::from(Span::raw(BASE_INDENT)));

              ListItem::new(lines)
            })
            .collect()
        };

        (
          list_items,
          view.results.selected_index(),
          view.results.offset(),
        )
      }
    };

    let mut list_state = ListState::default()
      .with_selected(selected_index)
      .with_offset(offset);

    let list = List::new(list_items)
      .highlight_style(Style::default().bg(Color::Rgb(30, 34, 42)))
      .highlight_symbol("");

    frame.render_stateful_widget(list, area, &mut list_state);

    self.state.mode_mut().set_offset(list_state.offset());
  }

  fn execute_effect(&mut self, effect: Effect) {
    let (client, sender) = (self.client.clone(), self.event_tx.clone());

    match effect {
      Effect::FetchRoots { request_id, search } => {
        self.handle.spawn(async move {
          let _ = sender.send(Event::Roots {
            request_id,
            result: client.fetch_roots(search.as_deref()).await,
          });
        });
      }
      Effect::FetchReplies { generation, parent } => {
        self.handle.spawn(async move {
          let _ = sender.send(Event::Replies {
            generation,
            parent,
            result: client.fetch_replies(parent).await,
          });
        });
      }
      Effect::Search { query, request_id } => {
        self.handle.spawn(async move {
          let _ = sender.send(Event::SearchResults {
            request_id,
            result: client.search_all(&query).await,
          });
        });
      }
      Effect::SubmitComment {
        comment,
        request_id,
      } => {
        self.handle.spawn(async move {
          let _ = sender.send(Event::CommentSubmitted {
            request_id,
            result: client.create_comment(&comment).await,
          });
        });
      }
      Effect::OpenUrl { url } => match webbrowser::open(&url) {
        Ok(()) => self.state.set_notice(
          format!("Opened in browser: {}", truncate(&url, 80)),
          NoticeKind::Success,
        ),
        Err(error) => {
          tracing::warn!(%url, %error, "could not open browser");

          self.state.set_notice(
            format!("Could not open link: {error}"),
            NoticeKind::Error,
          );
        }
      },
    }
  }

  fn form_title(title: String, sending: bool) -> String {
    if sending {
      format!("{title} · {SENDING_STATUS}")
    } else {
      title
    }
  }

  pub(crate) fn new(client: Client) -> Self {
    let (event_tx, event_rx) = mpsc::unbounded_channel();

    let state = State::new(client.base_url().to_string());

    Self {
      client,
      event_rx,
      event_tx,
      handle: Handle::current(),
      state,
    }
  }

  fn note_line(indent: &str, text: &'static str) -> Line<'static> {
    Line::from(vec![
      Span::raw(indent.to_string()),
      Span::styled(
        text,
        Style::default()
          .fg(Color::DarkGray)
          .add_modifier(Modifier::ITALIC),
      ),
    ])
  }

  fn placeholder_item(text: &str) -> ListItem<'static> {
    ListItem::new(Line::from(vec![
      Span::raw(BASE_INDENT),
      Span::raw(text.to_string()),
    ]))
  }

  fn process_pending_events(&mut self) {
    self.state.update_transient_message();

    while let Ok(event) = self.event_rx.try_recv() {
      for effect in self.state.handle_event(event) {
        self.execute_effect(effect);
      }
    }
  }

  pub(crate) fn run(
    &mut self,
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
  ) -> Result {
    for effect in self.state.take_effects() {
      self.execute_effect(effect);
    }

    loop {
      self.process_pending_events();

      terminal.draw(|frame| self.draw(frame))?;

      if !crossterm_event::poll(Duration::from_millis(200))? {
        continue;
      }

      let CrosstermEvent::Key(key) = crossterm_event::read()? else {
        continue;
      };

      if key.kind != KeyEventKind::Press {
        continue;
      }

      let action = self.state.input_action(key);

      let dispatch = self.state.dispatch_action(action);

      for effect in dispatch.effects {
        self.execute_effect(effect);
      }

      if dispatch.should_exit {
        tracing::info!("quitting");
        break;
      }
    }

    Ok(())
  }

  fn title(&self) -> Paragraph<'static> {
    let mut spans = vec![
      Span::styled(
        format!("{BASE_INDENT}COMMENTS"),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
      ),
      Span::styled(
        format!("  {}", self.client.base_url()),
        Style::default().fg(Color::DarkGray),
      ),
    ];

    let query = self.state.search_query();

    if !query.is_empty() {
      spans.push(Span::styled(
        format!("  search: {}", truncate(&terminal_text(query), 40)),
        Style::default().fg(Color::Yellow),
      ));
    }

    Paragraph::new(Line::from(spans))
  }
}
