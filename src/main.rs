use {
  action::{Action, ActionDispatch},
  anyhow::{Context, anyhow},
  app::App,
  args::Args,
  chrono::{DateTime, Local, TimeZone, Utc},
  clap::Parser,
  client::Client,
  comment::{Comment, CommentId, sort_chronologically},
  comment_tree::CommentTree,
  comments_page::CommentsPage,
  compose_form::{ComposeForm, FormField, FormInput},
  crossterm::{
    event as crossterm_event,
    event::{
      Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
    },
    execute,
    style::Stylize,
    terminal::{
      EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
      enable_raw_mode,
    },
  },
  effect::Effect,
  error::ClientError,
  event::Event,
  form_target::FormTarget,
  help_view::{HelpView, centered_area, saturating_u16},
  list_view::ListView,
  load_status::LoadStatus,
  mode::Mode,
  new_comment::{NewComment, ValidationError},
  pending_submission::PendingSubmission,
  ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
      Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap,
    },
  },
  reply_forms::ReplyForms,
  search_input::SearchInput,
  search_view::SearchView,
  serde::{Deserialize, Deserializer, Serialize},
  state::State,
  std::{
    backtrace::BacktraceStatus,
    collections::{HashMap, HashSet},
    fmt::{self, Display, Formatter},
    fs::OpenOptions,
    io::{self, IsTerminal, Stdout},
    path::{Path, PathBuf},
    process,
    sync::Mutex,
    time::{Duration, Instant},
  },
  tokio::{
    runtime::Handle,
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
  },
  transient_message::{NoticeKind, TransientMessage},
  tree_view::TreeView,
  utils::{
    deserialize_null_default, deserialize_parent_id, format_timestamp,
    terminal_text, truncate, wrap_text,
  },
};

mod action;
mod app;
mod args;
mod client;
mod comment;
mod comment_tree;
mod comments_page;
mod compose_form;
mod effect;
mod error;
mod event;
mod export;
mod form_target;
mod help_view;
mod list_view;
mod load_status;
mod logging;
mod mode;
mod new_comment;
mod pending_submission;
mod reply_forms;
mod search;
mod search_input;
mod search_view;
mod state;
mod transient_message;
mod tree_view;
mod utils;

const TREE_STATUS: &str = "↑/k up • ↓/j down • enter replies • r reply • c comment • / search • ? help • q quit";

const SEARCH_STATUS: &str =
  "↑/k up • ↓/j down • r reply • / search again • x/esc clear search • ? help";

const HELP_TITLE: &str = "Help";
const HELP_STATUS: &str = "Press ? or esc to close help";

const LOADING_COMMENTS_STATUS: &str = "Loading comments...";
const LOADING_REPLIES_STATUS: &str = "Loading replies...";
const LOADING_SEARCH_STATUS: &str = "Searching...";
const SENDING_STATUS: &str = "Sending...";

const NO_COMMENTS: &str = "No comments yet.";
const NO_REPLIES: &str = "No replies yet.";
const NO_SEARCH_RESULTS: &str = "Nothing matches your search.";

const DELETE_TITLE: &str = "Delete comment";
const DELETE_PROMPT: &str = "Delete this comment? y confirm • n/esc keep";
const DELETE_UNIMPLEMENTED: &str = "Deleting comments is not implemented yet.";

const BASE_INDENT: &str = " ";

const HELP_TEXT: &str = "\
Navigation:
  ↑ / k   move selection up
  ↓ / j   move selection down
  pg↓     page down
  pg↑     page up
  ctrl+d  page down
  ctrl+u  page up
  home    jump to first comment
  end     jump to last comment

Comments:
  enter   show replies for the selected comment
  r       reply to the selected comment
  c       write a new comment
  d       delete the selected comment
  R       reload comments
  o       open the web interface in your browser

Search:
  /       start a search (type to edit, enter to submit)
  x       clear the search and show all comments
  esc     clear the search from the results view

Forms:
  tab     switch between author and comment
  enter   next field, or send from the comment field
  ↑ / ↓   leave the form, it stays open
  esc     cancel and discard the form

  ?       toggle this help
  q       quit comment-tree
";

type Result<T = (), E = anyhow::Error> = std::result::Result<T, E>;

fn initialize_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
  enable_raw_mode()?;

  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen)?;

  Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(
  terminal: &mut Terminal<CrosstermBackend<Stdout>>,
) -> Result {
  disable_raw_mode()?;

  execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

  terminal.show_cursor()?;

  Ok(())
}

async fn export_html(client: &Client, search: Option<&str>) -> Result {
  let html = match search.map(str::trim).filter(|query| !query.is_empty()) {
    Some(query) => {
      let mut results = client
        .search_all(query)
        .await
        .with_context(|| format!("failed to search for \"{query}\""))?;

      sort_chronologically(&mut results);

      export::search_results(&results)
    }
    None => {
      let mut page = client
        .fetch_roots(None)
        .await
        .context("failed to load root comments")?;

      sort_chronologically(&mut page.comments);

      export::root_comments(&page.comments)
    }
  };

  print!("{html}");

  Ok(())
}

async fn run() -> Result {
  let args = Args::parse();

  logging::init(args.log_file.as_deref(), &args.log_filter)?;

  let client = Client::new(&args.base_url, args.timeout())?;

  if args.export_html {
    return export_html(&client, args.search.as_deref()).await;
  }

  tracing::info!(base_url = client.base_url(), "starting comment-tree");

  let mut terminal = initialize_terminal()?;

  let mut app = App::new(client);

  let result = app.run(&mut terminal);

  restore_terminal(&mut terminal)?;

  result
}

#[tokio::main]
async fn main() {
  if let Err(error) = run().await {
    tracing::error!("{error:#}");

    let use_color = io::stderr().is_terminal();

    if use_color {
      eprintln!("{} {error}", "error:".bold().red());
    } else {
      eprintln!("error: {error}");
    }

    for (i, error) in error.chain().skip(1).enumerate() {
      if i == 0 {
        eprintln!();

        if use_color {
          eprintln!("{}", "because:".bold().red());
        } else {
          eprintln!("because:");
        }
      }

      if use_color {
        eprintln!("{} {error}", "-".bold().red());
      } else {
        eprintln!("- {error}");
      }
    }

    let backtrace = error.backtrace();

    if backtrace.status() == BacktraceStatus::Captured {
      if use_color {
        eprintln!("{}", "backtrace:".bold().red());
      } else {
        eprintln!("backtrace:");
      }

      eprintln!("{backtrace}");
    }

    process::exit(1);
  }
}
