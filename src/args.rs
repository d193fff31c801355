use super::*;

/// Command-line configuration. Every option can also come from the
/// environment so the client can be pointed at a backend without flags.
#[derive(Debug, Parser)]
#[command(
  name = "comment-tree",
  about = "Browse, search and post threaded comments from the terminal"
)]
pub(crate) struct Args {
  /// Base URL of the comment-tree backend
  #[arg(
    long,
    env = "COMMENT_TREE_URL",
    default_value = "http://localhost:8080"
  )]
  pub(crate) base_url: String,

  /// Print the root comments as an HTML fragment and exit
  #[arg(long)]
  pub(crate) export_html: bool,

  /// Write logs to this file (the terminal is reserved for the UI)
  #[arg(long, env = "COMMENT_TREE_LOG_FILE")]
  pub(crate) log_file: Option<PathBuf>,

  /// Log filter directive, e.g. `debug` or `comment_tree=trace`
  #[arg(long, env = "COMMENT_TREE_LOG", default_value = "info")]
  pub(crate) log_filter: String,

  /// Export search results for this query instead of the root comments
  #[arg(long, requires = "export_html")]
  pub(crate) search: Option<String>,

  /// Request timeout in seconds
  #[arg(long, env = "COMMENT_TREE_TIMEOUT", default_value_t = 30)]
  pub(crate) timeout_secs: u64,
}

impl Args {
  pub(crate) fn timeout(&self) -> Duration {
    Duration::from_secs(self.timeout_secs.max(1))
  }
}
