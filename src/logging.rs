use {super::*, tracing_subscriber::EnvFilter};

/// Installs the global `tracing` subscriber.
///
/// Logging stays off unless a log file is configured, since stdout and
/// stderr belong to the terminal UI while it runs.
pub(crate) fn init(log_file: Option<&Path>, filter: &str) -> Result {
  let Some(path) = log_file else {
    return Ok(());
  };

  let filter = EnvFilter::try_new(filter)
    .with_context(|| format!("invalid log filter `{filter}`"))?;

  let file = OpenOptions::new()
    .create(true)
    .append(true)
    .open(path)
    .with_context(|| format!("could not open log file {}", path.display()))?;

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(Mutex::new(file))
    .with_ansi(false)
    .try_init()
    .map_err(|error| anyhow!("could not install log subscriber: {error}"))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn missing_log_file_disables_logging() {
    assert!(init(None, "not a [valid filter").is_ok());
  }
}
