pub(crate) struct SearchInput {
  pub(crate) buffer: String,
}

impl SearchInput {
  pub(crate) fn new(buffer: String) -> Self {
    Self { buffer }
  }

  pub(crate) fn prompt(&self) -> String {
    format!("Search: {}", self.buffer)
  }
}
