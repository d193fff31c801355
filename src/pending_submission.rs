use super::*;

pub(crate) struct PendingSubmission {
  pub(crate) request_id: u64,
  pub(crate) target: FormTarget,
}
