use super::*;

/// Concatenates two result sets, keeping the first occurrence of each id.
pub(crate) fn merge_unique(
  first: Vec<Comment>,
  second: Vec<Comment>,
) -> Vec<Comment> {
  let mut seen = HashSet::new();

  first
    .into_iter()
    .chain(second)
    .filter(|comment| seen.insert(comment.id))
    .collect()
}
