use super::*;

/// Treats a missing or `null` value as the type's default.
pub(crate) fn deserialize_null_default<'de, D, T>(
  deserializer: D,
) -> Result<T, D::Error>
where
  D: Deserializer<'de>,
  T: Default + Deserialize<'de>,
{
  Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

pub(crate) fn deserialize_parent_id<'de, D>(
  deserializer: D,
) -> Result<Option<CommentId>, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(
    Option::<i64>::deserialize(deserializer)?
      .filter(|id| *id != 0)
      .map(CommentId),
  )
}

pub(crate) fn format_timestamp<Tz>(time: &DateTime<Tz>) -> String
where
  Tz: TimeZone,
  Tz::Offset: Display,
{
  time.format("%d.%m.%Y, %H:%M:%S").to_string()
}

/// Replaces control characters so user text cannot drive the terminal.
pub(crate) fn terminal_text(text: &str) -> String {
  text
    .chars()
    .map(|ch| {
      if ch == '\n' || ch == '\t' {
        ' '
      } else if ch.is_control() {
        char::REPLACEMENT_CHARACTER
      } else {
        ch
      }
    })
    .collect()
}

pub(crate) fn truncate(text: &str, max_chars: usize) -> String {
  if text.chars().count() <= max_chars {
    return text.to_string();
  }

  let mut result = String::new();

  for (idx, ch) in text.chars().enumerate() {
    if idx >= max_chars {
      result.push_str("...");
      break;
    }

    result.push(ch);
  }

  result.trim_end().to_string()
}

pub(crate) fn wrap_text(text: &str, width: usize) -> Vec<String> {
  if text.is_empty() {
    return Vec::new();
  }

  let mut lines = Vec::new();
  let mut current = String::new();
  let mut current_width = 0;

  for word in text.split_whitespace() {
    let word_width = word.chars().count();

    if current.is_empty() {
      current.push_str(word);
      current_width = word_width;
    } else if current_width + 1 + word_width <= width {
      current.push(' ');
      current.push_str(word);
      current_width += 1 + word_width;
    } else {
      lines.push(current);
      current = word.to_string();
      current_width = word_width;
    }
  }

  if !current.is_empty() {
    lines.push(current);
  }

  if lines.is_empty() {
    vec![text.to_string()]
  } else {
    lines
  }
}
