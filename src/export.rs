use {super::*, html_escape::encode_text, std::fmt::Write};

const NO_COMMENTS_HTML: &str =
  "<div class=\"loading\">No comments yet.</div>\n";
const NO_RESULTS_HTML: &str =
  "<div class=\"loading\">Nothing matches your search.</div>\n";

fn header(comment: &Comment, level: Option<u32>) -> String {
  let mut html = format!(
    "  <div class=\"comment-header\">\n    \
     <span class=\"comment-author\">{}</span>\n    \
     <span class=\"comment-date\">{}</span>\n",
    encode_text(&comment.author),
    encode_text(&comment.date()),
  );

  if let Some(level) = level {
    let _ = writeln!(
      html,
      "    <span class=\"search-level\">Level: {level}</span>"
    );
  }

  html.push_str("  </div>\n");

  html
}

fn content(comment: &Comment) -> String {
  format!(
    "  <div class=\"comment-content\">{}</div>\n",
    encode_text(&comment.content)
  )
}

/// Root comments as the widget's markup. Callers sort them first.
pub(crate) fn root_comments(comments: &[Comment]) -> String {
  if comments.is_empty() {
    return NO_COMMENTS_HTML.into();
  }

  comments.iter().fold(String::new(), |mut html, comment| {
    let _ = writeln!(
      html,
      "<div class=\"root-comment\" data-comment-id=\"{}\">",
      comment.id
    );

    html.push_str(&header(comment, None));
    html.push_str(&content(comment));
    html.push_str("</div>\n");

    html
  })
}

/// Search results, each tagged with its depth in the tree.
pub(crate) fn search_results(comments: &[Comment]) -> String {
  if comments.is_empty() {
    return NO_RESULTS_HTML.into();
  }

  comments.iter().fold(String::new(), |mut html, comment| {
    let level = comment.level();

    let _ = writeln!(
      html,
      "<div class=\"search-result level-{level}\" data-comment-id=\"{}\">",
      comment.id
    );

    html.push_str(&header(comment, Some(level)));
    html.push_str(&content(comment));
    html.push_str("</div>\n");

    html
  })
}
