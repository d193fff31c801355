use {super::*, futures::try_join};

#[derive(Clone)]
pub(crate) struct Client {
  base_url: String,
  client: reqwest::Client,
}

impl Client {
  /// `parent` value the backend reads as "search every comment". It is a
  /// quirk of the comments API, not a parent id.
  const ALL_COMMENTS: i64 = 1;

  const COMMENTS_PATH: &str = "/comments";

  const ROOT_COMMENTS: i64 = 0;

  pub(crate) fn base_url(&self) -> &str {
    &self.base_url
  }

  fn comments_url(&self) -> String {
    format!("{}{}", self.base_url, Self::COMMENTS_PATH)
  }

  pub(crate) async fn create_comment(
    &self,
    comment: &NewComment,
  ) -> Result<(), ClientError> {
    tracing::debug!(parent_id = ?comment.parent_id, "posting comment");

    let response = self
      .client
      .post(self.comments_url())
      .json(comment)
      .send()
      .await?;

    let status = response.status();

    tracing::debug!(%status, "comment post answered");

    if status.is_success() {
      return Ok(());
    }

    Err(ClientError::from_status(status, &response.bytes().await?))
  }

  async fn fetch_comments(
    &self,
    parent: i64,
    search: Option<&str>,
  ) -> Result<CommentsPage, ClientError> {
    let mut query = vec![("parent", parent.to_string())];

    if let Some(search) = search.filter(|search| !search.is_empty()) {
      query.push(("search", search.to_string()));
    }

    tracing::debug!(parent, ?search, "fetching comments");

    let response = self
      .client
      .get(self.comments_url())
      .query(&query)
      .send()
      .await?;

    let status = response.status();
    let body = response.bytes().await?;

    if !status.is_success() {
      tracing::warn!(%status, parent, "comments request failed");
      return Err(ClientError::from_status(status, &body));
    }

    let page = serde_json::from_slice::<CommentsPage>(&body)?;

    tracing::debug!(parent, count = page.comments.len(), "comments fetched");

    Ok(page)
  }

  pub(crate) async fn fetch_replies(
    &self,
    parent: CommentId,
  ) -> Result<Vec<Comment>, ClientError> {
    Ok(self.fetch_comments(parent.0, None).await?.comments)
  }

  pub(crate) async fn fetch_roots(
    &self,
    search: Option<&str>,
  ) -> Result<CommentsPage, ClientError> {
    self.fetch_comments(Self::ROOT_COMMENTS, search).await
  }

  pub(crate) fn new(base_url: &str, timeout: Duration) -> Result<Self> {
    let client = reqwest::Client::builder()
      .timeout(timeout)
      .build()
      .context("could not build HTTP client")?;

    Ok(Self {
      base_url: base_url.trim_end_matches('/').to_string(),
      client,
    })
  }

  /// Searches roots and then every comment, merging both passes.
  ///
  /// The API filters by `parent` only, so a full search takes two requests.
  /// Root hits come first and win over duplicates from the second pass.
  pub(crate) async fn search_all(
    &self,
    query: &str,
  ) -> Result<Vec<Comment>, ClientError> {
    let (roots, all) = try_join!(
      self.fetch_comments(Self::ROOT_COMMENTS, Some(query)),
      self.fetch_comments(Self::ALL_COMMENTS, Some(query)),
    )?;

    Ok(search::merge_unique(roots.comments, all.comments))
  }
}
