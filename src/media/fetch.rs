// SPDX-License-Identifier: MPL-2.0
//! Resolves page sources to bitmaps.
//!
//! A source is either an `http://`/`https://` URL or a local file (a plain
//! path or a `file://` URL). [`Fetcher`] is the call-site collaborator: the
//! viewer asks it to fetch on every page appearance and it drops requests for
//! pages that are already loaded or in flight.
//!
//! There is no cancellation, retry or timeout. A page whose fetch stalls or
//! fails keeps its loading placeholder.

use super::bitmap::Bitmap;
use crate::config::MAX_SOURCE_BYTES;
use crate::error::{Error, FetchError, Result};
use crate::ui::viewer::state::{PageId, PageModel};
use futures_util::StreamExt;
use iced::Task;
use std::collections::HashSet;
use std::path::PathBuf;

const USER_AGENT: &str = concat!("LensPager/", env!("CARGO_PKG_VERSION"));
const MAX_REDIRECTS: usize = 10;

/// Where a page's bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Http(String),
    File(PathBuf),
}

impl Source {
    pub fn parse(reference: &str) -> Self {
        let lowered = reference.to_ascii_lowercase();
        if lowered.starts_with("http://") || lowered.starts_with("https://") {
            Source::Http(reference.to_string())
        } else if let Some(path) = reference.strip_prefix("file://") {
            Source::File(PathBuf::from(path))
        } else {
            Source::File(PathBuf::from(reference))
        }
    }
}

/// Builds the HTTP client shared by every page fetch.
pub fn http_client() -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
        .user_agent(USER_AGENT)
        .build()?)
}

/// Fetches and decodes one source.
pub async fn fetch(client: reqwest::Client, reference: String) -> Result<Bitmap> {
    let bytes = match Source::parse(&reference) {
        Source::Http(url) => download(&client, &url).await?,
        Source::File(path) => read_file(path).await?,
    };

    tokio::task::spawn_blocking(move || Bitmap::decode(&bytes))
        .await
        .map_err(|e| Error::Decode(e.to_string()))?
}

async fn read_file(path: PathBuf) -> Result<Vec<u8>> {
    let metadata = tokio::fs::metadata(&path).await?;
    if metadata.len() > MAX_SOURCE_BYTES {
        return Err(FetchError::TooLarge {
            limit: MAX_SOURCE_BYTES,
        }
        .into());
    }
    Ok(tokio::fs::read(&path).await?)
}

async fn download(client: &reqwest::Client, url: &str) -> Result<Vec<u8>> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status.as_u16()).into());
    }

    if response
        .content_length()
        .is_some_and(|len| len > MAX_SOURCE_BYTES)
    {
        return Err(FetchError::TooLarge {
            limit: MAX_SOURCE_BYTES,
        }
        .into());
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        if (bytes.len() + chunk.len()) as u64 > MAX_SOURCE_BYTES {
            return Err(FetchError::TooLarge {
                limit: MAX_SOURCE_BYTES,
            }
            .into());
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

/// Deduplicates fetch requests across page appearances.
#[derive(Debug, Default)]
pub struct Fetcher {
    requested: HashSet<PageId>,
    client: Option<reqwest::Client>,
}

impl Fetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `page` as requested and returns its source, or `None` if the
    /// page has no source, is already loaded, or was requested before.
    pub fn begin(&mut self, page: &PageModel) -> Option<String> {
        if page.is_loaded() {
            return None;
        }
        let source = page.source.as_ref()?;
        if !self.requested.insert(page.id) {
            tracing::trace!(page = %page.id, "fetch already requested");
            return None;
        }
        Some(source.clone())
    }

    /// Starts fetching `page` unless [`Fetcher::begin`] rejects it.
    ///
    /// The result arrives on the iced update loop through `on_done`.
    pub fn request<M>(
        &mut self,
        page: &PageModel,
        on_done: impl FnOnce(PageId, Result<Bitmap>) -> M + Send + 'static,
    ) -> Option<Task<M>>
    where
        M: Send + 'static,
    {
        let source = self.begin(page)?;
        let id = page.id;
        tracing::debug!(page = %id, %source, "fetching page");
        match self.client() {
            Ok(client) => Some(Task::perform(fetch(client, source), move |result| {
                on_done(id, result)
            })),
            Err(err) => Some(Task::done(on_done(id, Err(err)))),
        }
    }

    /// The shared HTTP client, built on first use.
    fn client(&mut self) -> Result<reqwest::Client> {
        if let Some(client) = &self.client {
            return Ok(client.clone());
        }
        let client = http_client()?;
        self.client = Some(client.clone());
        Ok(client)
    }

    pub fn has_client(&self) -> bool {
        self.client.is_some()
    }

    pub fn is_requested(&self, page: PageId) -> bool {
        self.requested.contains(&page)
    }

    pub fn requested_count(&self) -> usize {
        self.requested.len()
    }
}
