use std::time::Duration;

use async_trait::async_trait;
use quiz_core::model::{Lesson, LessonId, WordList};
use reqwest::{Client, StatusCode, Url};
use storage::repository::{LessonRepository, StorageError};

use crate::error::RemoteLessonsError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Lesson repository backed by a lesson server.
///
/// Requests are one-shot; a failed request is reported, never retried.
#[derive(Clone, Debug)]
pub struct HttpLessonRepository {
    client: Client,
    base_url: Url,
}

impl HttpLessonRepository {
    /// Build a client for `base_url` (for example `http://127.0.0.1:5000`).
    ///
    /// # Errors
    ///
    /// Returns `RemoteLessonsError::InvalidUrl` if the url is not an absolute
    /// http(s) url, or `RemoteLessonsError::Http` if the client cannot be built.
    pub fn new(base_url: &str) -> Result<Self, RemoteLessonsError> {
        let base_url = Url::parse(base_url.trim())
            .map_err(|e| RemoteLessonsError::InvalidUrl(format!("{base_url}: {e}")))?;
        if !matches!(base_url.scheme(), "http" | "https") || base_url.cannot_be_a_base() {
            return Err(RemoteLessonsError::InvalidUrl(base_url.to_string()));
        }
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, base_url })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, RemoteLessonsError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| RemoteLessonsError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn fetch_ids(&self) -> Result<Vec<LessonId>, RemoteLessonsError> {
        let url = self.endpoint(&["lessons"])?;
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(RemoteLessonsError::HttpStatus(response.status()));
        }
        Ok(response.json().await?)
    }

    async fn fetch_words(&self, id: &LessonId) -> Result<WordList, RemoteLessonsError> {
        let url = self.endpoint(&["lessons", id.as_str()])?;
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(RemoteLessonsError::HttpStatus(response.status()));
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl LessonRepository for HttpLessonRepository {
    async fn list_lessons(&self) -> Result<Vec<LessonId>, StorageError> {
        self.fetch_ids().await.map_err(into_storage_error)
    }

    async fn get_lesson(&self, id: &LessonId) -> Result<Lesson, StorageError> {
        let words = self.fetch_words(id).await.map_err(into_storage_error)?;
        Ok(Lesson::new(id.clone(), words))
    }
}

fn into_storage_error(err: RemoteLessonsError) -> StorageError {
    match err {
        RemoteLessonsError::HttpStatus(StatusCode::NOT_FOUND) => StorageError::NotFound,
        RemoteLessonsError::Http(e) if e.is_decode() => StorageError::Serialization(e.to_string()),
        other => StorageError::Connection(other.to_string()),
    }
}
