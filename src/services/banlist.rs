use crate::config::banlist::BanListConfig;
use crate::models::{BanEntry, BanListDocument, Report};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chrono::Utc;
use reqwest::{header, Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

const APP_USER_AGENT: &str = concat!("modqueue/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("fetch failed with status {0}")]
    Fetch(StatusCode),

    #[error("write precondition failed, version token is stale")]
    PreconditionFailed,

    #[error("commit failed with status {0}")]
    Commit(StatusCode),

    #[error("malformed document content: {0}")]
    Content(String),
}

/// One revision of an externally stored document.
#[derive(Debug, Clone)]
pub struct DocumentRevision {
    pub content: String,
    /// Opaque token naming this revision, presented back on write.
    pub version: String,
}

/// A versioned document store with optimistic-concurrency writes. The
/// version token is the only cross-process concurrency control in the
/// system.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch the document at `path`, or `None` if it does not exist yet.
    async fn get(&self, path: &str) -> Result<Option<DocumentRevision>, StoreError>;

    /// Write `content` to `path`. `expected_version` must be the token read
    /// earlier, or `None` when creating the document; a stale token makes
    /// the store reject the write.
    async fn put(
        &self,
        path: &str,
        content: &str,
        expected_version: Option<&str>,
        message: &str,
    ) -> Result<(), StoreError>;
}

/// Document store backed by the GitHub contents API. The version token is
/// the blob sha; the commit message rides along on every write.
pub struct GitHubDocumentStore {
    client: Client,
    repo: String,
    token: String,
}

impl GitHubDocumentStore {
    pub fn new(repo: String, token: String) -> Self {
        let client = match Client::builder().timeout(Duration::from_secs(15)).build() {
            Ok(client) => client,
            Err(e) => {
                tracing::warn!("Failed to build document store client with timeout: {e}");
                Client::new()
            }
        };

        Self {
            client,
            repo,
            token,
        }
    }

    fn contents_url(&self, path: &str) -> String {
        format!("https://api.github.com/repos/{}/contents/{}", self.repo, path)
    }
}

#[derive(Deserialize)]
struct ContentsResponse {
    content: String,
    sha: String,
}

#[async_trait]
impl DocumentStore for GitHubDocumentStore {
    async fn get(&self, path: &str) -> Result<Option<DocumentRevision>, StoreError> {
        let response = self
            .client
            .get(self.contents_url(path))
            .bearer_auth(&self.token)
            .header(header::USER_AGENT, APP_USER_AGENT)
            .header(header::ACCEPT, "application/vnd.github+json")
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(StoreError::Fetch(response.status()));
        }

        let body: ContentsResponse = response.json().await?;

        // The contents API wraps base64 payloads in newlines.
        let stripped: String = body.content.split_whitespace().collect();
        let raw = BASE64
            .decode(stripped.as_bytes())
            .map_err(|e| StoreError::Content(e.to_string()))?;
        let content =
            String::from_utf8(raw).map_err(|e| StoreError::Content(e.to_string()))?;

        Ok(Some(DocumentRevision {
            content,
            version: body.sha,
        }))
    }

    async fn put(
        &self,
        path: &str,
        content: &str,
        expected_version: Option<&str>,
        message: &str,
    ) -> Result<(), StoreError> {
        let mut payload = json!({
            "message": message,
            "content": BASE64.encode(content),
        });
        if let Some(sha) = expected_version {
            payload["sha"] = json!(sha);
        }

        let response = self
            .client
            .put(self.contents_url(path))
            .bearer_auth(&self.token)
            .header(header::USER_AGENT, APP_USER_AGENT)
            .header(header::ACCEPT, "application/vnd.github+json")
            .json(&payload)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => Ok(()),
            // Sha mismatches come back as 409, missing shas as 422.
            StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => {
                Err(StoreError::PreconditionFailed)
            }
            status => Err(StoreError::Commit(status)),
        }
    }
}

/// Appends approved reports to the external ban-list document. Disabled
/// entirely when the feature flag is off or no store token is configured;
/// in that state every sync request is logged and dropped.
#[derive(Clone)]
pub struct BanListService {
    store: Option<Arc<dyn DocumentStore>>,
    path: String,
}

impl BanListService {
    pub fn new(config: BanListConfig) -> Self {
        if !config.enabled {
            tracing::info!("Ban-list sync disabled by configuration");
            return Self {
                store: None,
                path: config.path,
            };
        }

        let Some(token) = config.token else {
            tracing::warn!("Ban-list sync enabled but no store token configured, sync stays off");
            return Self {
                store: None,
                path: config.path,
            };
        };

        tracing::info!(repo = %config.repo, path = %config.path, "Ban-list sync enabled");
        Self {
            store: Some(Arc::new(GitHubDocumentStore::new(config.repo, token))),
            path: config.path,
        }
    }

    pub fn from_env() -> Self {
        Self::new(BanListConfig::from_env())
    }

    /// A service that never syncs, for deployments and tests without the
    /// external store.
    pub fn disabled() -> Self {
        Self {
            store: None,
            path: String::new(),
        }
    }

    /// Service over an arbitrary document store implementation.
    pub fn with_store(store: Arc<dyn DocumentStore>, path: String) -> Self {
        Self {
            store: Some(store),
            path,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.store.is_some()
    }

    /// Schedule a single-attempt ban-list append for an approved report and
    /// return immediately.
    ///
    /// The attempt runs on a detached task; any failure (fetch, parse,
    /// stale version token, transport) is logged there and never reaches
    /// the caller. The state transition that triggered the sync stands
    /// regardless of the outcome.
    pub fn schedule_sync(&self, report: Report) {
        let Some(store) = self.store.clone() else {
            tracing::info!(report_id = %report.id, "Ban-list sync is off, skipping report");
            return;
        };
        let path = self.path.clone();

        tokio::spawn(async move {
            match append_ban(store.as_ref(), &path, &report).await {
                Ok(total) => {
                    tracing::info!(
                        report_id = %report.id,
                        target_user = report.target,
                        total,
                        "Ban-list entry committed"
                    );
                }
                Err(e) => {
                    tracing::warn!(report_id = %report.id, "Ban-list sync failed: {e}");
                }
            }
        });
    }

    /// Run one sync attempt inline. Exposed for the scheduled task and for
    /// tests; `schedule_sync` is the fire-and-forget entry point.
    pub async fn sync(&self, report: &Report) -> Result<usize, StoreError> {
        match &self.store {
            Some(store) => append_ban(store.as_ref(), &self.path, report).await,
            None => {
                tracing::info!(report_id = %report.id, "Ban-list sync is off, skipping report");
                Ok(0)
            }
        }
    }
}

/// Read-modify-write of the ban-list document, single attempt.
///
/// An absent document starts an empty list with no version token; an
/// unparseable one is replaced rather than aborting the append. Returns the
/// entry count after the commit.
async fn append_ban(
    store: &dyn DocumentStore,
    path: &str,
    report: &Report,
) -> Result<usize, StoreError> {
    let revision = store.get(path).await?;

    let (mut document, version) = match revision {
        Some(revision) => {
            let document = match serde_json::from_str::<BanListDocument>(&revision.content) {
                Ok(document) => document,
                Err(e) => {
                    tracing::warn!("Ban-list document unreadable, starting a fresh list: {e}");
                    BanListDocument::default()
                }
            };
            (document, Some(revision.version))
        }
        None => (BanListDocument::default(), None),
    };

    document.banned_users.push(BanEntry::from_report(report));
    document.last_updated = Some(Utc::now());

    let content = serde_json::to_string_pretty(&document)
        .map_err(|e| StoreError::Content(e.to_string()))?;
    let message = format!("Ban user {} (report {})", report.target, report.id);

    store
        .put(path, &content, version.as_deref(), &message)
        .await?;

    Ok(document.banned_users.len())
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory stand-in for the external store. Versions are counters
    /// rendered as strings; a put with anything but the current version is
    /// rejected the way the real store rejects a stale sha.
    #[derive(Default)]
    pub struct MemoryDocumentStore {
        documents: Mutex<HashMap<String, (String, u64)>>,
    }

    impl MemoryDocumentStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn read(&self, path: &str) -> Option<String> {
            self.documents
                .lock()
                .unwrap()
                .get(path)
                .map(|(content, _)| content.clone())
        }

        pub fn seed(&self, path: &str, content: &str) {
            self.documents
                .lock()
                .unwrap()
                .insert(path.to_string(), (content.to_string(), 1));
        }
    }

    #[async_trait]
    impl DocumentStore for MemoryDocumentStore {
        async fn get(&self, path: &str) -> Result<Option<DocumentRevision>, StoreError> {
            Ok(self.documents.lock().unwrap().get(path).map(
                |(content, version)| DocumentRevision {
                    content: content.clone(),
                    version: version.to_string(),
                },
            ))
        }

        async fn put(
            &self,
            path: &str,
            content: &str,
            expected_version: Option<&str>,
            _message: &str,
        ) -> Result<(), StoreError> {
            let mut documents = self.documents.lock().unwrap();
            let current = documents.get(path).map(|(_, version)| *version);

            match (current, expected_version) {
                (None, None) => {
                    documents.insert(path.to_string(), (content.to_string(), 1));
                    Ok(())
                }
                (Some(version), Some(expected)) if expected == version.to_string() => {
                    documents.insert(path.to_string(), (content.to_string(), version + 1));
                    Ok(())
                }
                _ => Err(StoreError::PreconditionFailed),
            }
        }
    }
}
