// Configuration tree gateway
//
// Uniform mapping from configuration operations onto the EdgeOS
// `/api/edge/*.json` endpoints. Reads are plain GETs; set, delete, and
// batch are CSRF-protected POSTs. Every variant decodes into the same
// [`ConfigResponse`] envelope.

use serde_json::Value;
use tracing::debug;
use url::form_urlencoded;

use crate::client::EdgeClient;
use crate::error::Error;
use crate::models::{BatchEntry, ConfigResponse};

/// A single operation against the router's configuration tree.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigOperation {
    /// Fetch the entire configuration tree.
    Get,
    /// Fetch the subtree rooted at the given path segments.
    GetTree(Vec<String>),
    /// Fetch only the nodes named by a sparse JSON skeleton.
    Partial(Value),
    /// Write the nodes in the document.
    Set(Value),
    /// Remove the nodes in the document.
    Delete(Value),
    /// Apply a mixed list of set/delete entries in one commit.
    Batch(Vec<BatchEntry>),
}

impl EdgeClient {
    /// Execute any configuration operation through the shared envelope.
    pub async fn configure(&self, op: ConfigOperation) -> Result<Option<ConfigResponse>, Error> {
        match op {
            ConfigOperation::Get => self.config_get().await,
            ConfigOperation::GetTree(segments) => self.config_get_tree(&segments).await,
            ConfigOperation::Partial(skeleton) => self.config_partial(&skeleton).await,
            ConfigOperation::Set(document) => self.config_set(&document).await,
            ConfigOperation::Delete(document) => self.config_delete(&document).await,
            ConfigOperation::Batch(entries) => self.config_batch(&entries).await,
        }
    }

    /// The whole configuration tree.
    ///
    /// `GET /api/edge/get.json`
    pub async fn config_get(&self) -> Result<Option<ConfigResponse>, Error> {
        self.get_json(self.api_url("get.json")).await
    }

    /// Sparse fetch: only the nodes named by `skeleton` are returned.
    ///
    /// `GET /api/edge/partial.json?struct=<urlencoded-json>`
    pub async fn config_partial(&self, skeleton: &Value) -> Result<Option<ConfigResponse>, Error> {
        let mut url = self.api_url("partial.json");
        url.query_pairs_mut()
            .append_pair("struct", &serde_json::to_string(skeleton)?);
        self.get_json(url).await
    }

    /// The subtree rooted at `segments`.
    ///
    /// `GET /api/edge/getcfg.json?node[]=<seg>&node[]=<seg>...` -- one
    /// `node[]` pair per segment. The router matches the key literally,
    /// so only the segment values are percent-encoded. An empty path
    /// sends no query string at all and returns the full tree.
    pub async fn config_get_tree<S: AsRef<str>>(
        &self,
        segments: &[S],
    ) -> Result<Option<ConfigResponse>, Error> {
        let mut url = self.api_url("getcfg.json");
        if !segments.is_empty() {
            let query = segments
                .iter()
                .map(|segment| {
                    let value: String =
                        form_urlencoded::byte_serialize(segment.as_ref().as_bytes()).collect();
                    format!("node[]={value}")
                })
                .collect::<Vec<_>>()
                .join("&");
            url.set_query(Some(&query));
        }
        self.get_json(url).await
    }

    /// Write the configuration nodes in `document`.
    ///
    /// `POST /api/edge/set.json` with CSRF header.
    pub async fn config_set(&self, document: &Value) -> Result<Option<ConfigResponse>, Error> {
        debug!("setting configuration nodes");
        self.post_json(self.api_url("set.json"), document).await
    }

    /// Remove the configuration nodes in `document`.
    ///
    /// `POST /api/edge/delete.json` with CSRF header.
    pub async fn config_delete(&self, document: &Value) -> Result<Option<ConfigResponse>, Error> {
        debug!("deleting configuration nodes");
        self.post_json(self.api_url("delete.json"), document).await
    }

    /// Apply a list of batch entries in a single commit.
    ///
    /// `POST /api/edge/batch.json` with CSRF header.
    pub async fn config_batch(
        &self,
        entries: &[BatchEntry],
    ) -> Result<Option<ConfigResponse>, Error> {
        debug!("applying batch of {} entries", entries.len());
        self.post_json(self.api_url("batch.json"), &entries).await
    }
}
