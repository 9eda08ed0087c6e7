//! Remote asset-provider namespace store.
//!
//! HTTP client for the provider's REST API. Bytes travel as a base64
//! `data:` URI, which is the only upload form the provider accepts for
//! in-memory payloads. Every call returns the provider's explicit
//! success/failure indicator; a timeout counts as failure, and the engine
//! never assumes a timed-out call silently succeeded.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine as _;
use bytes::Bytes;
use serde::Deserialize;
use tracing::debug;

use drivebox_core::config::storage::RemoteStorageConfig;
use drivebox_core::traits::{NamespaceObject, NamespaceStore, UploadedObject};
use drivebox_core::{DriveError, DriveResult};

/// Namespace store talking to the remote asset provider.
#[derive(Debug, Clone)]
pub struct RemoteNamespaceStore {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    api_secret: String,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    url: String,
    public_id: String,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    resources: Vec<ListedResource>,
}

#[derive(Debug, Deserialize)]
struct ListedResource {
    public_id: String,
    #[serde(default)]
    bytes: Option<u64>,
}

impl RemoteNamespaceStore {
    /// Create a new remote namespace store from configuration.
    pub fn new(config: &RemoteStorageConfig) -> DriveResult<Self> {
        if config.base_url.is_empty() {
            return Err(DriveError::Configuration(
                "storage.remote.base_url is not set".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| DriveError::external(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    fn authed(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder.basic_auth(&self.api_key, Some(&self.api_secret))
    }

    async fn check(&self, response: reqwest::Response) -> DriveResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(DriveError::external(format!(
            "provider returned {status}: {body}"
        )))
    }

    fn transport(err: reqwest::Error) -> DriveError {
        DriveError::external(format!("provider call failed: {err}"))
    }
}

#[async_trait]
impl NamespaceStore for RemoteNamespaceStore {
    fn provider_type(&self) -> &str {
        "remote"
    }

    async fn health_check(&self) -> DriveResult<bool> {
        let response = self
            .authed(self.client.get(self.endpoint("ping")))
            .send()
            .await
            .map_err(Self::transport)?;
        Ok(response.status().is_success())
    }

    async fn create_folder(&self, path: &str) -> DriveResult<()> {
        let response = self
            .authed(self.client.post(self.endpoint("folders")))
            .json(&serde_json::json!({ "path": path }))
            .send()
            .await
            .map_err(Self::transport)?;
        self.check(response).await?;
        debug!(path, "Created namespace folder");
        Ok(())
    }

    async fn delete_folder(&self, path: &str) -> DriveResult<()> {
        let response = self
            .authed(self.client.delete(self.endpoint("folders")))
            .query(&[("path", path)])
            .send()
            .await
            .map_err(Self::transport)?;
        self.check(response).await?;
        debug!(path, "Deleted namespace folder");
        Ok(())
    }

    async fn rename_folder(&self, old_path: &str, new_path: &str) -> DriveResult<()> {
        let response = self
            .authed(self.client.post(self.endpoint("folders/rename")))
            .json(&serde_json::json!({ "from": old_path, "to": new_path }))
            .send()
            .await
            .map_err(Self::transport)?;
        self.check(response).await?;
        debug!(old_path, new_path, "Renamed namespace folder");
        Ok(())
    }

    async fn list_by_prefix(&self, prefix: &str) -> DriveResult<Vec<NamespaceObject>> {
        let response = self
            .authed(self.client.get(self.endpoint("resources")))
            .query(&[("prefix", prefix)])
            .send()
            .await
            .map_err(Self::transport)?;
        let listed: ListResponse = self
            .check(response)
            .await?
            .json()
            .await
            .map_err(Self::transport)?;

        Ok(listed
            .resources
            .into_iter()
            .map(|r| NamespaceObject {
                path: r.public_id.clone(),
                public_id: r.public_id,
                size_bytes: r.bytes,
            })
            .collect())
    }

    async fn upload(&self, path: &str, mime_type: &str, data: Bytes) -> DriveResult<UploadedObject> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(&data);
        let data_uri = format!("data:{mime_type};base64,{encoded}");

        let response = self
            .authed(self.client.post(self.endpoint("upload")))
            .json(&serde_json::json!({ "file": data_uri, "path": path }))
            .send()
            .await
            .map_err(Self::transport)?;
        let uploaded: UploadResponse = self
            .check(response)
            .await?
            .json()
            .await
            .map_err(Self::transport)?;

        debug!(path, bytes = data.len(), "Uploaded object");
        Ok(UploadedObject {
            url: uploaded.url,
            public_id: uploaded.public_id,
        })
    }

    async fn delete_object(&self, public_id: &str) -> DriveResult<()> {
        let response = self
            .authed(self.client.post(self.endpoint("destroy")))
            .json(&serde_json::json!({ "public_id": public_id }))
            .send()
            .await
            .map_err(Self::transport)?;
        let destroyed: DestroyResponse = self
            .check(response)
            .await?
            .json()
            .await
            .map_err(Self::transport)?;

        // The provider reports "not found" and similar outcomes inside a
        // 200 response; anything but an explicit ok is a failure.
        if destroyed.result != "ok" {
            return Err(DriveError::external(format!(
                "destroy of '{public_id}' returned '{}'",
                destroyed.result
            )));
        }
        debug!(public_id, "Deleted object");
        Ok(())
    }

    async fn rename_object(&self, public_id: &str, new_path: &str) -> DriveResult<UploadedObject> {
        let response = self
            .authed(self.client.post(self.endpoint("rename")))
            .json(&serde_json::json!({ "from_public_id": public_id, "to_path": new_path }))
            .send()
            .await
            .map_err(Self::transport)?;
        let renamed: UploadResponse = self
            .check(response)
            .await?
            .json()
            .await
            .map_err(Self::transport)?;

        debug!(public_id, new_path, "Renamed object");
        Ok(UploadedObject {
            url: renamed.url,
            public_id: renamed.public_id,
        })
    }
}
