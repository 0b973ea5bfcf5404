use azure_storage::StorageCredentials;
use azure_storage_blobs::prelude::*;
use futures::StreamExt;

use crate::{adapters, config, model};

/// Builds the service client the round trip runs against. The SDK performs
/// no network traffic here; bad credentials surface at the first request.
pub fn service_client(credentials: &config::Credentials) -> BlobServiceClient {
    let storage_credentials = StorageCredentials::access_key(
        credentials.account.clone(),
        credentials.access_key.clone(),
    );

    BlobServiceClient::new(credentials.account.clone(), storage_credentials)
}

#[async_trait::async_trait]
impl adapters::BlobStore for BlobServiceClient {
    async fn create_container(&self, container: &str) -> Result<(), model::trip::TripError> {
        self.container_client(container)
            .create()
            .await
            .map_err(|err| {
                model::trip::TripError::ContainerCreation(format!(
                    "failed to create container {}: {}",
                    container, err
                ))
            })?;

        Ok(())
    }

    async fn put_blob(
        &self,
        container: &str,
        key: &str,
        body: Vec<u8>,
    ) -> Result<(), model::trip::TripError> {
        // block blob put replaces any existing blob of the same name
        self.container_client(container)
            .blob_client(key)
            .put_block_blob(body)
            .content_type("text/plain")
            .await
            .map_err(|err| {
                model::trip::TripError::Upload(format!("failed to put blob {}: {}", key, err))
            })?;

        Ok(())
    }

    async fn list_blobs(
        &self,
        container: &str,
    ) -> Result<Vec<model::trip::BlobEntry>, model::trip::TripError> {
        let mut entries = Vec::new();
        let mut stream = self.container_client(container).list_blobs().into_stream();

        while let Some(page) = stream.next().await {
            let page = page.map_err(|err| {
                model::trip::TripError::List(format!(
                    "failed to list blobs in {}: {}",
                    container, err
                ))
            })?;

            for blob in page.blobs.blobs() {
                entries.push(model::trip::BlobEntry {
                    name: blob.name.clone(),
                    size: blob.properties.content_length,
                });
            }
        }

        Ok(entries)
    }

    async fn get_blob(
        &self,
        container: &str,
        key: &str,
    ) -> Result<Vec<u8>, model::trip::TripError> {
        self.container_client(container)
            .blob_client(key)
            .get_content()
            .await
            .map_err(|err| {
                model::trip::TripError::Download(format!("failed to get blob {}: {}", key, err))
            })
    }
}
