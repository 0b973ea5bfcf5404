use async_trait::async_trait;

use crate::model;

pub mod azure;
pub mod mock;

/// Seam between the round trip and the storage service.
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn create_container(&self, container: &str) -> Result<(), model::trip::TripError>;

    async fn put_blob(
        &self,
        container: &str,
        key: &str,
        body: Vec<u8>,
    ) -> Result<(), model::trip::TripError>;

    async fn list_blobs(
        &self,
        container: &str,
    ) -> Result<Vec<model::trip::BlobEntry>, model::trip::TripError>;

    async fn get_blob(
        &self,
        container: &str,
        key: &str,
    ) -> Result<Vec<u8>, model::trip::TripError>;
}
