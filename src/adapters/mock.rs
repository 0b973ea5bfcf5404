use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use crate::{adapters, model};

/// Operation a test wants to fail.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FailOn {
    CreateContainer,
    Put,
    List,
    Get,
}

/// In-memory store. Clones share state so a test can keep a handle while
/// the round trip owns the boxed copy.
#[derive(Clone, Default)]
pub struct MockStore {
    fail_on: Option<FailOn>,
    containers: Arc<Mutex<Vec<String>>>,
    blobs: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    ops: Arc<Mutex<Vec<String>>>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(fail_on: FailOn) -> Self {
        Self {
            fail_on: Some(fail_on),
            ..Self::default()
        }
    }

    pub fn ops(&self) -> Vec<String> {
        self.ops
            .lock()
            .expect("failed to acquire `ops` guard")
            .clone()
    }

    pub fn containers(&self) -> Vec<String> {
        self.containers
            .lock()
            .expect("failed to acquire `containers` guard")
            .clone()
    }

    fn record(&self, op: &str) {
        self.ops
            .lock()
            .expect("failed to acquire `ops` guard")
            .push(op.to_string());
    }
}

#[async_trait::async_trait]
impl adapters::BlobStore for MockStore {
    async fn create_container(&self, container: &str) -> Result<(), model::trip::TripError> {
        self.record("create_container");

        if self.fail_on == Some(FailOn::CreateContainer) {
            return Err(model::trip::TripError::ContainerCreation(format!(
                "injected failure for {}",
                container
            )));
        }

        self.containers
            .lock()
            .expect("failed to acquire `containers` guard")
            .push(container.to_string());

        Ok(())
    }

    async fn put_blob(
        &self,
        container: &str,
        key: &str,
        body: Vec<u8>,
    ) -> Result<(), model::trip::TripError> {
        self.record("put_blob");

        if self.fail_on == Some(FailOn::Put) {
            return Err(model::trip::TripError::Upload(format!(
                "injected failure for {}",
                key
            )));
        }

        self.blobs
            .lock()
            .expect("failed to acquire `blobs` guard")
            .insert(format!("{}/{}", container, key), body);

        Ok(())
    }

    async fn list_blobs(
        &self,
        container: &str,
    ) -> Result<Vec<model::trip::BlobEntry>, model::trip::TripError> {
        self.record("list_blobs");

        if self.fail_on == Some(FailOn::List) {
            return Err(model::trip::TripError::List(format!(
                "injected failure for {}",
                container
            )));
        }

        let prefix = format!("{}/", container);
        let entries = self
            .blobs
            .lock()
            .expect("failed to acquire `blobs` guard")
            .iter()
            .filter_map(|(key, body)| {
                key.strip_prefix(&prefix).map(|name| model::trip::BlobEntry {
                    name: name.to_string(),
                    size: body.len() as u64,
                })
            })
            .collect();

        Ok(entries)
    }

    async fn get_blob(
        &self,
        container: &str,
        key: &str,
    ) -> Result<Vec<u8>, model::trip::TripError> {
        self.record("get_blob");

        if self.fail_on == Some(FailOn::Get) {
            return Err(model::trip::TripError::Download(format!(
                "injected failure for {}",
                key
            )));
        }

        self.blobs
            .lock()
            .expect("failed to acquire `blobs` guard")
            .get(&format!("{}/{}", container, key))
            .cloned()
            .ok_or_else(|| {
                model::trip::TripError::Download(format!("no such blob: {}/{}", container, key))
            })
    }
}
