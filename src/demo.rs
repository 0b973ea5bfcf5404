use std::io;
use std::path::PathBuf;

use tracing::info;

use crate::{adapters, config, model, util};

/// Content written to the local source file and expected back from the blob.
pub const DEMO_CONTENT: &str = "Hello, World!";

/// Walks the storage account through a full round trip: container creation,
/// local file write, upload, listing, download. Each step awaits the
/// previous one; nothing is retried and nothing is cleaned up on failure.
pub struct RoundTrip {
    pub client: Box<dyn adapters::BlobStore>,
    pub config: config::Config,
}

/// What a completed run produced.
#[derive(Debug)]
pub struct Summary {
    pub container: String,
    pub blob_name: String,
    pub upload_path: PathBuf,
    pub download_path: PathBuf,
    pub listed: Vec<String>,
}

impl RoundTrip {
    pub fn new(client: Box<dyn adapters::BlobStore>, config: config::Config) -> Self {
        Self { client, config }
    }

    pub async fn run(&self) -> Result<Summary, model::trip::TripError> {
        let container = util::name::unique_name(&self.config.container_prefix);
        self.client.create_container(&container).await?;
        info!(
            container = %container,
            "container created, a local file will be created and uploaded next"
        );
        self.pause();

        let blob_name = util::name::unique_text_file_name(&self.config.file_prefix);
        let upload_path = self.config.data_dir.join(&blob_name);

        tokio::fs::create_dir_all(&self.config.data_dir)
            .await
            .map_err(|err| {
                model::trip::TripError::LocalIo(format!(
                    "failed to create {}: {}",
                    self.config.data_dir.display(),
                    err
                ))
            })?;
        tokio::fs::write(&upload_path, DEMO_CONTENT)
            .await
            .map_err(|err| {
                model::trip::TripError::LocalIo(format!(
                    "failed to write {}: {}",
                    upload_path.display(),
                    err
                ))
            })?;

        info!(path = %upload_path.display(), blob = %blob_name, "uploading local file");
        let body = tokio::fs::read(&upload_path).await.map_err(|err| {
            model::trip::TripError::LocalIo(format!(
                "failed to read {}: {}",
                upload_path.display(),
                err
            ))
        })?;
        self.client.put_blob(&container, &blob_name, body).await?;
        info!("upload finished, listing blobs next to verify");
        self.pause();

        let entries = self.client.list_blobs(&container).await?;
        for entry in &entries {
            info!(name = %entry.name, size = entry.size, "blob");
        }
        self.pause();

        let download_path = util::name::derive_download_path(&upload_path);
        info!(path = %download_path.display(), "downloading blob with an altered file name");
        let content = self.client.get_blob(&container, &blob_name).await?;
        tokio::fs::write(&download_path, &content)
            .await
            .map_err(|err| {
                model::trip::TripError::LocalIo(format!(
                    "failed to write {}: {}",
                    download_path.display(),
                    err
                ))
            })?;
        info!("download finished, locate the local file to verify");
        self.pause();

        Ok(Summary {
            container,
            blob_name,
            upload_path,
            download_path,
            listed: entries.into_iter().map(|entry| entry.name).collect(),
        })
    }

    fn pause(&self) {
        if !self.config.interactive {
            return;
        }

        println!("Press 'Enter' to continue.");
        let mut line = String::new();
        let _ = io::stdin().read_line(&mut line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{FailOn, MockStore};

    fn test_config(data_dir: PathBuf) -> config::Config {
        config::Config {
            data_dir,
            container_prefix: "demoblob".to_string(),
            file_prefix: "demofile".to_string(),
            interactive: false,
        }
    }

    #[tokio::test]
    async fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mock = MockStore::new();
        let trip = RoundTrip::new(
            Box::new(mock.clone()),
            test_config(dir.path().to_path_buf()),
        );

        let summary = trip.run().await.expect("round trip failed");

        assert!(summary.container.starts_with("demoblob"));
        assert_eq!(
            summary.upload_path.file_name().unwrap().to_string_lossy(),
            summary.blob_name,
            "blob name must equal the local file name"
        );
        assert_eq!(
            summary.listed,
            vec![summary.blob_name.clone()],
            "listing must surface exactly the uploaded blob"
        );
        assert_eq!(
            mock.ops(),
            vec!["create_container", "put_blob", "list_blobs", "get_blob"]
        );

        let uploaded = std::fs::read_to_string(&summary.upload_path).unwrap();
        let downloaded = std::fs::read_to_string(&summary.download_path).unwrap();
        assert_eq!(uploaded, DEMO_CONTENT);
        assert_eq!(downloaded, DEMO_CONTENT, "round trip must be byte-identical");
    }

    #[tokio::test]
    async fn test_container_names_differ_across_runs() {
        let dir = tempfile::tempdir().unwrap();
        let first = RoundTrip::new(
            Box::new(MockStore::new()),
            test_config(dir.path().to_path_buf()),
        );
        let second = RoundTrip::new(
            Box::new(MockStore::new()),
            test_config(dir.path().to_path_buf()),
        );

        let first = first.run().await.expect("first run failed");
        let second = second.run().await.expect("second run failed");

        assert_ne!(first.container, second.container);
    }

    #[tokio::test]
    async fn test_upload_failure_stops_the_run() {
        let dir = tempfile::tempdir().unwrap();
        let mock = MockStore::failing(FailOn::Put);
        let trip = RoundTrip::new(
            Box::new(mock.clone()),
            test_config(dir.path().to_path_buf()),
        );

        let err = trip.run().await.expect_err("expected the upload to fail");

        assert!(matches!(err, model::trip::TripError::Upload(_)));
        assert_eq!(err.step(), "upload");
        assert_eq!(
            mock.ops(),
            vec!["create_container", "put_blob"],
            "listing and download must not run after a failed upload"
        );

        // artifacts from completed steps stay in place
        assert_eq!(mock.containers().len(), 1);
        let leftovers = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 1, "the local source file must be left behind");
    }

    #[tokio::test]
    async fn test_container_failure_stops_before_local_io() {
        let dir = tempfile::tempdir().unwrap();
        let mock = MockStore::failing(FailOn::CreateContainer);
        let trip = RoundTrip::new(
            Box::new(mock.clone()),
            test_config(dir.path().join("azdata")),
        );

        let err = trip.run().await.expect_err("expected creation to fail");

        assert_eq!(err.step(), "create-container");
        assert_eq!(mock.ops(), vec!["create_container"]);
        assert!(
            !dir.path().join("azdata").exists(),
            "no local file may be written after a failed creation"
        );
    }
}
