use std::env;
use std::path::PathBuf;

use crate::model;

/// Storage account credentials, resolved from the environment. Never
/// embedded in source.
#[derive(Clone)]
pub struct Credentials {
    pub account: String,
    pub access_key: String,
}

impl Credentials {
    /// `AZURE_STORAGE_CONNECTION_STRING` wins if set; otherwise
    /// `AZURE_STORAGE_ACCOUNT` + `AZURE_STORAGE_KEY`. A `.env` file in the
    /// working directory is honored.
    pub fn from_env() -> Result<Self, model::trip::TripError> {
        dotenv::dotenv().ok();

        if let Ok(raw) = env::var("AZURE_STORAGE_CONNECTION_STRING") {
            return Self::from_connection_string(&raw);
        }

        let account = env::var("AZURE_STORAGE_ACCOUNT").map_err(|_| {
            model::trip::TripError::Connection("AZURE_STORAGE_ACCOUNT is not set".to_string())
        })?;
        let access_key = env::var("AZURE_STORAGE_KEY").map_err(|_| {
            model::trip::TripError::Connection("AZURE_STORAGE_KEY is not set".to_string())
        })?;

        Ok(Self {
            account,
            access_key,
        })
    }

    /// Format: `DefaultEndpointsProtocol=https;AccountName=...;AccountKey=...;...`
    pub fn from_connection_string(raw: &str) -> Result<Self, model::trip::TripError> {
        let account = field(raw, "AccountName=").ok_or_else(|| {
            model::trip::TripError::Connection(
                "connection string is missing AccountName".to_string(),
            )
        })?;
        let access_key = field(raw, "AccountKey=").ok_or_else(|| {
            model::trip::TripError::Connection(
                "connection string is missing AccountKey".to_string(),
            )
        })?;

        Ok(Self {
            account,
            access_key,
        })
    }
}

fn field(raw: &str, prefix: &str) -> Option<String> {
    raw.split(';')
        .find_map(|part| part.strip_prefix(prefix))
        .map(|value| value.to_string())
}

/// Run options, resolved from CLI flags.
#[derive(Clone, Debug)]
pub struct Config {
    /// Directory the source and downloaded files are written to
    pub data_dir: PathBuf,
    pub container_prefix: String,
    pub file_prefix: String,
    /// Pause for operator confirmation between steps
    pub interactive: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_connection_string() {
        let raw = "DefaultEndpointsProtocol=https;AccountName=demoaccount;AccountKey=c2VjcmV0a2V5==;EndpointSuffix=core.windows.net";

        let credentials =
            Credentials::from_connection_string(raw).expect("parse failed");

        assert_eq!(credentials.account, "demoaccount");
        // base64 padding stays intact
        assert_eq!(credentials.access_key, "c2VjcmV0a2V5==");
    }

    #[test]
    fn test_from_connection_string_missing_fields() {
        let cases = vec![
            "DefaultEndpointsProtocol=https;AccountKey=abc",
            "DefaultEndpointsProtocol=https;AccountName=demoaccount",
            "",
        ];

        for raw in cases {
            let result = Credentials::from_connection_string(raw);
            assert!(
                matches!(result, Err(model::trip::TripError::Connection(_))),
                "expected a connection error for case: {}",
                raw
            );
        }
    }
}
