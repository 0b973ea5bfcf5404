use std::path::{Path, PathBuf};

use uuid::Uuid;

pub fn unique_name(prefix: &str) -> String {
    format!("{}{}", prefix, Uuid::new_v4())
}

pub fn unique_text_file_name(prefix: &str) -> String {
    format!("{}{}.txt", prefix, Uuid::new_v4())
}

/// First occurrence on the whole path string, not a suffix-aware rename: a
/// `.txt` in an earlier component takes the replacement instead.
pub fn derive_download_path(upload_path: &Path) -> PathBuf {
    let raw = upload_path
        .to_string_lossy()
        .replacen(".txt", "DOWNLOADED.txt", 1);

    PathBuf::from(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_name() {
        let first = unique_name("demoblob");
        let second = unique_name("demoblob");

        assert!(first.starts_with("demoblob"));
        assert!(first.len() > "demoblob".len());
        assert_ne!(first, second, "names must differ across invocations");
    }

    #[test]
    fn test_unique_text_file_name() {
        let first = unique_text_file_name("demofile");
        let second = unique_text_file_name("demofile");

        assert!(first.starts_with("demofile"));
        assert!(first.ends_with(".txt"));
        assert_ne!(first, second, "names must differ across invocations");
    }

    #[test]
    fn test_derive_download_path() {
        let cases = vec![
            (
                "./azdata/demofileABC.txt",
                "./azdata/demofileABCDOWNLOADED.txt",
            ),
            ("/tmp/data/demofile1.txt", "/tmp/data/demofile1DOWNLOADED.txt"),
            // first occurrence wins, even mid-path
            ("./az.txt/demofile.txt", "./azDOWNLOADED.txt/demofile.txt"),
        ];

        for (input, expected) in cases {
            let result = derive_download_path(Path::new(input));
            assert_eq!(
                result,
                PathBuf::from(expected),
                "failed derivation for case: {}",
                input
            );
        }
    }
}
