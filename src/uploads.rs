//! File persistence for avatar images and spreadsheet uploads.
//!
//! Both writes are synchronous and block the request for their duration.
//! Replaced avatar files are left on disk.

use std::fs;
use std::path::{Path, PathBuf};

use rand::Rng;

use crate::errors::ApiError;

/// Store an avatar under a random name, keeping the original extension.
/// Returns the generated filename for the user record.
pub fn save_avatar(dir: &Path, original_name: &str, data: &[u8]) -> Result<String, ApiError> {
    let mut token = [0u8; 8];
    rand::thread_rng().fill(&mut token);

    let filename = match Path::new(original_name)
        .extension()
        .and_then(|ext| ext.to_str())
    {
        Some(ext) => format!("{}.{}", hex::encode(token), ext),
        None => hex::encode(token),
    };

    fs::create_dir_all(dir)
        .map_err(|e| ApiError::InternalError(format!("Creating avatar dir failed: {}", e)))?;
    fs::write(dir.join(&filename), data)
        .map_err(|e| ApiError::InternalError(format!("Writing avatar failed: {}", e)))?;

    Ok(filename)
}

/// Store an uploaded file under its client-supplied base name. The file is
/// only saved, never parsed.
pub fn save_upload(dir: &Path, filename: &str, data: &[u8]) -> Result<PathBuf, ApiError> {
    // Keep only the final path component of whatever the client sent.
    let base = Path::new(filename)
        .file_name()
        .ok_or_else(|| ApiError::InternalError("Empty upload filename".to_string()))?;

    fs::create_dir_all(dir)
        .map_err(|e| ApiError::InternalError(format!("Creating upload dir failed: {}", e)))?;
    let path = dir.join(base);
    fs::write(&path, data)
        .map_err(|e| ApiError::InternalError(format!("Writing upload failed: {}", e)))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("sentiment-blog-uploads-{}", Uuid::new_v4()))
    }

    #[test]
    fn avatar_names_are_random_hex_with_extension() {
        let dir = temp_dir();
        let first = save_avatar(&dir, "me.png", b"bytes").unwrap();
        let second = save_avatar(&dir, "me.png", b"bytes").unwrap();

        assert!(first.ends_with(".png"));
        assert_ne!(first, second);
        assert_eq!(fs::read(dir.join(&first)).unwrap(), b"bytes");
    }

    #[test]
    fn avatar_without_extension_is_bare_hex() {
        let dir = temp_dir();
        let name = save_avatar(&dir, "avatar", b"bytes").unwrap();
        assert_eq!(name.len(), 16);
        assert!(!name.contains('.'));
    }

    #[test]
    fn uploads_keep_only_the_base_name() {
        let dir = temp_dir();
        let path = save_upload(&dir, "../../etc/report.xlsx", b"cells").unwrap();
        assert_eq!(path, dir.join("report.xlsx"));
        assert_eq!(fs::read(&path).unwrap(), b"cells");
    }
}
