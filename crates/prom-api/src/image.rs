//! Loading a profile picture from disk for the wizard.
//!
//! No image host is configured, so pictures travel inside the profile body
//! as a `data:` URL; see [`prom_core::Picture::data_url`].

use std::fs;
use std::path::Path;

use prom_core::Picture;

use crate::error::{ApiError, Result};

/// MIME type from the file extension. Only common web image types are
/// accepted.
pub fn mime_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

pub fn load_picture(path: &Path) -> Result<Picture> {
    let mime = mime_for(path).ok_or_else(|| {
        ApiError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("{} is not a png, jpeg, gif or webp image", path.display()),
        ))
    })?;
    let bytes = fs::read(path)?;
    tracing::debug!("loaded {} ({} bytes)", path.display(), bytes.len());
    Ok(Picture {
        mime: mime.to_string(),
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_mime_for() {
        assert_eq!(mime_for(Path::new("me.PNG")), Some("image/png"));
        assert_eq!(mime_for(Path::new("me.jpeg")), Some("image/jpeg"));
        assert_eq!(mime_for(Path::new("me.txt")), None);
        assert_eq!(mime_for(Path::new("noext")), None);
    }

    #[test]
    fn test_load_picture() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("selfie.gif");
        fs::write(&path, b"GIF89a").unwrap();

        let picture = load_picture(&path).unwrap();
        assert_eq!(picture.mime, "image/gif");
        assert!(picture.data_url().starts_with("data:image/gif;base64,"));
    }

    #[test]
    fn test_load_rejects_unknown_type() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "hello").unwrap();
        assert!(matches!(load_picture(&path), Err(ApiError::Io(_))));
    }
}
