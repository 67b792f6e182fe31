use crate::config::Config;
use crate::uploaded_image::preview::{decode_preview, PreviewImage};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum UploadError {
    #[error("unsupported file type: {0}")]
    UnsupportedExtension(String),
    #[error("could not read file: {0}")]
    Io(String),
    #[error("could not decode image: {0}")]
    Decode(String),
}

/// Where a selected file comes from: a path on disk, or bytes handed over by a drop.
#[derive(Clone, PartialEq)]
pub enum UploadSource {
    Path(PathBuf),
    Bytes {
        filename: String,
        content_type: Option<String>,
        bytes: Arc<[u8]>,
    },
}

impl UploadSource {
    pub fn filename(&self) -> String {
        match self {
            UploadSource::Path(path) => file_name_of(path),
            UploadSource::Bytes { filename, .. } => filename.clone(),
        }
    }
}

impl std::fmt::Debug for UploadSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadSource::Path(path) => f.debug_tuple("Path").field(path).finish(),
            UploadSource::Bytes {
                filename,
                content_type,
                bytes,
            } => f
                .debug_struct("Bytes")
                .field("filename", filename)
                .field("content_type", content_type)
                .field("len", &bytes.len())
                .finish(),
        }
    }
}

/// A selected image. `bytes` is the file content exactly as read and is what
/// gets uploaded; `preview` is decoded once from it for display.
#[derive(Clone, PartialEq)]
pub struct UploadedImage {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
    pub preview: PreviewImage,
}

impl std::fmt::Debug for UploadedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadedImage")
            .field("filename", &self.filename)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .field("preview", &self.preview)
            .finish()
    }
}

impl UploadedImage {
    pub fn load(source: &UploadSource, config: &Config) -> Result<Self, UploadError> {
        match source {
            UploadSource::Path(path) => Self::from_path(path, config),
            UploadSource::Bytes {
                filename,
                content_type,
                bytes,
            } => Self::from_bytes(filename, content_type.as_deref(), bytes.to_vec(), config),
        }
    }

    pub fn from_path(path: &Path, config: &Config) -> Result<Self, UploadError> {
        let filename = file_name_of(path);
        ensure_accepted(&filename, config)?;

        let bytes = std::fs::read(path).map_err(|e| UploadError::Io(e.to_string()))?;

        Self::from_bytes(&filename, None, bytes, config)
    }

    pub fn from_bytes(
        filename: &str,
        declared_content_type: Option<&str>,
        bytes: Vec<u8>,
        config: &Config,
    ) -> Result<Self, UploadError> {
        ensure_accepted(filename, config)?;

        let preview = decode_preview(&bytes, config.preview_max_side)?;

        Ok(Self {
            filename: filename.to_string(),
            content_type: content_type_for(filename, declared_content_type, config),
            bytes,
            preview,
        })
    }
}

pub fn is_accepted(filename: &str, config: &Config) -> bool {
    match extension_of(filename) {
        Some(extension) => config
            .accepted_extensions
            .iter()
            .any(|accepted| accepted.eq_ignore_ascii_case(&extension)),
        None => false,
    }
}

fn ensure_accepted(filename: &str, config: &Config) -> Result<(), UploadError> {
    if is_accepted(filename, config) {
        Ok(())
    } else {
        Err(UploadError::UnsupportedExtension(filename.to_string()))
    }
}

/// Declared type first, then the extension, then the configured default.
pub fn content_type_for(filename: &str, declared: Option<&str>, config: &Config) -> String {
    if let Some(declared) = declared.map(str::trim).filter(|d| !d.is_empty()) {
        return declared.to_string();
    }

    match extension_of(filename).as_deref() {
        Some("png") => "image/png".to_string(),
        Some("jpg") | Some("jpeg") => "image/jpeg".to_string(),
        _ => config.default_content_type.clone(),
    }
}

fn extension_of(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uploaded_image::fixture::{encode_jpeg, encode_png};
    use std::io::Write;

    #[test]
    fn test_accepted_extensions_are_case_insensitive() {
        let config = Config::default();

        assert!(is_accepted("leaf.jpg", &config));
        assert!(is_accepted("leaf.JPEG", &config));
        assert!(is_accepted("scan.Png", &config));
        assert!(!is_accepted("leaf.gif", &config));
        assert!(!is_accepted("leaf", &config));
    }

    #[test]
    fn test_content_type_prefers_declared() {
        let config = Config::default();

        assert_eq!(
            content_type_for("leaf.png", Some("image/x-custom"), &config),
            "image/x-custom"
        );
        assert_eq!(content_type_for("leaf.png", Some(""), &config), "image/png");
        assert_eq!(content_type_for("leaf.JPG", None, &config), "image/jpeg");
        assert_eq!(content_type_for("leaf", None, &config), "image/jpeg");
    }

    #[test]
    fn test_from_bytes_keeps_raw_bytes_verbatim() {
        let config = Config::default();
        let bytes = encode_jpeg(64, 48);

        let upload = UploadedImage::from_bytes("leaf.jpg", None, bytes.clone(), &config).unwrap();

        assert_eq!(upload.filename, "leaf.jpg");
        assert_eq!(upload.content_type, "image/jpeg");
        assert_eq!(upload.bytes, bytes);
        assert_eq!(upload.preview.rgb.len(), 64 * 48 * 3);
    }

    #[test]
    fn test_from_bytes_rejects_unsupported_extension() {
        let config = Config::default();

        let result = UploadedImage::from_bytes("leaf.bmp", None, encode_png(2, 2, [0, 0, 0]), &config);

        assert_eq!(
            result,
            Err(UploadError::UnsupportedExtension("leaf.bmp".to_string()))
        );
    }

    #[test]
    fn test_from_bytes_reports_corrupt_image() {
        let config = Config::default();

        let result = UploadedImage::from_bytes("leaf.png", None, vec![0, 1, 2, 3], &config);

        assert!(matches!(result, Err(UploadError::Decode(_))));
    }

    #[test]
    fn test_from_path_reads_whole_file() {
        let config = Config::default();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leaf.png");
        let bytes = encode_png(32, 32, [20, 160, 40]);
        std::fs::File::create(&path)
            .unwrap()
            .write_all(&bytes)
            .unwrap();

        let upload = UploadedImage::load(&UploadSource::Path(path), &config).unwrap();

        assert_eq!(upload.filename, "leaf.png");
        assert_eq!(upload.content_type, "image/png");
        assert_eq!(upload.bytes.len(), bytes.len());
    }

    #[test]
    fn test_from_path_missing_file() {
        let config = Config::default();
        let dir = tempfile::tempdir().unwrap();

        let result = UploadedImage::from_path(&dir.path().join("missing.jpg"), &config);

        assert!(matches!(result, Err(UploadError::Io(_))));
    }

    #[test]
    fn test_source_filename() {
        let source = UploadSource::Bytes {
            filename: "leaf.jpg".to_string(),
            content_type: None,
            bytes: Arc::from(vec![1u8, 2, 3]),
        };

        assert_eq!(source.filename(), "leaf.jpg");
        assert_eq!(
            UploadSource::Path(PathBuf::from("/tmp/photos/tomato.png")).filename(),
            "tomato.png"
        );
    }
}
