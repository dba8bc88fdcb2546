use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use base64::Engine as _;

use crate::{
    error::{GridError, GridResult},
    model::Talk,
};

const FALLBACK_MIME: &str = "image/jpeg";

/// Bitmap ready to be inlined as a `data:` URI.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmbeddedImage {
    pub mime: &'static str,
    pub base64: String,
}

impl EmbeddedImage {
    /// Encode raw file bytes. The mime type is sniffed; unknown formats are labelled JPEG.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mime = match image::guess_format(bytes) {
            Ok(format) => format.to_mime_type(),
            Err(_) => FALLBACK_MIME,
        };
        Self {
            mime,
            base64: base64::engine::general_purpose::STANDARD.encode(bytes),
        }
    }

    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime, self.base64)
    }
}

/// Speaker photos read from disk up front, so rendering never touches the filesystem.
#[derive(Clone, Debug)]
pub struct PhotoStore {
    root: PathBuf,
    images: HashMap<String, EmbeddedImage>, // keyed by normalized relative path
}

impl PhotoStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            images: HashMap::new(),
        }
    }

    /// Load the photo of every speaker of `talks` from `root`.
    #[tracing::instrument(skip(talks, root))]
    pub fn prepare<'a>(
        talks: impl IntoIterator<Item = &'a Talk>,
        root: impl Into<PathBuf>,
    ) -> GridResult<Self> {
        let mut out = Self::new(root);
        for speaker in talks.into_iter().flat_map(|t| &t.speakers) {
            let key = normalize_rel_path(&speaker.photo_path)?;
            if out.images.contains_key(&key) {
                continue;
            }
            let bytes = out.read_bytes(&key)?;
            out.images.insert(key, EmbeddedImage::from_bytes(&bytes));
        }
        tracing::debug!(photos = out.images.len(), root = %out.root.display(), "prepared photos");
        Ok(out)
    }

    /// Register already-loaded bytes under `source`.
    pub fn insert_bytes(&mut self, source: &str, bytes: &[u8]) -> GridResult<()> {
        let key = normalize_rel_path(source)?;
        self.images.insert(key, EmbeddedImage::from_bytes(bytes));
        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn get(&self, source: &str) -> GridResult<&EmbeddedImage> {
        let key = normalize_rel_path(source)?;
        self.images
            .get(&key)
            .ok_or_else(|| GridError::ImageNotFound {
                path: self.root.join(&key),
            })
    }

    fn read_bytes(&self, norm_path: &str) -> GridResult<Vec<u8>> {
        let path = self.root.join(Path::new(norm_path));
        std::fs::read(&path).map_err(|e| {
            tracing::debug!(error = %e, path = %path.display(), "photo read failed");
            GridError::ImageNotFound { path }
        })
    }
}

/// Normalize a photo path found in speaker data to a relative `a/b/c.jpg` form.
///
/// Speaker data writes paths from the site root (`/images/x.jpg`), so leading slashes are
/// dropped. Parent components are rejected.
pub fn normalize_rel_path(source: &str) -> GridResult<String> {
    let s = source.trim().replace('\\', "/");
    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(GridError::malformed(
                format!("photo path '{source}'"),
                "must not contain '..'",
            ));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(GridError::malformed(
            format!("photo path '{source}'"),
            "must contain a file name",
        ));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F'];

    #[test]
    fn normalize_path_cross_platform() {
        assert_eq!(normalize_rel_path("a/b.jpg").unwrap(), "a/b.jpg");
        assert_eq!(normalize_rel_path("a\\b.jpg").unwrap(), "a/b.jpg");
        assert_eq!(
            normalize_rel_path("/images/speakers/ada.jpg").unwrap(),
            "images/speakers/ada.jpg"
        );
        assert_eq!(normalize_rel_path("./x//y.png").unwrap(), "x/y.png");
        assert!(normalize_rel_path("../x.jpg").is_err());
        assert!(normalize_rel_path("/").is_err());
    }

    #[test]
    fn embedded_image_sniffs_mime() {
        let jpeg = EmbeddedImage::from_bytes(JPEG_MAGIC);
        assert_eq!(jpeg.mime, "image/jpeg");
        assert!(jpeg.data_uri().starts_with("data:image/jpeg;base64,/9j/"));

        let unknown = EmbeddedImage::from_bytes(b"abc");
        assert_eq!(unknown.mime, FALLBACK_MIME);
        assert_eq!(unknown.base64, "YWJj");
    }

    #[test]
    fn lookups_share_normalization() {
        let mut store = PhotoStore::new("repo");
        store.insert_bytes("/images/ada.jpg", JPEG_MAGIC).unwrap();
        assert_eq!(store.len(), 1);
        assert!(store.get("images/ada.jpg").is_ok());
        match store.get("images/bob.jpg") {
            Err(GridError::ImageNotFound { path }) => {
                assert_eq!(path, Path::new("repo").join("images/bob.jpg"));
            }
            other => panic!("expected ImageNotFound, got {other:?}"),
        }
    }
}
