//! Selected image files and their preview references.
//!
//! # Invariants
//!
//! - `previews().len() == images().len()` after every operation, and
//!   `previews()[i]` is derived from `images()[i]` alone.
//! - Every preview is a [`PreviewUrl`] handle issued by a [`PreviewRegistry`].
//!   Dropping the handle revokes it exactly once, so regenerating the list
//!   releases every superseded preview and dropping the manager releases the
//!   rest.

use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use crate::error::FormError;

// ---------------------------------------------------------------------------
// 1. Image files
// ---------------------------------------------------------------------------

/// An image selected for upload. Cloning shares the underlying bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    file_name: String,
    content_type: String,
    bytes: Arc<[u8]>,
}

impl ImageFile {
    /// Build a file handle from in-memory contents. The content type is
    /// guessed from the file name's extension.
    pub fn from_bytes(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        let file_name = file_name.into();
        let content_type = content_type_for(&file_name).to_owned();
        let bytes: Vec<u8> = bytes.into();
        Self {
            file_name,
            content_type,
            bytes: Arc::from(bytes),
        }
    }

    /// Read an image from disk.
    ///
    /// Returns [`FormError::NotAFile`] for directories and missing paths.
    pub fn open(path: &Path) -> Result<Self, FormError> {
        if !path.is_file() {
            return Err(FormError::NotAFile {
                path: path.to_path_buf(),
            });
        }
        let bytes = std::fs::read(path).map_err(|source| FormError::ImageRead {
            path: path.to_path_buf(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_owned());
        Ok(Self::from_bytes(file_name, bytes))
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

fn content_type_for(file_name: &str) -> &'static str {
    let ext = Path::new(file_name)
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

// ---------------------------------------------------------------------------
// 2. Preview references
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct Issued {
    next_serial: u64,
    live: BTreeSet<u64>,
}

/// Issues [`PreviewUrl`] handles and tracks which are still live.
///
/// Clones share the same bookkeeping.
#[derive(Debug, Clone, Default)]
pub struct PreviewRegistry {
    issued: Arc<Mutex<Issued>>,
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fresh preview reference for `image`. Every call yields a
    /// distinct URL, even for the same file.
    pub fn create(&self, image: &ImageFile) -> PreviewUrl {
        let serial = {
            let mut issued = self.lock();
            issued.next_serial += 1;
            let serial = issued.next_serial;
            issued.live.insert(serial);
            serial
        };
        PreviewUrl {
            serial,
            url: format!("preview://{serial}/{}", image.file_name()),
            registry: Arc::downgrade(&self.issued),
        }
    }

    /// Number of handles issued and not yet revoked.
    pub fn live_count(&self) -> usize {
        self.lock().live.len()
    }

    pub fn is_live(&self, preview: &PreviewUrl) -> bool {
        self.lock().live.contains(&preview.serial)
    }

    fn lock(&self) -> MutexGuard<'_, Issued> {
        self.issued.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A revocable, locally resolvable reference to a selected image.
///
/// Not `Clone`: each handle is released exactly once, on drop.
#[derive(Debug)]
pub struct PreviewUrl {
    serial: u64,
    url: String,
    registry: Weak<Mutex<Issued>>,
}

impl PreviewUrl {
    pub fn as_str(&self) -> &str {
        &self.url
    }
}

impl PartialEq for PreviewUrl {
    fn eq(&self, other: &Self) -> bool {
        self.serial == other.serial && self.url == other.url
    }
}

impl Eq for PreviewUrl {}

impl fmt::Display for PreviewUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

impl Drop for PreviewUrl {
    fn drop(&mut self) {
        if let Some(issued) = self.registry.upgrade() {
            let mut issued = issued.lock().unwrap_or_else(PoisonError::into_inner);
            issued.live.remove(&self.serial);
        }
    }
}

// ---------------------------------------------------------------------------
// 3. Manager
// ---------------------------------------------------------------------------

/// Ordered list of selected images plus a parallel list of previews.
#[derive(Debug, Default)]
pub struct ImagePreviewManager {
    registry: PreviewRegistry,
    images: Vec<ImageFile>,
    previews: Vec<PreviewUrl>,
}

impl ImagePreviewManager {
    pub fn new(registry: PreviewRegistry) -> Self {
        Self {
            registry,
            images: Vec::new(),
            previews: Vec::new(),
        }
    }

    /// Append `new_files` to the selection and regenerate every preview.
    ///
    /// An empty selection is a no-op. Duplicates are kept. Returns the number
    /// of files added.
    pub fn select_images(&mut self, new_files: impl IntoIterator<Item = ImageFile>) -> usize {
        let before = self.images.len();
        self.images.extend(new_files);
        let added = self.images.len() - before;
        if added > 0 {
            self.regenerate();
        }
        added
    }

    /// Read each path that points at a regular file and select it.
    ///
    /// Paths that are not files are skipped; a file that exists but cannot be
    /// read is an error and nothing is selected.
    pub fn select_image_paths<P: AsRef<Path>>(&mut self, paths: &[P]) -> Result<usize, FormError> {
        let files = paths
            .iter()
            .map(AsRef::as_ref)
            .filter(|p| p.is_file())
            .map(ImageFile::open)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.select_images(files))
    }

    /// Remove the image at `index` and regenerate every preview.
    ///
    /// An out-of-range index leaves both lists untouched.
    pub fn remove_image(&mut self, index: usize) -> Result<ImageFile, FormError> {
        if index >= self.images.len() {
            return Err(FormError::ImageIndexOutOfRange {
                index,
                len: self.images.len(),
            });
        }
        let removed = self.images.remove(index);
        self.regenerate();
        Ok(removed)
    }

    pub fn images(&self) -> &[ImageFile] {
        &self.images
    }

    pub fn previews(&self) -> &[PreviewUrl] {
        &self.previews
    }

    pub fn registry(&self) -> &PreviewRegistry {
        &self.registry
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    // Whole-list replace; the previous handles are dropped (revoked) here.
    fn regenerate(&mut self) {
        let fresh: Vec<PreviewUrl> = self
            .images
            .iter()
            .map(|image| self.registry.create(image))
            .collect();
        self.previews = fresh;
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn file(name: &str) -> ImageFile {
        ImageFile::from_bytes(name, name.as_bytes().to_vec())
    }

    #[test]
    fn content_type_guessed_from_extension() {
        assert_eq!(file("a.JPG").content_type(), "image/jpeg");
        assert_eq!(file("b.png").content_type(), "image/png");
        assert_eq!(file("c").content_type(), "application/octet-stream");
    }

    #[test]
    fn empty_selection_is_noop() {
        let mut manager = ImagePreviewManager::default();
        manager.select_images([file("a.jpg")]);
        let before = manager.previews()[0].to_string();

        assert_eq!(manager.select_images(Vec::new()), 0);
        assert_eq!(manager.previews()[0].to_string(), before, "no regeneration");
    }

    #[test]
    fn select_appends_and_regenerates_all_previews() {
        let registry = PreviewRegistry::new();
        let mut manager = ImagePreviewManager::new(registry.clone());

        manager.select_images([file("a.jpg")]);
        let url_a = manager.previews()[0].to_string();

        manager.select_images([file("b.jpg")]);
        assert_eq!(manager.images(), &[file("a.jpg"), file("b.jpg")]);
        assert_eq!(manager.previews().len(), 2);
        assert_ne!(manager.previews()[0].to_string(), url_a, "urlA regenerated");
        assert!(manager.previews()[0].as_str().ends_with("/a.jpg"));
        assert!(manager.previews()[1].as_str().ends_with("/b.jpg"));
        assert_eq!(registry.live_count(), 2, "superseded previews revoked");
    }

    #[test]
    fn duplicates_are_kept() {
        let mut manager = ImagePreviewManager::default();
        manager.select_images([file("a.jpg"), file("a.jpg")]);
        assert_eq!(manager.len(), 2);
        assert_ne!(manager.previews()[0], manager.previews()[1]);
    }

    #[test]
    fn remove_out_of_range_leaves_lists_untouched() {
        let mut manager = ImagePreviewManager::default();
        manager.select_images([file("a.jpg")]);
        let url = manager.previews()[0].to_string();

        let err = manager.remove_image(1).unwrap_err();
        assert!(matches!(
            err,
            FormError::ImageIndexOutOfRange { index: 1, len: 1 }
        ));
        assert_eq!(manager.images(), &[file("a.jpg")]);
        assert_eq!(manager.previews()[0].to_string(), url);
    }

    #[test]
    fn dropping_manager_revokes_everything() {
        let registry = PreviewRegistry::new();
        {
            let mut manager = ImagePreviewManager::new(registry.clone());
            manager.select_images([file("a.jpg"), file("b.jpg"), file("c.jpg")]);
            manager.remove_image(1).expect("remove");
            assert_eq!(registry.live_count(), 2);
        }
        assert_eq!(registry.live_count(), 0);
    }

    #[test]
    fn preview_outliving_registry_drops_cleanly() {
        let registry = PreviewRegistry::new();
        let preview = registry.create(&file("a.jpg"));
        assert!(registry.is_live(&preview));
        drop(registry);
        drop(preview);
    }

    #[test]
    fn select_paths_skips_non_files() {
        let dir = TempDir::new().expect("tempdir");
        let photo = dir.path().join("photo.png");
        std::fs::write(&photo, b"\x89PNG").expect("write");

        let mut manager = ImagePreviewManager::default();
        let added = manager
            .select_image_paths(&[dir.path().to_path_buf(), photo, dir.path().join("missing.jpg")])
            .expect("select");

        assert_eq!(added, 1);
        assert_eq!(manager.images()[0].file_name(), "photo.png");
        assert_eq!(manager.images()[0].bytes(), b"\x89PNG");
    }

    #[test]
    fn open_rejects_directory() {
        let dir = TempDir::new().expect("tempdir");
        let err = ImageFile::open(dir.path()).unwrap_err();
        assert!(matches!(err, FormError::NotAFile { .. }));
    }
}
