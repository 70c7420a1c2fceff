//! Staged image storage
//!
//! Staged images live under `<work_dir>/uploads/images` with uuid
//! filenames, deduplicated by content hash via a `by_hash/` symlink tree.
//! Staging is the atomic first step of the submission workflow: once a
//! file is on disk and has a URL, later analysis failures cannot lose it.

use crate::utils::AppError;
use image::DynamicImage;
use sha2::{Digest, Sha256};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::fs;
use uuid::Uuid;

/// JPEG quality for staged design photos (keeps detail the analysis needs
/// while controlling file size)
const JPEG_QUALITY: u8 = 85;

/// A successfully staged image
#[derive(Debug, Clone)]
pub struct StagedImage {
    pub file_id: String,
    pub filename: String,
    pub url: String,
    pub size: usize,
}

/// On-disk image store rooted at the server work dir
#[derive(Debug, Clone)]
pub struct ImageStore {
    images_dir: PathBuf,
}

impl ImageStore {
    pub fn new(work_dir: &Path) -> Self {
        Self {
            images_dir: work_dir.join("uploads/images"),
        }
    }

    /// Decode and re-encode as JPEG.
    ///
    /// Every staged image goes through this: it validates the payload is a
    /// real image and normalizes the stored encoding.
    pub fn reencode_jpeg(data: &[u8]) -> Result<(DynamicImage, Vec<u8>), AppError> {
        let img = image::load_from_memory(data)
            .map_err(|e| AppError::validation(format!("Invalid image: {}", e)))?;

        let mut buffer = Vec::new();
        {
            let mut cursor = Cursor::new(&mut buffer);
            let rgb_img = img.to_rgb8();
            let encoder =
                image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, JPEG_QUALITY);
            rgb_img
                .write_with_encoder(encoder)
                .map_err(|e| AppError::internal(format!("Failed to compress image: {}", e)))?;
        }

        Ok((img, buffer))
    }

    /// Stage JPEG bytes, returning the stable URL.
    ///
    /// Content-identical uploads resolve to the existing file.
    pub fn stage(&self, jpeg_data: &[u8]) -> Result<StagedImage, AppError> {
        fs::create_dir_all(&self.images_dir)
            .map_err(|e| AppError::internal(format!("Failed to create images directory: {}", e)))?;

        let file_hash = calculate_hash(jpeg_data);

        if let Some(existing) = self.find_by_hash(&file_hash) {
            tracing::info!(
                existing_file = %existing,
                "Duplicate image detected, returning existing file"
            );
            let file_id = existing
                .strip_suffix(".jpg")
                .map(|s| s.to_string())
                .unwrap_or_else(|| Uuid::new_v4().to_string());
            return Ok(StagedImage {
                file_id,
                url: format!("/api/image/{}", existing),
                filename: existing,
                size: jpeg_data.len(),
            });
        }

        let file_id = Uuid::new_v4().to_string();
        let filename = format!("{}.jpg", file_id);
        let file_path = self.images_dir.join(&filename);

        fs::write(&file_path, jpeg_data)
            .map_err(|e| AppError::internal(format!("Failed to save file: {}", e)))?;

        self.create_hash_symlink(&file_hash, &filename)?;

        tracing::info!(
            size = jpeg_data.len(),
            hash = %file_hash,
            "Image staged"
        );

        Ok(StagedImage {
            file_id,
            url: format!("/api/image/{}", filename),
            filename,
            size: jpeg_data.len(),
        })
    }

    /// Resolve a staged filename to its on-disk path.
    ///
    /// Rejects anything that is not a bare filename (no traversal).
    pub fn path_for(&self, filename: &str) -> Option<PathBuf> {
        if filename.contains('/') || filename.contains("..") || filename.contains('\\') {
            return None;
        }
        let path = self.images_dir.join(filename);
        path.is_file().then_some(path)
    }

    /// Find existing file by content hash
    fn find_by_hash(&self, hash: &str) -> Option<String> {
        let hash_dir = self.images_dir.join("by_hash");
        if !hash_dir.exists() {
            return None;
        }

        // Hash directory uses first 2 chars as subdir (e.g., "ab/abc123...")
        let prefix = &hash[..2];
        let hash_path = hash_dir.join(format!("{}/{}", prefix, hash));

        if hash_path.exists()
            && let Ok(target) = fs::read_link(&hash_path)
        {
            return target.file_name().map(|s| s.to_string_lossy().to_string());
        }
        None
    }

    /// Create hash-based symlink for deduplication
    fn create_hash_symlink(&self, hash: &str, filename: &str) -> Result<(), AppError> {
        let hash_dir = self.images_dir.join("by_hash");
        let prefix = &hash[..2];
        let hash_subdir = hash_dir.join(prefix);
        fs::create_dir_all(&hash_subdir)
            .map_err(|e| AppError::internal(format!("Failed to create hash subdir: {}", e)))?;

        let hash_path = hash_subdir.join(hash);
        let target_path = PathBuf::from("../../").join(filename);

        symlink::symlink_auto(&target_path, &hash_path)
            .map_err(|e| AppError::internal(format!("Failed to create symlink: {}", e)))?;

        Ok(())
    }
}

/// SHA256 of the staged content
fn calculate_hash(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}
