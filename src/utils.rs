use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::RgbaImage;
use sha2::{Digest, Sha256};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failures while writing icons to disk. Rendering itself cannot fail.
#[derive(Debug, Error)]
pub enum IconError {
    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Encodes an image as an RGBA PNG with the strongest lossless compression.
pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>, image::ImageError> {
    let mut bytes = Vec::new();
    let encoder = PngEncoder::new_with_quality(&mut bytes, CompressionType::Best, FilterType::Adaptive);
    img.write_with_encoder(encoder)?;
    Ok(bytes)
}

/// Calculates the SHA256 hash of a byte buffer.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Writes `img` to `path` as PNG, creating parent directories as needed and
/// overwriting any existing file. Returns the SHA256 of the written bytes.
pub fn save_png(img: &RgbaImage, path: &Path) -> Result<String, IconError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| IconError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let bytes = encode_png(img).map_err(|source| IconError::Encode {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, &bytes).map_err(|source| IconError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    let digest = sha256_hex(&bytes);
    log::info!("saved {} ({} bytes, sha256 {})", path.display(), bytes.len(), digest);
    Ok(digest)
}
