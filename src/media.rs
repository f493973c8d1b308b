//! Media storage and avatar normalization.
//!
//! Records only store paths relative to the media root. This module owns
//! everything that touches the files behind those paths:
//! - Writing uploads under their folder without clobbering existing files
//! - Shrinking avatars so neither side exceeds `AVATAR_MAX_DIMENSION`

use std::fs::File;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use image::{GenericImageView, ImageFormat};
use image::codecs::jpeg::JpegEncoder;
use rand::Rng;
use rand::distr::Alphanumeric;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::error::AppError;
use crate::models::chat::CHAT_IMAGE_DIR;
use crate::models::profile::{AVATAR_UPLOAD_DIR, DEFAULT_AVATAR};

/// Largest width or height a stored avatar may have, in pixels.
pub const AVATAR_MAX_DIMENSION: u32 = 300;

/// Quality used when a resized avatar is re-encoded as JPEG.
pub const AVATAR_JPEG_QUALITY: u8 = 95;

/// Stored paths live in VARCHAR(100) columns.
const MAX_STORED_PATH_LEN: usize = 100;

const NAME_SUFFIX_LEN: usize = 7;

/// Longest extension kept on an upload, dot included. Longer ones are dropped.
const MAX_EXTENSION_LEN: usize = 10;

/// Create the upload folders under `root` if they are missing.
///
/// # Returns
///
/// Whether the default avatar exists under `root`. Profiles that never
/// uploaded an avatar point at it, so saving them fails until it is placed.
pub async fn ensure_layout(root: &Path) -> Result<bool, AppError> {
    for dir in [AVATAR_UPLOAD_DIR, CHAT_IMAGE_DIR] {
        fs::create_dir_all(root.join(dir)).await?;
    }

    let default_avatar = root.join(DEFAULT_AVATAR);
    let present = fs::try_exists(&default_avatar).await?;
    if !present {
        tracing::warn!(
            path = %default_avatar.display(),
            "Default avatar is missing; saving profiles without an upload will fail"
        );
    }
    Ok(present)
}

/// Store an uploaded file under `root/folder/`.
///
/// The client-supplied name is reduced to a safe base name. If a file with
/// that name already exists a random suffix is appended to the stem, so an
/// existing upload is never overwritten.
///
/// # Returns
///
/// The path relative to `root`, e.g. `profile_pics/avatar_x7Kq2Lm.png`,
/// which is what gets stored on the record.
pub async fn store_upload(
    root: &Path,
    folder: &str,
    file_name: &str,
    bytes: &[u8],
) -> Result<String, AppError> {
    fs::create_dir_all(root.join(folder)).await?;

    let (stem, mut extension) = split_name(&sanitize_file_name(file_name));
    if extension.len() > MAX_EXTENSION_LEN {
        extension.clear();
    }
    let budget = MAX_STORED_PATH_LEN
        .saturating_sub(folder.len() + 1 + extension.len() + NAME_SUFFIX_LEN + 1);
    let stem: String = stem.chars().take(budget.max(1)).collect();

    let mut candidate = format!("{stem}{extension}");
    loop {
        let relative = format!("{folder}/{candidate}");
        match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(root.join(&relative))
            .await
        {
            Ok(mut file) => {
                file.write_all(bytes).await?;
                file.flush().await?;
                tracing::info!(path = %relative, size = bytes.len(), "Stored upload");
                return Ok(relative);
            }
            Err(err) if err.kind() == ErrorKind::AlreadyExists => {
                candidate = format!("{stem}_{}{extension}", random_suffix());
            }
            Err(err) => return Err(err.into()),
        }
    }
}

/// Remove an upload whose record could not be written.
///
/// Failures are logged rather than returned; the caller is already
/// reporting the original error.
pub async fn discard_upload(root: &Path, relative: &str) {
    if let Err(err) = fs::remove_file(resolve(root, relative)).await {
        tracing::warn!(path = %relative, "Could not remove orphaned upload: {}", err);
    } else {
        tracing::debug!(path = %relative, "Removed orphaned upload");
    }
}

/// Shrink the image at `path` to fit within the avatar bounds.
///
/// Images whose width and height are both within `AVATAR_MAX_DIMENSION` are
/// left untouched. Larger images are scaled down preserving aspect ratio and
/// written back over the original file, in the same format. JPEGs are
/// re-encoded at `AVATAR_JPEG_QUALITY`.
///
/// # Returns
///
/// `true` if the file was rewritten.
///
/// # Errors
///
/// - `Io`: the file cannot be opened or written
/// - `Image`: the file is not a decodable image, or its format cannot be written
pub fn normalize_avatar(path: &Path) -> Result<bool, AppError> {
    let reader = image::ImageReader::open(path)?.with_guessed_format()?;
    let format = reader.format();
    let img = reader.decode()?;

    let (width, height) = img.dimensions();
    if width <= AVATAR_MAX_DIMENSION && height <= AVATAR_MAX_DIMENSION {
        tracing::debug!(path = %path.display(), width, height, "Avatar within bounds");
        return Ok(false);
    }

    let thumbnail = img.thumbnail(AVATAR_MAX_DIMENSION, AVATAR_MAX_DIMENSION);

    match format {
        Some(ImageFormat::Jpeg) | None => {
            let mut writer = BufWriter::new(File::create(path)?);
            let encoder = JpegEncoder::new_with_quality(&mut writer, AVATAR_JPEG_QUALITY);
            // JPEG has no alpha channel
            image::DynamicImage::ImageRgb8(thumbnail.to_rgb8()).write_with_encoder(encoder)?;
            writer.flush()?;
        }
        Some(format) => thumbnail.save_with_format(path, format)?,
    }

    let (new_width, new_height) = thumbnail.dimensions();
    tracing::info!(
        path = %path.display(),
        width,
        height,
        new_width,
        new_height,
        "Resized avatar"
    );
    Ok(true)
}

/// Path of a stored media file on disk.
pub fn resolve(root: &Path, relative: &str) -> PathBuf {
    root.join(relative)
}

fn sanitize_file_name(file_name: &str) -> String {
    let base = Path::new(file_name)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned.to_string()
    }
}

/// Splits "photo.jpg" into ("photo", ".jpg").
fn split_name(name: &str) -> (String, String) {
    match name.rfind('.') {
        Some(idx) if idx > 0 => (name[..idx].to_string(), name[idx..].to_ascii_lowercase()),
        _ => (name.to_string(), String::new()),
    }
}

fn random_suffix() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(NAME_SUFFIX_LEN)
        .map(char::from)
        .collect()
}
