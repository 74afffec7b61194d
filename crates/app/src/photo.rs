//! Photo ingestion — turn an image file into an owned [`Photo`] payload.
//!
//! Files are streamed in fixed-size chunks. Nothing here touches the store.

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use olympics_domain::athlete::Photo;
use olympics_domain::error::{OlympicsError, ValidationError};

const CHUNK_SIZE: usize = 1024;

/// Read the whole file at `path` into a [`Photo`].
///
/// # Errors
///
/// Returns [`OlympicsError::Attachment`] if the file cannot be opened or read.
pub fn read_photo(path: impl AsRef<Path>) -> Result<Photo, OlympicsError> {
    let file = File::open(path)?;
    read_chunks(file, None)
}

/// Read the file at `path` into a [`Photo`], refusing anything larger than
/// `limit` bytes.
///
/// Reading stops as soon as the limit is exceeded, so an oversized file is
/// never fully loaded.
///
/// # Errors
///
/// Returns [`ValidationError::PhotoTooLarge`] when the file exceeds `limit`,
/// or [`OlympicsError::Attachment`] if it cannot be opened or read.
pub fn read_photo_within(path: impl AsRef<Path>, limit: usize) -> Result<Photo, OlympicsError> {
    let file = File::open(path)?;
    let declared = usize::try_from(file.metadata()?.len()).unwrap_or(usize::MAX);
    if declared > limit {
        return Err(ValidationError::PhotoTooLarge {
            size: declared,
            limit,
        }
        .into());
    }
    read_chunks(file, Some(limit))
}

fn read_chunks(mut reader: impl Read, limit: Option<usize>) -> Result<Photo, OlympicsError> {
    let mut bytes = Vec::new();
    let mut chunk = [0_u8; CHUNK_SIZE];
    loop {
        let read = match reader.read(&mut chunk) {
            Ok(0) => break,
            Ok(read) => read,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(err.into()),
        };
        bytes.extend_from_slice(&chunk[..read]);
        if let Some(limit) = limit
            && bytes.len() > limit
        {
            return Err(ValidationError::PhotoTooLarge {
                size: bytes.len(),
                limit,
            }
            .into());
        }
    }
    Ok(Photo::new(bytes))
}
