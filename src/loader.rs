//! File and reader entry points.
//!
//! Reads complete fully before parsing begins; there is no streaming
//! tokenization, and the async variants only make the read non-blocking.
//!
//! A path passed to a multi-file API may carry a trailing `?` marking it
//! optional: a missing optional file is skipped silently, a missing
//! required file aborts the whole batch.

use std::io::BufRead;
use std::path::{Path, PathBuf};

use crate::doc::EnvDoc;
use crate::{Error, parse_str};

/// Read and parse a single dotenv file.
///
/// # Errors
///
/// Returns [`Error::FileNotFound`] when the path does not exist,
/// [`Error::Lex`] on invalid syntax.
pub fn parse_file(path: impl AsRef<Path>) -> Result<EnvDoc, Error> {
    let text = read_file(path.as_ref())?;
    parse_str(&text)
}

/// Parse several dotenv files and merge them in order, later files'
/// variables overriding earlier ones.
///
/// # Errors
///
/// A missing required file or a parse error in any file aborts the
/// batch; no partial merge is returned.
pub fn parse_files<I, P>(paths: I) -> Result<EnvDoc, Error>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut merged = EnvDoc::new();
    for path in paths {
        let (path, optional) = split_optional(path.as_ref());
        match read_file(&path) {
            Ok(text) => merged.merge(&parse_str(&text)?),
            Err(Error::FileNotFound(_)) if optional => {}
            Err(err) => return Err(err),
        }
    }
    Ok(merged)
}

/// Parse dotenv text from a buffered reader.
///
/// The reader is drained to a UTF-8 string before parsing.
pub fn parse_reader<R: BufRead>(mut reader: R) -> Result<EnvDoc, Error> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse_str(&text)
}

/// Parse and merge several readers in order, later readers' variables
/// overriding earlier ones.
pub fn parse_readers<I, R>(readers: I) -> Result<EnvDoc, Error>
where
    I: IntoIterator<Item = R>,
    R: BufRead,
{
    let mut merged = EnvDoc::new();
    for reader in readers {
        merged.merge(&parse_reader(reader)?);
    }
    Ok(merged)
}

/// Async twin of [`parse_file`]; only the read awaits.
#[cfg(feature = "tokio")]
pub async fn parse_file_async(path: impl AsRef<Path>) -> Result<EnvDoc, Error> {
    let text = read_file_async(path.as_ref()).await?;
    parse_str(&text)
}

/// Async twin of [`parse_files`], same optional-path and override
/// semantics.
#[cfg(feature = "tokio")]
pub async fn parse_files_async<I, P>(paths: I) -> Result<EnvDoc, Error>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut merged = EnvDoc::new();
    for path in paths {
        let (path, optional) = split_optional(path.as_ref());
        match read_file_async(&path).await {
            Ok(text) => merged.merge(&parse_str(&text)?),
            Err(Error::FileNotFound(_)) if optional => {}
            Err(err) => return Err(err),
        }
    }
    Ok(merged)
}

/// Async twin of [`parse_reader`].
#[cfg(feature = "tokio")]
pub async fn parse_reader_async<R>(mut reader: R) -> Result<EnvDoc, Error>
where
    R: tokio::io::AsyncRead + Unpin,
{
    use tokio::io::AsyncReadExt as _;

    let mut text = String::new();
    reader.read_to_string(&mut text).await?;
    parse_str(&text)
}

/// Split the trailing `?` optional marker off a path.
fn split_optional(path: &Path) -> (PathBuf, bool) {
    let text = path.to_string_lossy();
    text.strip_suffix('?').map_or_else(
        || (path.to_path_buf(), false),
        |stripped| (PathBuf::from(stripped), true),
    )
}

fn read_file(path: &Path) -> Result<String, Error> {
    std::fs::read_to_string(path).map_err(|err| not_found_or_io(err, path))
}

#[cfg(feature = "tokio")]
async fn read_file_async(path: &Path) -> Result<String, Error> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|err| not_found_or_io(err, path))
}

fn not_found_or_io(err: std::io::Error, path: &Path) -> Error {
    if err.kind() == std::io::ErrorKind::NotFound {
        Error::FileNotFound(path.to_path_buf())
    } else {
        Error::Io(err)
    }
}
