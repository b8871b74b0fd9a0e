//! One-time download of the base word list into the local cache.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug_span, info};

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("HTTP error: {0}")]
    Http(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The cache file already existed; nothing was downloaded.
    Cached,
    /// No URL configured.
    Disabled,
    Downloaded { bytes: usize },
}

/// Make sure `dest` holds the base word list, downloading from `url` if it
/// is absent. An existing cache is never refetched. `timeout` bounds the
/// whole request, connect through body.
pub fn ensure_base_corpus(
    dest: &Path,
    url: &str,
    timeout: Duration,
) -> Result<FetchOutcome, FetchError> {
    if dest.exists() {
        return Ok(FetchOutcome::Cached);
    }
    if url.is_empty() {
        return Ok(FetchOutcome::Disabled);
    }
    let _span = debug_span!("fetch_base_corpus", url).entered();

    let body = download(url, timeout)?;
    install(dest, &body)?;

    info!(bytes = body.len(), dest = %dest.display(), "base corpus downloaded");
    Ok(FetchOutcome::Downloaded { bytes: body.len() })
}

/// `<file>.tmp` next to `dest`.
fn staging_path(dest: &Path) -> PathBuf {
    let mut name = dest.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    dest.with_file_name(name)
}

/// Write `body` to the staging file and rename it over `dest`. The staging
/// file is removed if either step fails.
fn install(dest: &Path, body: &[u8]) -> io::Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = staging_path(dest);
    let staged = fs::write(&tmp, body).and_then(|()| fs::rename(&tmp, dest));
    if staged.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    staged
}

fn download(url: &str, timeout: Duration) -> Result<Vec<u8>, FetchError> {
    let config = ureq::Agent::config_builder()
        .timeout_global(Some(timeout))
        .build();
    let agent = ureq::Agent::new_with_config(config);
    agent
        .get(url)
        .call()
        .map_err(|e| FetchError::Http(format!("{url}: {e}")))?
        .into_body()
        .read_to_vec()
        .map_err(|e| FetchError::Http(format!("{url}: {e}")))
}
