use std::fs;
use std::path::Path;

use crate::schedule::ScheduleError;

/// synchronous GET of a source schedule page.
pub fn fetch_html(url: &str) -> Result<String, ScheduleError> {
    let response = reqwest::blocking::get(url)
        .map_err(|e| ScheduleError::FetchError(format!("GET {url}: {e}")))?
        .error_for_status()
        .map_err(|e| ScheduleError::FetchError(format!("GET {url}: {e}")))?;
    response
        .text()
        .map_err(|e| ScheduleError::FetchError(format!("reading body of {url}: {e}")))
}

/// returns the page body, preferring a local cache file when it exists.
/// a fresh fetch is written back to the cache path so re-runs against
/// the same source stay offline.
pub fn load_or_fetch(url: &str, cache: Option<&Path>) -> Result<String, ScheduleError> {
    if let Some(path) = cache {
        if path.exists() {
            log::info!("reading cached source document: {}", path.display());
            return fs::read_to_string(path).map_err(|e| {
                ScheduleError::FetchError(format!("reading cache '{}': {e}", path.display()))
            });
        }
    }
    let html = fetch_html(url)?;
    if let Some(path) = cache {
        fs::write(path, &html).map_err(|e| {
            ScheduleError::FetchError(format!("writing cache '{}': {e}", path.display()))
        })?;
    }
    Ok(html)
}
