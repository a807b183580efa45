//! Blocking HTTP GET over libcurl.
//!
//! One `Easy` handle per request; the body is handed to a caller sink chunk by
//! chunk as it arrives.

use crate::config::RequestOptions;
use crate::error::FetchError;
use std::time::Duration;

/// Performs a single GET of `url` and feeds the body to `sink`.
///
/// Follows redirects. Sends the configured `User-Agent`. Returns the number of
/// body bytes delivered. A non-2xx final status is `FetchError::Http`; a sink
/// error aborts the transfer and is returned as-is.
pub fn get<F>(url: &str, opts: &RequestOptions, mut sink: F) -> Result<u64, FetchError>
where
    F: FnMut(&[u8]) -> Result<(), FetchError>,
{
    let mut received = 0u64;
    let mut sink_error: Option<FetchError> = None;

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.get(true)?;
    easy.follow_location(true)?;
    easy.max_redirections(opts.max_redirections)?;
    easy.useragent(&opts.user_agent)?;
    easy.connect_timeout(Duration::from_secs(opts.connect_timeout_secs))?;
    easy.timeout(Duration::from_secs(opts.timeout_secs))?;
    // Error bodies (404 pages) must not reach the sink.
    easy.fail_on_error(true)?;

    let performed = {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| match sink(data) {
            Ok(()) => {
                received += data.len() as u64;
                Ok(data.len())
            }
            Err(e) => {
                tracing::warn!("sink rejected {} bytes: {}", data.len(), e);
                sink_error = Some(e);
                Ok(0) // abort transfer
            }
        })?;
        transfer.perform()
    };

    if let Some(e) = sink_error {
        return Err(e);
    }
    if let Err(e) = performed {
        if e.is_http_returned_error() {
            let status = easy.response_code()?;
            return Err(FetchError::Http { status });
        }
        return Err(FetchError::Transport(e));
    }

    let status = easy.response_code()?;
    if !(200..300).contains(&status) {
        return Err(FetchError::Http { status });
    }
    tracing::debug!(url, status, bytes = received, "GET complete");
    Ok(received)
}
