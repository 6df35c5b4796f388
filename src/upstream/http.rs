//! Response status handling shared by all upstreams

use reqwest::{Response, StatusCode};
use tracing::warn;

use crate::version::error::UpstreamError;

/// Maps unsuccessful responses to [`UpstreamError`]s
pub(super) fn check_status(response: Response, project: &str) -> Result<Response, UpstreamError> {
    let status = response.status();

    if status == StatusCode::NOT_FOUND {
        return Err(UpstreamError::NotFound(project.to_string()));
    }

    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());
        return Err(UpstreamError::RateLimited {
            retry_after_secs: retry_after,
        });
    }

    if !status.is_success() {
        warn!("Upstream returned status {}: {}", status, response.url());
        return Err(UpstreamError::UnsuccessfulRequest {
            status: status.as_u16(),
        });
    }

    Ok(response)
}

/// Reads a JSON body, reporting decoding failures as invalid responses
pub(super) async fn json<T: serde::de::DeserializeOwned>(
    response: Response,
) -> Result<T, UpstreamError> {
    response.json().await.map_err(|e| {
        warn!("Failed to parse upstream response: {}", e);
        UpstreamError::InvalidResponse(e.to_string())
    })
}
