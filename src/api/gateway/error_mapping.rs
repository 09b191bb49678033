//! Error mapping helpers for the HTTP gateway.

use http::StatusCode;

use crate::api::error::ApiError;

use super::http_utils::{extract_detail, truncate_for_message};

/// Maps a transport or decoding failure from `reqwest`.
pub(super) fn map_reqwest_error(operation: &str, error: &reqwest::Error) -> ApiError {
    if error.is_timeout() {
        return ApiError::Timeout {
            message: format!("{operation} exceeded the request timeout"),
        };
    }

    if error.is_decode() {
        return ApiError::Decode {
            message: format!("{operation} failed: {error}"),
        };
    }

    ApiError::Network {
        message: format!("{operation} failed: {error}"),
    }
}

/// Maps a non-success status and its body into an API error.
pub(super) fn map_http_error(operation: &str, status: StatusCode, body: &str) -> ApiError {
    let detail = extract_detail(body).unwrap_or_else(|| {
        if body.trim().is_empty() {
            status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_owned()
        } else {
            truncate_for_message(body, 160)
        }
    });

    ApiError::Status {
        status: status.as_u16(),
        message: format!("{operation} failed: {detail}"),
    }
}

#[cfg(test)]
mod tests {
    use http::StatusCode;

    use super::map_http_error;
    use crate::api::error::ApiError;

    #[test]
    fn http_error_prefers_backend_detail() {
        let error = map_http_error(
            "load feedback",
            StatusCode::NOT_FOUND,
            r#"{"detail": "Feedback tidak ditemukan"}"#,
        );

        assert_eq!(
            error,
            ApiError::Status {
                status: 404,
                message: "load feedback failed: Feedback tidak ditemukan".to_owned(),
            }
        );
    }

    #[test]
    fn http_error_without_body_uses_reason_phrase() {
        let error = map_http_error("fix sentiments", StatusCode::INTERNAL_SERVER_ERROR, "");

        assert_eq!(
            error,
            ApiError::Status {
                status: 500,
                message: "fix sentiments failed: Internal Server Error".to_owned(),
            }
        );
    }
}
