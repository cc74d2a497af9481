use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response}
};
use yt_dlp::FailureKind;

#[derive(Debug)]
pub struct ApiError {
    pub message: String,
    pub status: StatusCode
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: StatusCode::BAD_REQUEST
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: StatusCode::FORBIDDEN
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: StatusCode::NOT_FOUND
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: StatusCode::SERVICE_UNAVAILABLE
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(status = %self.status, "handler error: {}", self.message);
        let body = Json(serde_json::json!({
            "error": self.message,
            "status_code": self.status.as_u16()
        }));
        (self.status, body).into_response()
    }
}

impl From<yt_dlp::Error> for ApiError {
    fn from(err: yt_dlp::Error) -> Self {
        match err.failure_kind() {
            FailureKind::SignInRequired => ApiError::forbidden(
                "This video requires sign-in verification. Please try a different video."
            ),
            FailureKind::PrivateVideo => {
                ApiError::forbidden("This video is private and cannot be accessed.")
            }
            FailureKind::VideoUnavailable => {
                ApiError::not_found("This video is unavailable or has been deleted.")
            }
            FailureKind::Other => match err {
                yt_dlp::Error::CommandFailed { ref stderr, .. } => {
                    ApiError::bad_request(format!("Error extracting video info: {}", stderr.trim()))
                }
                yt_dlp::Error::EmptyPlaylist => {
                    ApiError::not_found("Playlist is empty or unavailable.")
                }
                _ => ApiError::internal("Internal server error while processing video.")
            }
        }
    }
}
