use actix_web::HttpResponse;
use entitlements::PlanError;
use thiserror::Error;

pub type Res<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    // === CONVERSION ERRORS ===
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("JWT error: {0}")]
    JWT(#[from] jsonwebtoken::errors::Error),

    // === APPLICATION ERRORS ===
    #[error("Authorization error: {0}")]
    Unauthorized(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("{0}")]
    Internal(String),
}

impl From<PlanError> for AppError {
    fn from(error: PlanError) -> Self {
        if error.is_configuration() {
            AppError::Configuration(error.to_string())
        } else {
            AppError::BadRequest(error.to_string())
        }
    }
}

impl AppError {
    pub fn to_http_response(&self) -> HttpResponse {
        let is_dev = cfg!(debug_assertions);

        let to_internal_json = |err_msg: &str| {
            if is_dev {
                serde_json::json!({ "error": err_msg })
            } else {
                serde_json::json!({ "error": "Internal server error" })
            }
        };

        match self {
            // === CONVERSION ERRORS ===
            AppError::Database(error) => {
                log::error!("Database error: {}", error);
                HttpResponse::InternalServerError().json(to_internal_json(&error.to_string()))
            }
            AppError::JWT(error) => {
                log::warn!("JWT error: {}", error);
                HttpResponse::Unauthorized().json(serde_json::json!({ "error": "Invalid token" }))
            }

            // === APPLICATION ERRORS ===
            AppError::Unauthorized(_) => {
                HttpResponse::Unauthorized().json(serde_json::json!({ "error": self.to_string() }))
            }
            AppError::NotFound(_) => {
                HttpResponse::NotFound().json(serde_json::json!({ "error": self.to_string() }))
            }
            AppError::BadRequest(_) => {
                HttpResponse::BadRequest().json(serde_json::json!({ "error": self.to_string() }))
            }
            AppError::Configuration(error) => {
                log::error!("CONFIGURATION ERROR, refusing to guess a plan: {}", error);
                HttpResponse::InternalServerError().json(to_internal_json(&self.to_string()))
            }
            AppError::Internal(error) => {
                log::error!("Internal error: {}", error);
                HttpResponse::InternalServerError().json(to_internal_json(error))
            }
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        self.to_http_response()
    }
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;

    use super::*;

    #[test]
    fn unknown_plan_maps_to_configuration_error() {
        let err = AppError::from(PlanError::UnknownPlan("gold".to_string()));
        assert!(matches!(err, AppError::Configuration(_)));
        assert_eq!(
            err.to_http_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn unknown_resource_maps_to_bad_request() {
        let err = AppError::from(PlanError::UnknownResource("notes".to_string()));
        assert!(matches!(err, AppError::BadRequest(_)));
        assert_eq!(err.to_http_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn application_errors_keep_their_status() {
        let cases = [
            (AppError::Unauthorized("no token".to_string()), StatusCode::UNAUTHORIZED),
            (AppError::BadRequest("bad".to_string()), StatusCode::BAD_REQUEST),
            (
                AppError::Internal("boom".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(err.to_http_response().status(), status, "{}", err);
        }
    }

    #[test]
    fn not_found_keeps_its_status() {
        let err = AppError::NotFound("No subscription".to_string());
        assert_eq!(err.to_http_response().status(), StatusCode::NOT_FOUND);
    }
}
