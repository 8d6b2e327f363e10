use actix_web::HttpResponse;
use serde::Serialize;

use crate::error::Res;

/// JSON success responses for route handlers.
pub struct Success;

impl Success {
    pub fn ok<T: Serialize>(body: T) -> Res<HttpResponse> {
        Ok(HttpResponse::Ok().json(body))
    }

    pub fn created<T: Serialize>(body: T) -> Res<HttpResponse> {
        Ok(HttpResponse::Created().json(body))
    }
}
