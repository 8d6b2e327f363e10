use common::env_config::JwtConfig;
use middleware::auth::AuthMiddleware;

pub mod middleware {
    pub mod auth;
}

/// Bearer-token middleware for routes that need an authenticated user.
pub fn auth_middleware(jwt_config: JwtConfig) -> AuthMiddleware {
    AuthMiddleware::new(jwt_config)
}
