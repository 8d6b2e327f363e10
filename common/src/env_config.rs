use std::{env, sync::Arc};

use entitlements::DEFAULT_NEAR_LIMIT_THRESHOLD;

#[derive(Clone, Debug)]
/// Configuration struct for the server.
///
/// Holds database connection details, token validation settings,
/// server host and port, worker count, CORS and logging preferences,
/// and the near-limit threshold used for upgrade prompts.
pub struct Config {
    // development or production
    pub environment: String,
    /// The URL of the database to connect to.
    pub database_url: String,
    /// Settings for validating access tokens issued by the auth provider.
    pub jwt_config: JwtConfig,
    /// The hostname or IP address the server will bind to.
    pub server_host: String,
    /// The port number the server will listen on.
    pub server_port: u16,
    /// The number of worker threads to spawn for handling requests.
    pub num_workers: usize,
    /// The allowed origin for CORS (Cross-Origin Resource Sharing).
    pub cors_allowed_origin: String,
    /// A boolean indicating whether console logging is enabled.
    pub console_logging_enabled: bool,
    /// Usage percentage at which a limit counts as nearly reached.
    pub near_limit_threshold: u32,
}

#[derive(Clone, Debug)]
/// Configuration for validating JSON Web Tokens.
///
/// Tokens are issued by the hosted auth provider and signed with a shared
/// HS256 secret.
pub struct JwtConfig {
    /// The secret key used to verify JWTs.
    pub secret: String,
    /// Expected `aud` claim, if the provider sets one.
    pub audience: Option<String>,
}

impl JwtConfig {
    /// Reads the JWT configuration from environment variables:
    /// - `JWT_SECRET`: Required.
    /// - `JWT_AUDIENCE`: Optional. Audience is not checked when unset.
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        JwtConfig {
            secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            audience: env::var("JWT_AUDIENCE").ok().filter(|aud| !aud.is_empty()),
        }
    }
}

impl Config {
    /// Creates a new `Config` instance from environment variables.
    ///
    /// # Environment Variables
    ///
    /// Required:
    /// - `ENVIRONMENT`: development or production
    /// - `DATABASE_URL`: Connection string for the database
    /// - `JWT_SECRET`: Secret key for JWT verification (via `JwtConfig::from_env()`)
    ///
    /// Optional (with defaults):
    /// - `IP`: Server host (default: "127.0.0.1")
    /// - `PORT`: Server port (default: 8080)
    /// - `WORKERS`: Number of worker threads (default: 4)
    /// - `CORS_ALLOWED_ORIGIN`: Allowed CORS origin (default: "http://localhost:3000")
    /// - `ENABLE_CONSOLE_LOGGING`: Whether to enable console logging (default: true)
    /// - `NEAR_LIMIT_THRESHOLD_PERCENT`: Near-limit threshold, 1 to 100 (default: 80)
    ///
    /// # Panics
    ///
    /// Panics if required variables are missing or the threshold is out of range.
    pub fn from_env() -> Arc<Self> {
        dotenvy::dotenv().ok();

        let near_limit_threshold = match env::var("NEAR_LIMIT_THRESHOLD_PERCENT") {
            Ok(raw) => parse_threshold(&raw).unwrap_or_else(|e| panic!("{}", e)),
            Err(_) => DEFAULT_NEAR_LIMIT_THRESHOLD,
        };

        Arc::new(Config {
            environment: env::var("ENVIRONMENT").expect("ENVIRONMENT must be set"),
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            jwt_config: JwtConfig::from_env(),
            server_host: env::var("IP").unwrap_or_else(|_| "127.0.0.1".to_string()),
            server_port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            num_workers: env::var("WORKERS")
                .unwrap_or_else(|_| "4".to_string())
                .parse()
                .unwrap_or(4),
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            console_logging_enabled: env::var("ENABLE_CONSOLE_LOGGING")
                .unwrap_or_else(|_| "true".to_string())
                .to_lowercase()
                == "true",
            near_limit_threshold,
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Parses a near-limit threshold percentage.
pub fn parse_threshold(raw: &str) -> Result<u32, String> {
    let value: u32 = raw.trim().parse().map_err(|e| {
        format!(
            "NEAR_LIMIT_THRESHOLD_PERCENT must be a whole number, got '{}': {}",
            raw, e
        )
    })?;

    if !(1..=100).contains(&value) {
        return Err(format!(
            "NEAR_LIMIT_THRESHOLD_PERCENT must be between 1 and 100, got {}",
            value
        ));
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_accepts_percentages() {
        assert_eq!(parse_threshold("80"), Ok(80));
        assert_eq!(parse_threshold(" 100 "), Ok(100));
        assert_eq!(parse_threshold("1"), Ok(1));
    }

    #[test]
    fn threshold_rejects_out_of_range_and_garbage() {
        assert!(parse_threshold("0").is_err());
        assert!(parse_threshold("101").is_err());
        assert!(parse_threshold("-5").is_err());
        assert!(parse_threshold("eighty").is_err());
    }
}
