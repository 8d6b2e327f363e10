mod cors;

use std::sync::Arc;

use actix_web::{
    App, HttpServer,
    web::{self},
};
use common::env_config::Config;
use entitlements::{EntitlementEvaluator, PlanCatalog};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // get env vars
    let config = Config::from_env();
    let config_data = config.clone();

    // get info
    let origin = config.cors_allowed_origin.clone();
    let logger_enabled = config.console_logging_enabled;

    // init logger
    logger::setup(logger_enabled).expect("Failed to set up logger");

    // init db connection
    let pool = db::setup(&config.database_url, config.is_production())
        .await
        .expect("Failed to set up database");

    // plan table is built once and only ever read
    let catalog = Arc::new(PlanCatalog::standard());
    let evaluator = Arc::new(EntitlementEvaluator::new(
        catalog,
        config.near_limit_threshold,
    ));
    log::info!(
        "Serving {} plans, near-limit threshold {}%",
        evaluator.catalog().plans().count(),
        evaluator.near_limit_threshold()
    );

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(evaluator.clone()))
            .wrap(logger::middleware(logger_enabled)) // 2nd
            .wrap(cors::middleware(&origin)) // 1st
            .service(
                web::scope("/api")
                    .service(api_subs::mount_plans())
                    .service(
                        web::scope("/dashboard")
                            .wrap(api_auth::auth_middleware(config_data.jwt_config.clone()))
                            .service(api_subs::mount_subs()),
                    ),
            )
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .workers(config.num_workers)
    .run()
    .await
}
