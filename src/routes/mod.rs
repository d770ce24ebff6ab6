pub mod admin;
pub mod auth;
pub mod cryptocurrencies;
pub mod docs;
pub mod etfs;
pub mod faqs;
pub mod health;
pub mod portfolios;
pub mod posts;
pub mod profiles;
pub mod stocks;
pub mod trades;
pub mod users;

use actix_web::web;

use crate::error::AppError;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // Corps JSON / query invalides -> 400, id non numérique -> 404
    let json_config = web::JsonConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into());
    let query_config = web::QueryConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into());
    let path_config = web::PathConfig::default()
        .error_handler(|_err, _req| AppError::NotFound("Not found.".to_string()).into());

    cfg.service(
        web::scope("/api")
            .app_data(json_config)
            .app_data(query_config)
            .app_data(path_config)
            .service(health::health_check)
            .service(docs::api_docs)
            .configure(auth::auth_routes)
            .configure(users::configure)
            .configure(profiles::configure)
            .configure(portfolios::configure)
            .configure(stocks::configure)
            .configure(etfs::configure)
            .configure(cryptocurrencies::configure)
            .configure(trades::configure)
            .configure(posts::configure)
            .configure(faqs::configure)
            .configure(admin::admin_routes)
    );
}
