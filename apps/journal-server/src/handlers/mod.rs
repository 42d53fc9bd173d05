//! HTTP handlers and route configuration.

mod health;
mod posts;
mod submission;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(posts::index))
        .route("/", web::post().to(posts::submit))
        .service(
            web::scope("/api")
                .route("/health", web::get().to(health::health_check))
                .route("/posts", web::get().to(posts::list)),
        );
}

#[cfg(test)]
mod tests;
