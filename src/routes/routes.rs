use actix_web::web;

use crate::handlers::health_handlers::health_check;
use crate::handlers::url_handlers::{create_short_url, get_url_stats, redirect_to_url};

/// Configure the routes
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
    cfg.service(
        web::scope("/shorturls")
            .route("", web::post().to(create_short_url))
            .route("/{code}", web::get().to(get_url_stats)),
    );
    // Catch-all redirect route last so the fixed paths above win.
    cfg.route("/{code}", web::get().to(redirect_to_url));
}
