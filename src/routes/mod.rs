// Route exports
pub mod flow;

use actix_web::web;

pub use flow::AppState;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(flow::configure),
    );
}
