use actix_web::web;

use crate::handlers::system;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/health")
            .route(web::get().to(system::health_check))
    );
}
