use actix_web::web;

use crate::handlers::{gallery, upload};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
            web::resource("/")
                .route(web::get().to(gallery::gallery_page))
        )
        .service(
            web::resource("/projects/{project_id}/screenshots")
                .route(web::get().to(gallery::screenshot_viewer))
        )
        .service(
            web::resource("/upload")
                .route(web::get().to(upload::upload_page))
                .route(web::post().to(upload::submit_upload))
        );
}
