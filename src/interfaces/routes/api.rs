use actix_web::web;

use crate::handlers::api;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/projects")
            .service(
                web::resource("")
                    .route(web::get().to(api::list_projects))
                    .route(web::post().to(api::create_project))
            )
            .service(
                web::resource("/{project_id}")
                    .route(web::get().to(api::get_project))
            )
    );
}
