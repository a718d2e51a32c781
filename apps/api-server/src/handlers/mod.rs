//! HTTP handlers and route configuration.

mod auth;
mod health;
mod posts;


use actix_web::web;

/// Configure all application routes.
///
/// Listing routes are public; the create and edit routes become
/// protected through the `Identity` extractor in their handlers.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(posts::index))
        .route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/auth")
                .route("/signup", web::post().to(auth::signup))
                .route("/login", web::post().to(auth::login)),
        )
        .route("/group/{slug}/", web::get().to(posts::group_list))
        .route("/profile/{username}/", web::get().to(posts::profile))
        .route("/create/", web::get().to(posts::create_form))
        .route("/create/", web::post().to(posts::create))
        .route("/posts/{id}/", web::get().to(posts::detail))
        .route("/posts/{id}/edit/", web::get().to(posts::edit_form))
        .route("/posts/{id}/edit/", web::post().to(posts::edit));
}
