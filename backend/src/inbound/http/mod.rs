//! HTTP inbound adapter exposing the `/api` endpoints and health probes.

use actix_web::web;

pub mod categories;
pub mod error;
pub mod health;
pub mod notes;
pub mod publications;
pub mod session;
pub mod sessions;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod token_config;
pub mod users;

pub use error::ApiResult;

/// Register every `/api` endpoint, with JSON and query parse failures
/// rendered as `400` error payloads.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use cerealnotes::inbound::http::configure_api;
///
/// let _app = App::new().configure(configure_api);
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
            .app_data(web::QueryConfig::default().error_handler(error::query_error_handler))
            .service(users::signup)
            .service(users::list_users)
            .service(sessions::login)
            .service(sessions::logout)
            .service(notes::list_notes)
            .service(notes::create_note)
            .service(notes::update_note)
            .service(notes::delete_note)
            .service(categories::get_category)
            .service(categories::create_category)
            .service(categories::update_category)
            .service(categories::delete_category)
            .service(publications::publish),
    );
}
