//! HTTP inbound adapter exposing the order REST endpoints.

pub mod error;
pub mod extractors;
pub mod health;
pub mod index;
pub mod items;
pub mod orders;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;

use actix_web::web;

pub use error::ApiResult;

/// Register extractor configuration and every order and item route.
///
/// Health probes are registered separately because they carry their own
/// state.
///
/// # Examples
///
/// ```
/// use actix_web::App;
/// use order_service::inbound::http::configure_api;
///
/// let _app = App::new().configure(configure_api);
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(extractors::json_config())
        .app_data(extractors::query_config())
        .app_data(extractors::path_config())
        .service(index::index)
        .service(orders::list_orders)
        .service(orders::create_order)
        .service(orders::cancel_order)
        .service(orders::get_order)
        .service(orders::update_order)
        .service(orders::delete_order)
        .service(items::list_items)
        .service(items::add_item)
        .service(items::get_item)
        .service(items::update_item)
        .service(items::delete_item);
}
