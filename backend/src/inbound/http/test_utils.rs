//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use crate::inbound::http::configure_api;
use crate::inbound::http::state::HttpState;
use crate::test_support::InMemoryOrderStore;

/// Build an application serving the order routes from `store`.
pub fn order_app(
    store: Arc<InMemoryOrderStore>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let state = HttpState::from_repositories(store.clone(), store);
    App::new()
        .app_data(web::Data::new(state))
        .configure(configure_api)
}
