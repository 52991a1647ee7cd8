//! Service root describing the API.

use actix_web::{get, web};
use serde::Serialize;
use utoipa::ToSchema;

/// Display name reported by `GET /`.
pub const SERVICE_NAME: &str = "Order REST API Service";

/// Response body of `GET /`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceInfo {
    #[schema(example = "Order REST API Service")]
    pub name: &'static str,
    #[schema(example = "0.1.0")]
    pub version: &'static str,
    /// Entry point of the order collection.
    #[schema(example = "/orders")]
    pub paths: &'static str,
}

/// Describe the service.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Service information", body = ServiceInfo)),
    tags = ["service"],
    operation_id = "index"
)]
#[get("/")]
pub async fn index() -> web::Json<ServiceInfo> {
    web::Json(ServiceInfo {
        name: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        paths: "/orders",
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, http::StatusCode, test as actix_test};
    use serde_json::Value;

    #[actix_web::test]
    async fn index_names_the_service_and_its_collection() {
        let app = actix_test::init_service(App::new().service(index)).await;
        let response =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri("/").to_request())
                .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["name"], SERVICE_NAME);
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
        assert_eq!(body["paths"], "/orders");
    }
}
