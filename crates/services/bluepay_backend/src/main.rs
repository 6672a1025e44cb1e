// File: services/bluepay_backend/src/main.rs
use axum::{routing::get, Router};
use bluepay_config::load_config;
#[cfg(feature = "bluepay")]
use bluepay_gateway::routes as bluepay_routes;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() {
    bluepay_common::logging::init();
    let config = Arc::new(load_config().expect("Failed to load config"));

    let api_router = Router::new()
        .route("/", get(|| async { "Welcome to the BluePay Gateway API!" }))
        .with_state(config.clone());
    #[cfg(feature = "bluepay")]
    let bluepay_router = bluepay_routes(config.clone());

    let api_router = Router::new().nest("/api", {
        #[allow(unused_mut)] // for the features it needs to be mutable
        let mut router = api_router;
        #[cfg(feature = "bluepay")]
        {
            router = router.merge(bluepay_router);
        }
        router
    });

    #[allow(unused_mut)]
    let mut app = api_router;

    // Conditionally add Swagger UI and JSON endpoint if openapi feature enabled
    #[cfg(feature = "openapi")]
    {
        #[cfg(feature = "bluepay")]
        use bluepay_gateway::doc::BluePayApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "BluePay Gateway API",
                version = "0.1.0",
                description = "BluePay payment gateway service API docs",
                license(name = "MIT", url = "https://opensource.org/licenses/MIT")
            ),
            components(),
            tags( (name = "BluePay", description = "Payment gateway endpoints")),
            servers( (url = "/api", description = "Main API Prefix")),
        )]
        struct ApiDoc;

        #[allow(unused_mut)] // for the features it needs to be mutable
        let mut openapi_doc = ApiDoc::openapi();
        #[cfg(feature = "bluepay")]
        openapi_doc.merge(BluePayApiDoc::openapi());
        info!("📖 Adding Swagger UI at /api/docs");

        let swagger_ui =
            SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc.clone());
        app = app.merge(swagger_ui);
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await.unwrap();
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service())
        .await
        .unwrap();
}
