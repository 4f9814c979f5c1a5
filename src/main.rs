use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_rest::{ApiDoc, AppState};
use registry::RegistryClient;

/// Main entry point for the Trialscope proxy
///
/// Starts the REST proxy that translates dashboard filter requests into the public
/// clinical-trials registry's query grammar and relays the responses verbatim.
///
/// # Environment Variables
/// - `TRIALSCOPE_REST_ADDR`: REST server address (default: "0.0.0.0:5000")
/// - `REGISTRY_BASE_URL`: registry API base URL
///   (default: "https://clinicaltrials.gov/api/v2")
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If server startup or runtime fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("trialscope=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr =
        std::env::var("TRIALSCOPE_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:5000".into());
    let registry_base_url = std::env::var("REGISTRY_BASE_URL")
        .unwrap_or_else(|_| "https://clinicaltrials.gov/api/v2".into());

    tracing::info!("++ Starting Trialscope REST on {}", rest_addr);
    tracing::info!("++ Relaying to registry at {}", registry_base_url);

    let state = AppState {
        registry: RegistryClient::new(registry_base_url),
    };

    let app = api_rest::router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
