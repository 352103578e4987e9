//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use filedrop_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Filedrop API",
        version = "0.1.0",
        description = "Minimal file upload service. Files are streamed to a local directory under a random UUID name; the uploads query lists the names stored since startup."
    ),
    paths(
        handlers::uploads::list_uploads,
        handlers::uploads::upload_file,
        handlers::health::health_check,
    ),
    components(schemas(
        models::FileResponse,
        error::ErrorResponse,
        handlers::health::HealthCheckResponse,
    )),
    tags(
        (name = "uploads", description = "Upload a file and list stored uploads"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
