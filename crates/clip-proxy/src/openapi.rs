use utoipa::OpenApi;

use reel_clip_interface::{ClipsResponse, ErrorResponse, Subtitle, Word};

#[derive(OpenApi)]
#[openapi(
    paths(crate::routes::clips::handler),
    components(schemas(ClipsResponse, ErrorResponse, Subtitle, Word)),
    tags((name = "clips", description = "Phrase search over short video clips"))
)]
struct ApiDoc;

pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
