//! OpenAPI documentation for the HTTP surface

use utoipa::OpenApi;

use crate::error::ErrorBody;
use crate::rest::{chat, health, listings};

#[derive(OpenApi)]
#[openapi(
    paths(
        listings::add_listing,
        listings::list_listings,
        listings::search_listings,
        listings::get_listing,
        listings::upload_images,
        chat::chat_with_bot,
        health::health_check,
    ),
    components(schemas(
        listings::CreateListingPayload,
        listings::CreateListingResponse,
        listings::ListingDetailResponse,
        listings::ListingPage,
        listings::ListingResponse,
        listings::ImageResponse,
        listings::PaginationMeta,
        listings::UploadImagesResponse,
        chat::ChatRequest,
        chat::ChatResponse,
        chat::PropertySummary,
        health::HealthResponse,
        ErrorBody,
    )),
    tags(
        (name = "Properties", description = "Listing management and search"),
        (name = "Chat", description = "Property chat assistant"),
        (name = "Health", description = "Service health")
    )
)]
pub struct ApiDoc;
