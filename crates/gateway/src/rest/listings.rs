//! Listing REST endpoints: create, browse, search, detail, image upload

use std::path::Path as FsPath;
use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, Query, State},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::fs;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::error::{ErrorBody, GatewayError, GatewayResult};
use crate::state::AppState;
use estately_database::{
    CreateListingRequest, Listing, ListingImage, ListingIntent, ListingSearchParams, PropertyType,
};

const DEFAULT_PAGE_SIZE: i64 = 10;
const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateListingPayload {
    pub title: String,
    pub description: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub price: f64,
    #[schema(value_type = String, example = "APARTMENT")]
    pub property_type: PropertyType,
    pub phone: Option<String>,
    pub bedrooms: Option<i64>,
    pub area: Option<f64>,
    pub area_unit: Option<String>,
    #[schema(value_type = Option<String>, example = "SALE")]
    pub listing_intent: Option<ListingIntent>,
    pub user_id: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListingResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub price: f64,
    #[schema(value_type = String)]
    pub property_type: PropertyType,
    pub phone: Option<String>,
    pub bedrooms: Option<i64>,
    pub area: Option<f64>,
    pub area_unit: Option<String>,
    #[schema(value_type = String)]
    pub listing_intent: ListingIntent,
    pub user_id: String,
    pub created_at: String,
    pub updated_at: String,
    pub images: Vec<ImageResponse>,
}

impl ListingResponse {
    fn from_parts(listing: Listing, images: Vec<ListingImage>) -> Self {
        Self {
            id: listing.public_id,
            title: listing.title,
            description: listing.description,
            address: listing.address,
            city: listing.city,
            state: listing.state,
            pincode: listing.pincode,
            price: listing.price,
            property_type: listing.property_type,
            phone: listing.phone,
            bedrooms: listing.bedrooms,
            area: listing.area,
            area_unit: listing.area_unit,
            listing_intent: listing.listing_intent,
            user_id: listing.user_id,
            created_at: listing.created_at,
            updated_at: listing.updated_at,
            images: images.into_iter().map(ImageResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageResponse {
    pub id: i64,
    pub url: String,
    pub created_at: String,
}

impl From<ListingImage> for ImageResponse {
    fn from(image: ListingImage) -> Self {
        Self {
            id: image.id,
            url: image.url,
            created_at: image.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl PaginationMeta {
    fn new(total: i64, page: i64, limit: i64) -> Self {
        let total_pages = if limit > 0 { (total + limit - 1) / limit } else { 0 };
        Self {
            total,
            page,
            limit,
            total_pages,
            has_next: page * limit < total,
            has_previous: page > 1,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListingPage {
    pub success: bool,
    pub data: Vec<ListingResponse>,
    pub pagination: PaginationMeta,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateListingResponse {
    pub success: bool,
    pub message: String,
    pub data: ListingResponse,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListingDetailResponse {
    pub success: bool,
    pub data: ListingResponse,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadImagesResponse {
    pub success: bool,
    pub message: String,
    pub data: Vec<ImageResponse>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct SearchListingsQuery {
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
    #[param(value_type = Option<String>)]
    pub listing_intent: Option<ListingIntent>,
    #[param(value_type = Option<String>)]
    pub property_type: Option<PropertyType>,
    pub bedrooms: Option<i64>,
    pub area_unit: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Create listing routes
pub fn create_listing_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/properties/add", post(add_listing))
        .route("/api/properties/all", get(list_listings))
        .route("/api/properties/search", get(search_listings))
        .route("/api/properties/upload-images", post(upload_images))
        .route("/api/properties/:id", get(get_listing))
}

#[utoipa::path(
    post,
    path = "/api/properties/add",
    tag = "Properties",
    request_body = CreateListingPayload,
    responses(
        (status = 201, description = "Listing created", body = CreateListingResponse),
        (status = 400, description = "Missing or invalid fields", body = ErrorBody),
        (status = 500, description = "Database failure", body = ErrorBody)
    )
)]
pub async fn add_listing(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateListingPayload>,
) -> GatewayResult<impl IntoResponse> {
    validate_listing_payload(&payload)?;

    let request = CreateListingRequest {
        title: payload.title,
        description: payload.description,
        address: payload.address,
        city: payload.city,
        state: payload.state,
        pincode: payload.pincode,
        price: payload.price,
        property_type: payload.property_type,
        phone: payload.phone,
        bedrooms: payload.bedrooms,
        area: payload.area,
        area_unit: payload.area_unit,
        listing_intent: payload.listing_intent,
        user_id: payload.user_id,
    };

    let listing = state.listings.create(&request).await?;

    let response = CreateListingResponse {
        success: true,
        message: "Property listed successfully".to_string(),
        data: ListingResponse::from_parts(listing, Vec::new()),
    };
    Ok((axum::http::StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/properties/all",
    tag = "Properties",
    params(PageQuery),
    responses(
        (status = 200, description = "Paginated listings, newest first", body = ListingPage),
        (status = 500, description = "Database failure", body = ErrorBody)
    )
)]
pub async fn list_listings(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> GatewayResult<Json<ListingPage>> {
    let (page, limit, offset) = page_window(query.page, query.limit);

    let listings = state.listings.list_newest(limit, offset).await?;
    let total = state.listings.count_all().await?;
    let data = hydrate_images(&state, listings).await?;

    Ok(Json(ListingPage {
        success: true,
        data,
        pagination: PaginationMeta::new(total, page, limit),
    }))
}

#[utoipa::path(
    get,
    path = "/api/properties/search",
    tag = "Properties",
    params(SearchListingsQuery),
    responses(
        (status = 200, description = "Paginated search results", body = ListingPage),
        (status = 400, description = "Invalid filter value", body = ErrorBody),
        (status = 500, description = "Database failure", body = ErrorBody)
    )
)]
pub async fn search_listings(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchListingsQuery>,
) -> GatewayResult<Json<ListingPage>> {
    let (page, limit, offset) = page_window(query.page, query.limit);

    let params = ListingSearchParams {
        city: query.city,
        state: query.state,
        pincode: query.pincode,
        listing_intent: query.listing_intent,
        property_type: query.property_type,
        bedrooms: query.bedrooms,
        area_unit: query.area_unit,
        min_price: query.min_price,
        max_price: query.max_price,
    };

    let listings = state.listings.search(&params, limit, offset).await?;
    let total = state.listings.count_search(&params).await?;
    let data = hydrate_images(&state, listings).await?;

    Ok(Json(ListingPage {
        success: true,
        data,
        pagination: PaginationMeta::new(total, page, limit),
    }))
}

#[utoipa::path(
    get,
    path = "/api/properties/{id}",
    tag = "Properties",
    params(("id" = String, Path, description = "Listing public ID")),
    responses(
        (status = 200, description = "Listing details with images", body = ListingDetailResponse),
        (status = 404, description = "Listing not found", body = ErrorBody),
        (status = 500, description = "Database failure", body = ErrorBody)
    )
)]
pub async fn get_listing(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> GatewayResult<Json<ListingDetailResponse>> {
    let listing = state
        .listings
        .find_by_public_id(&id)
        .await?
        .ok_or_else(|| GatewayError::NotFound("Property not found".to_string()))?;

    let images = state.images.find_by_listing_id(listing.id).await?;

    Ok(Json(ListingDetailResponse {
        success: true,
        data: ListingResponse::from_parts(listing, images),
    }))
}

#[utoipa::path(
    post,
    path = "/api/properties/upload-images",
    tag = "Properties",
    responses(
        (status = 200, description = "Files stored and attached to the listing", body = UploadImagesResponse),
        (status = 400, description = "Invalid upload payload", body = ErrorBody),
        (status = 404, description = "Listing not found", body = ErrorBody),
        (status = 500, description = "Storage failure", body = ErrorBody)
    )
)]
pub async fn upload_images(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> GatewayResult<Json<UploadImagesResponse>> {
    let mut property_id: Option<String> = None;
    let mut files: Vec<PendingUpload> = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        GatewayError::InvalidRequest(format!("invalid multipart payload: {e}"))
    })? {
        let name = field.name().map(ToString::to_string);
        match name.as_deref() {
            Some("propertyId") => {
                let value = field.text().await.map_err(|e| {
                    GatewayError::InvalidRequest(format!("invalid propertyId field: {e}"))
                })?;
                property_id = Some(value);
            }
            Some("images") => {
                if files.len() as u32 >= state.uploads.max_files_per_request {
                    return Err(GatewayError::InvalidRequest(format!(
                        "too many files, at most {} allowed",
                        state.uploads.max_files_per_request
                    )));
                }

                let content_type = field.content_type().map(ToString::to_string);
                let extension = content_type
                    .as_deref()
                    .and_then(image_extension)
                    .ok_or_else(|| {
                        GatewayError::InvalidRequest(
                            "Invalid file type. Only JPEG, PNG, and WebP are allowed.".to_string(),
                        )
                    })?;

                let data = field.bytes().await.map_err(|e| {
                    GatewayError::InvalidRequest(format!("failed to read uploaded file: {e}"))
                })?;

                if data.len() as u64 > state.uploads.max_file_size_bytes {
                    return Err(GatewayError::InvalidRequest(format!(
                        "file exceeds the {} byte limit",
                        state.uploads.max_file_size_bytes
                    )));
                }

                files.push(PendingUpload { extension, data });
            }
            _ => {}
        }
    }

    let property_id = property_id
        .ok_or_else(|| GatewayError::InvalidRequest("Property ID is required".to_string()))?;
    if files.is_empty() {
        return Err(GatewayError::InvalidRequest("No files uploaded".to_string()));
    }

    // All fields are buffered before anything touches disk, so an unknown
    // listing leaves no stray files behind.
    let listing = state
        .listings
        .find_by_public_id(&property_id)
        .await?
        .ok_or_else(|| GatewayError::NotFound("Property not found".to_string()))?;

    fs::create_dir_all(&state.uploads.directory)
        .await
        .map_err(|e| GatewayError::InternalError(format!("failed to create uploads dir: {e}")))?;

    let mut stored = Vec::with_capacity(files.len());
    for file in files {
        let file_name = format!("{}.{}", Uuid::new_v4(), file.extension);
        let disk_path = FsPath::new(&state.uploads.directory).join(&file_name);

        fs::write(&disk_path, &file.data)
            .await
            .map_err(|e| GatewayError::InternalError(format!("failed to store file: {e}")))?;

        let url = format!("/uploads/{file_name}");
        match state.images.create(listing.id, &url).await {
            Ok(image) => stored.push(ImageResponse::from(image)),
            Err(error) => {
                // Keep disk and database in step when the record insert fails.
                let _ = fs::remove_file(&disk_path).await;
                return Err(error.into());
            }
        }
    }

    Ok(Json(UploadImagesResponse {
        success: true,
        message: "Files uploaded successfully".to_string(),
        data: stored,
    }))
}

struct PendingUpload {
    extension: &'static str,
    data: axum::body::Bytes,
}

fn validate_listing_payload(payload: &CreateListingPayload) -> GatewayResult<()> {
    let required = [
        ("title", &payload.title),
        ("description", &payload.description),
        ("address", &payload.address),
        ("city", &payload.city),
        ("state", &payload.state),
        ("pincode", &payload.pincode),
        ("userId", &payload.user_id),
    ];

    let missing: Vec<&str> = required
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();

    if !missing.is_empty() {
        return Err(GatewayError::InvalidRequest(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    }

    if payload.price <= 0.0 {
        return Err(GatewayError::InvalidRequest(
            "price must be positive".to_string(),
        ));
    }

    Ok(())
}

/// Normalize pagination inputs and derive the row offset.
fn page_window(page: Option<i64>, limit: Option<i64>) -> (i64, i64, i64) {
    let page = page.unwrap_or(1).max(1);
    let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    (page, limit, (page - 1) * limit)
}

async fn hydrate_images(
    state: &AppState,
    listings: Vec<Listing>,
) -> GatewayResult<Vec<ListingResponse>> {
    // One gallery query per listing so every response carries its images
    let mut responses = Vec::with_capacity(listings.len());
    for listing in listings {
        let images = state.images.find_by_listing_id(listing.id).await?;
        responses.push(ListingResponse::from_parts(listing, images));
    }
    Ok(responses)
}

fn image_extension(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/jpeg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/webp" => Some("webp"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_meta_math() {
        let meta = PaginationMeta::new(25, 1, 10);
        assert_eq!(meta.total_pages, 3);
        assert!(meta.has_next);
        assert!(!meta.has_previous);

        let meta = PaginationMeta::new(25, 3, 10);
        assert!(!meta.has_next);
        assert!(meta.has_previous);

        let meta = PaginationMeta::new(0, 1, 10);
        assert_eq!(meta.total_pages, 0);
        assert!(!meta.has_next);
    }

    #[test]
    fn page_window_defaults_and_clamps() {
        assert_eq!(page_window(None, None), (1, 10, 0));
        assert_eq!(page_window(Some(3), Some(20)), (3, 20, 40));
        assert_eq!(page_window(Some(0), Some(0)), (1, 1, 0));
        assert_eq!(page_window(Some(2), Some(1000)), (2, 100, 100));
    }

    #[test]
    fn only_image_mime_types_are_accepted() {
        assert_eq!(image_extension("image/jpeg"), Some("jpg"));
        assert_eq!(image_extension("image/png"), Some("png"));
        assert_eq!(image_extension("image/webp"), Some("webp"));
        assert_eq!(image_extension("application/pdf"), None);
        assert_eq!(image_extension("text/html"), None);
    }
}
