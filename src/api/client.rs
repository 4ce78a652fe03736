//! HTTP client for the marketplace backend

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, StatusCode};
use tracing::{debug, info};

use crate::api::ApiError;
use crate::config::Config;
use crate::models::{Item, ItemsResponse, NewListing};

/// Backend endpoint paths, relative to the configured origin
pub struct MarketplaceEndpoints;

impl MarketplaceEndpoints {
    pub const ITEMS: &'static str = "/items";
}

/// Operations the front end needs from the backend.
///
/// Both calls are plain network requests with no local side effects and no
/// retry; callers observe failure through the returned error.
#[async_trait]
pub trait MarketplaceApi: Send + Sync {
    /// Fetch the full item collection
    async fn fetch_items(&self) -> Result<Vec<Item>, ApiError>;

    /// Fetch a single item by id
    async fn fetch_item(&self, id: i64) -> Result<Item, ApiError>;

    /// Submit a new listing as a multipart request
    async fn submit_item(&self, listing: &NewListing) -> Result<(), ApiError>;
}

/// reqwest-backed implementation of [`MarketplaceApi`]
#[derive(Debug, Clone)]
pub struct HttpApiClient {
    client: Client,
    origin: String,
}

impl HttpApiClient {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let origin = config.backend_origin().to_string();
        if !(origin.starts_with("http://") || origin.starts_with("https://")) {
            return Err(ApiError::InvalidUrl(origin));
        }

        let client = Client::builder()
            .user_agent(&config.http.user_agent)
            .timeout(config.http_timeout())
            .build()?;

        Ok(Self { client, origin })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.origin, path)
    }

    /// Read the body of a successful response, or turn the status into an error
    async fn success_body(response: Response) -> Result<String, ApiError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::Status {
                status_code: status.as_u16(),
                message: body.trim().to_string(),
            });
        }

        Ok(body)
    }
}

#[async_trait]
impl MarketplaceApi for HttpApiClient {
    async fn fetch_items(&self) -> Result<Vec<Item>, ApiError> {
        let url = self.endpoint(MarketplaceEndpoints::ITEMS);
        debug!("Fetching items from: {}", url);

        let response = self.client.get(&url).send().await?;
        let body = Self::success_body(response).await?;
        let items = serde_json::from_str::<ItemsResponse>(&body)?.into_items();

        debug!("Fetched {} items", items.len());
        Ok(items)
    }

    async fn fetch_item(&self, id: i64) -> Result<Item, ApiError> {
        let url = format!("{}/{}", self.endpoint(MarketplaceEndpoints::ITEMS), id);
        debug!("Fetching item from: {}", url);

        let response = self.client.get(&url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(id));
        }

        let body = Self::success_body(response).await?;
        let mut item: Item = serde_json::from_str(&body)?;
        // The backend omits ids from single-item responses
        if item.id == 0 {
            item.id = id;
        }
        Ok(item)
    }

    async fn submit_item(&self, listing: &NewListing) -> Result<(), ApiError> {
        let url = self.endpoint(MarketplaceEndpoints::ITEMS);
        debug!(
            "Submitting listing '{}' ({} byte image) to: {}",
            listing.name,
            listing.image.bytes.len(),
            url
        );

        let image = Part::bytes(listing.image.bytes.clone())
            .file_name(listing.image.file_name.clone())
            .mime_str(listing.image.content_type())?;

        let form = Form::new()
            .text("name", listing.name.clone())
            .text("category", listing.category.clone())
            .part("image", image);

        let response = self.client.post(&url).multipart(form).send().await?;
        Self::success_body(response).await?;

        info!("Listed item: {}", listing.name);
        Ok(())
    }
}
