//! In-memory [`MarketplaceApi`] for controller and view tests

use std::sync::Mutex;

use async_trait::async_trait;

use crate::api::{ApiError, MarketplaceApi};
use crate::models::{Item, NewListing};

#[derive(Default)]
pub(crate) struct FakeApi {
    pub items: Mutex<Vec<Item>>,
    pub submitted: Mutex<Vec<NewListing>>,
    pub fetch_calls: Mutex<usize>,
    pub fail_fetch: bool,
    pub fail_submit: bool,
}

impl FakeApi {
    pub fn with_items(items: Vec<Item>) -> Self {
        Self {
            items: Mutex::new(items),
            ..Default::default()
        }
    }

    pub fn failing_submit() -> Self {
        Self {
            fail_submit: true,
            ..Default::default()
        }
    }

    pub fn failing_fetch() -> Self {
        Self {
            fail_fetch: true,
            ..Default::default()
        }
    }

    pub fn submitted(&self) -> Vec<NewListing> {
        self.submitted.lock().unwrap().clone()
    }

    pub fn fetch_calls(&self) -> usize {
        *self.fetch_calls.lock().unwrap()
    }
}

fn unavailable() -> ApiError {
    ApiError::Status {
        status_code: 503,
        message: "backend unavailable".to_string(),
    }
}

#[async_trait]
impl MarketplaceApi for FakeApi {
    async fn fetch_items(&self) -> Result<Vec<Item>, ApiError> {
        *self.fetch_calls.lock().unwrap() += 1;
        if self.fail_fetch {
            return Err(unavailable());
        }
        Ok(self.items.lock().unwrap().clone())
    }

    async fn fetch_item(&self, id: i64) -> Result<Item, ApiError> {
        self.items
            .lock()
            .unwrap()
            .iter()
            .find(|item| item.id == id)
            .cloned()
            .ok_or(ApiError::NotFound(id))
    }

    async fn submit_item(&self, listing: &NewListing) -> Result<(), ApiError> {
        self.submitted.lock().unwrap().push(listing.clone());
        if self.fail_submit {
            return Err(unavailable());
        }
        Ok(())
    }
}
