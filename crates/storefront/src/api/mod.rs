//! HTTP client for the remote order service.
//!
//! Plain JSON REST: login, profile update, order creation and listing, all
//! keyed by the shopper's phone number. Non-success responses are converted
//! to [`ApiError::Service`] carrying the body's `message` field when one is
//! present, else a generic fallback.

pub mod types;

pub use types::{CreateOrderRequest, ErrorBody, LoginRequest};

use reqwest::header::{HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use thiserror::Error;

use tahadu_core::{Order, OrderId, PhoneNumber, UserProfile};

/// Production base path of the order service.
pub const DEFAULT_BASE_URL: &str = "https://geolink.pythonanywhere.com/api";

/// Fallback message when an error response carries no `message` field.
const GENERIC_ERROR_MESSAGE: &str = "Something went wrong";

/// Errors that can occur when calling the order service.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never completed (network, DNS, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    ///
    /// `message` is the body's `message` field, else the generic fallback.
    /// Displayed as the message alone so it can surface directly in the UI.
    #[error("{message}")]
    Service { status: u16, message: String },
}

/// Operations the storefront needs from the remote service.
///
/// A trait seam so the stores can be driven by an in-memory fake in tests;
/// [`HttpApi`] is the real implementation.
#[allow(async_fn_in_trait)]
pub trait StoreApi: Clone {
    /// Login or register by phone number.
    async fn login(&self, phone: &PhoneNumber) -> Result<UserProfile, ApiError>;

    /// Replace the profile stored for `profile.phone_number`.
    async fn update_profile(&self, profile: &UserProfile) -> Result<UserProfile, ApiError>;

    /// Create an order.
    async fn create_order(&self, request: &CreateOrderRequest) -> Result<Order, ApiError>;

    /// List all orders for a phone number, most recent first.
    async fn list_orders(&self, phone: &PhoneNumber) -> Result<Vec<Order>, ApiError>;

    /// Fetch a single order.
    async fn order_detail(&self, id: OrderId, phone: &PhoneNumber) -> Result<Order, ApiError>;
}

/// The real JSON REST client.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpApi {
    /// Create a client for the service at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client fails to build.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.base_url)
    }

    /// Apply the response convention: success parses the body, non-success
    /// becomes a `Service` error with the body's message when present.
    async fn handle<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();

        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.message)
                .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_owned());
            return Err(ApiError::Service {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

impl StoreApi for HttpApi {
    async fn login(&self, phone: &PhoneNumber) -> Result<UserProfile, ApiError> {
        let response = self
            .client
            .post(self.url("/login"))
            .json(&LoginRequest {
                phone_number: phone.clone(),
            })
            .send()
            .await?;
        Self::handle(response).await
    }

    async fn update_profile(&self, profile: &UserProfile) -> Result<UserProfile, ApiError> {
        let response = self
            .client
            .put(self.url("/user/update"))
            .json(profile)
            .send()
            .await?;
        Self::handle(response).await
    }

    async fn create_order(&self, request: &CreateOrderRequest) -> Result<Order, ApiError> {
        let response = self
            .client
            .post(self.url("/order"))
            .json(request)
            .send()
            .await?;
        Self::handle(response).await
    }

    async fn list_orders(&self, phone: &PhoneNumber) -> Result<Vec<Order>, ApiError> {
        let url = format!(
            "{}?phone_number={}",
            self.url("/orders"),
            urlencoding::encode(phone.as_str())
        );
        let response = self.client.get(url).send().await?;
        Self::handle(response).await
    }

    async fn order_detail(&self, id: OrderId, phone: &PhoneNumber) -> Result<Order, ApiError> {
        let url = format!(
            "{}?phone_number={}",
            self.url(&format!("/order/{id}")),
            urlencoding::encode(phone.as_str())
        );
        let response = self.client.get(url).send().await?;
        Self::handle(response).await
    }
}
