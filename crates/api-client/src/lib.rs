use crate::error::ApiError;
use async_trait::async_trait;
use core_types::{Customer, CustomerId, CustomerPayload};
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

pub mod error;

/// The abstract interface to the customer API.
/// The terminal UI only talks to this trait, so the transport can be swapped out.
#[async_trait]
pub trait CustomerApi: Send + Sync {
    async fn list_customers(&self) -> Result<Vec<Customer>, ApiError>;

    async fn get_customer(&self, id: CustomerId) -> Result<Customer, ApiError>;

    async fn create_customer(&self, payload: &CustomerPayload) -> Result<Customer, ApiError>;

    /// `payload.id` selects the record to update.
    async fn update_customer(&self, payload: &CustomerPayload) -> Result<Customer, ApiError>;

    async fn delete_customer(&self, id: CustomerId) -> Result<Customer, ApiError>;
}

/// A concrete implementation of [`CustomerApi`] over HTTP.
#[derive(Clone, Debug)]
pub struct HttpCustomerClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCustomerClient {
    /// `base_url` is the API root, e.g. `http://127.0.0.1:3000`.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let base_url = base_url.trim().trim_end_matches('/');
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ApiError::InvalidBaseUrl(base_url.to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(concat!("memberdesk/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%method, %url, "Sending API request.");
        self.client.request(method, url)
    }
}

/// Maps any non-success status to an error; the UI does not tell them apart
/// beyond "not found".
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Err(ApiError::NotFound);
    }
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::Rejected {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response.json::<T>().await?)
}

#[async_trait]
impl CustomerApi for HttpCustomerClient {
    async fn list_customers(&self) -> Result<Vec<Customer>, ApiError> {
        let response = self.request(Method::GET, "/customer").send().await?;
        read_json(response).await
    }

    async fn get_customer(&self, id: CustomerId) -> Result<Customer, ApiError> {
        let response = self
            .request(Method::GET, &format!("/customer/{id}"))
            .send()
            .await?;
        read_json(response).await
    }

    async fn create_customer(&self, payload: &CustomerPayload) -> Result<Customer, ApiError> {
        let response = self
            .request(Method::POST, "/customer")
            .json(payload)
            .send()
            .await?;
        read_json(response).await
    }

    async fn update_customer(&self, payload: &CustomerPayload) -> Result<Customer, ApiError> {
        let response = self
            .request(Method::PUT, "/customer")
            .json(payload)
            .send()
            .await?;
        read_json(response).await
    }

    async fn delete_customer(&self, id: CustomerId) -> Result<Customer, ApiError> {
        let response = self
            .request(Method::DELETE, &format!("/customer/{id}"))
            .send()
            .await?;
        read_json(response).await
    }
}
