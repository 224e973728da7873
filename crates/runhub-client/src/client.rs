use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::error::{message_from_body, ApiError};

/// Thin wrapper over a configured [`reqwest::Client`].
///
/// Every request optionally carries a bearer token supplied by the caller;
/// the wrapper itself holds no credentials. A 401 response is mapped to
/// [`ApiError::Unauthorized`] no matter which endpoint produced it; all other
/// error statuses pass through with the backend's message attached.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Ok(Self {
            http: reqwest::Client::new(),
            base_url: Url::parse(base_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn request(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
    ) -> Result<RequestBuilder, ApiError> {
        let url = self.base_url.join(path.trim_start_matches('/'))?;
        let mut builder = self.http.request(method, url);
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        Ok(builder)
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let response = builder.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            let url = response.url().clone();
            let body = response.bytes().await.unwrap_or_default();
            tracing::debug!(status = status.as_u16(), url = %url, "Backend error response");
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: message_from_body(&body),
            });
        }

        Ok(response.json().await?)
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let mut builder = self.request(Method::GET, path, token)?;
        if !query.is_empty() {
            builder = builder.query(query);
        }
        self.send(builder).await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
        body: &B,
    ) -> Result<T, ApiError> {
        let builder = self.request(Method::POST, path, token)?.json(body);
        self.send(builder).await
    }

    pub async fn patch<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
        body: &B,
    ) -> Result<T, ApiError> {
        let builder = self.request(Method::PATCH, path, token)?.json(body);
        self.send(builder).await
    }

    /// DELETE returning a body (e.g. cancelling a booking returns the
    /// updated booking).
    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> Result<T, ApiError> {
        let builder = self.request(Method::DELETE, path, token)?;
        self.send(builder).await
    }

    /// DELETE where the backend answers with an empty body.
    pub async fn delete_no_content(&self, path: &str, token: Option<&str>) -> Result<(), ApiError> {
        let builder = self.request(Method::DELETE, path, token)?;
        let response = builder.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            let url = response.url().clone();
            let body = response.bytes().await.unwrap_or_default();
            tracing::debug!(status = status.as_u16(), url = %url, "Backend error response");
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: message_from_body(&body),
            });
        }

        Ok(())
    }
}
