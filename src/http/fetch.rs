use std::collections::HashMap;

use reqwest::{Client, Method, Response};
use serde::{de::DeserializeOwned, Deserialize};

use crate::error::Error;

/// Options for a single request to a remote service.
pub struct FetchOptions {
    pub method: Method,
    pub query_params: HashMap<String, String>,
    pub body: Option<serde_json::Value>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            query_params: HashMap::default(),
            body: None,
        }
    }
}

/// Error body returned by the Yggdrasil services on failure.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct ServiceError {
    error: String,
    error_message: Option<String>,
}

/// Sends a request and returns the raw response if it was successful.
///
/// # Parameters
/// - `url`: The URL to send the request to.
/// - `options`: Method, query parameters and JSON body. Defaults to a plain GET.
/// - `client`: The HTTP client used for making requests.
///
/// # Returns
/// A result containing the successful `Response`. Non-success responses that carry
/// a service error body become `Error::Authentication`, the rest `Error::Status`.
pub async fn send_with_options(
    url: &str,
    options: Option<FetchOptions>,
    client: &Client,
) -> crate::Result<Response> {
    let options = options.unwrap_or_default();

    let mut request = client.request(options.method, url);
    if !options.query_params.is_empty() {
        request = request.query(&options.query_params);
    }
    if let Some(body) = &options.body {
        request = request.json(body);
    }

    let response = request.send().await?;
    ensure_success(response).await
}

/// Sends a request and deserializes the JSON response into `T`.
///
/// # Parameters
/// - `url`: The URL to send the request to.
/// - `options`: Method, query parameters and JSON body.
/// - `client`: The HTTP client used for making requests.
///
/// # Returns
/// A result containing the deserialized response of type `T`.
pub async fn fetch_with_options<T: DeserializeOwned>(
    url: &str,
    options: Option<FetchOptions>,
    client: &Client,
) -> crate::Result<T> {
    let response = send_with_options(url, options, client).await?;
    Ok(response.json::<T>().await?)
}

async fn ensure_success(response: Response) -> crate::Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await?;
    match serde_json::from_str::<ServiceError>(&body) {
        Ok(error) => Err(Error::Authentication(
            error.error_message.unwrap_or(error.error),
        )),
        Err(_) => Err(Error::Status(status.as_u16())),
    }
}
