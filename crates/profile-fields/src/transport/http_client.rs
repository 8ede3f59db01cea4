use super::Transport;
use crate::{Error, Map};
use profile_fields_core::extension::{JsonObjectExt, TomlTableExt};
use reqwest::{Client, Method, StatusCode, Url};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::{DefaultSpanBackend, TracingMiddleware};
use toml::Table;

/// A [`Transport`] backed by an HTTP client.
///
/// Bodies are sent as `application/x-www-form-urlencoded`. A response is accepted
/// only with a success status and an empty or JSON object body whose `result`
/// is not `"error"`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    /// Base URL of the backend.
    base_url: Url,
    /// HTTP client.
    client: ClientWithMiddleware,
}

impl HttpTransport {
    /// Creates a new instance for the base URL with a default client.
    pub fn new(base_url: &str) -> Result<Self, Error> {
        Self::with_config(base_url, &Table::new())
    }

    /// Creates a new instance from the `[http-client]` table of the config.
    pub fn from_config(config: &Table) -> Result<Self, Error> {
        let http_client = config.get_table("http-client");
        let base_url = http_client
            .and_then(|config| config.get_str("base-url"))
            .ok_or_else(|| Error::new("`http-client.base-url` should be specified"))?;
        let empty = Table::new();
        Self::with_config(base_url, http_client.unwrap_or(&empty))
    }

    fn with_config(base_url: &str, config: &Table) -> Result<Self, Error> {
        let base_url = Url::parse(base_url)
            .map_err(|err| Error::with_source(format!("invalid base URL `{base_url}`"), err))?;
        let user_agent = config.get_str("user-agent").unwrap_or(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        let mut client_builder = Client::builder().user_agent(user_agent).gzip(true);
        if let Some(timeout) = config.get_duration("request-timeout") {
            client_builder = client_builder.timeout(timeout);
        }
        let reqwest_client = client_builder
            .build()
            .map_err(|err| Error::with_source("fail to create an HTTP client", err))?;
        let client = ClientBuilder::new(reqwest_client)
            .with(TracingMiddleware::<DefaultSpanBackend>::new())
            .build();
        Ok(Self { base_url, client })
    }

    /// Returns the base URL.
    #[inline]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn send(&self, method: Method, url: &str, body: &Map) -> Result<(), Error> {
        let url = self
            .base_url
            .join(url)
            .map_err(|err| Error::with_source(format!("invalid request URL `{url}`"), err))?;
        let response = self
            .client
            .request(method.clone(), url.clone())
            .form(body)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        match check_response(status, &body) {
            Ok(()) => {
                tracing::debug!(%method, %url, status = status.as_u16(), "profile data sent");
                Ok(())
            }
            Err(message) => {
                tracing::warn!(%method, %url, status = status.as_u16(), "{message}");
                Err(Error::new(format!("{method} {url} responded {status}: {message}")))
            }
        }
    }
}

/// Checks the status and body of a response, returning the failure message.
fn check_response(status: StatusCode, body: &str) -> Result<(), String> {
    let data = if body.trim().is_empty() {
        Map::new()
    } else {
        match serde_json::from_str::<Map>(body) {
            Ok(data) => data,
            Err(err) if status.is_success() => return Err(format!("invalid response body: {err}")),
            Err(_) => Map::new(),
        }
    };
    if status.is_success() && data.get_str("result") != Some("error") {
        Ok(())
    } else {
        Err(data.get_str("msg").unwrap_or("request failed").to_owned())
    }
}

impl Transport for HttpTransport {
    #[inline]
    async fn post(&self, url: &str, body: &Map) -> Result<(), Error> {
        self.send(Method::POST, url, body).await
    }

    #[inline]
    async fn delete(&self, url: &str, body: &Map) -> Result<(), Error> {
        self.send(Method::DELETE, url, body).await
    }
}
