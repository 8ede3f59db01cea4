//! Transport of profile data updates.

use crate::{Error, Map};

mod http_client;

pub use http_client::HttpTransport;

/// Default endpoint for profile data updates.
pub const PROFILE_DATA_ENDPOINT: &str = "/json/users/me/profile_data";

/// A collaborator that delivers request bodies to the backend.
///
/// A body is an object with a single `data` entry holding a JSON string.
pub trait Transport {
    /// Posts the body to the URL.
    async fn post(&self, url: &str, body: &Map) -> Result<(), Error>;

    /// Sends a `DELETE` request with the body to the URL.
    async fn delete(&self, url: &str, body: &Map) -> Result<(), Error>;
}

impl<T: Transport + ?Sized> Transport for &T {
    #[inline]
    async fn post(&self, url: &str, body: &Map) -> Result<(), Error> {
        (**self).post(url, body).await
    }

    #[inline]
    async fn delete(&self, url: &str, body: &Map) -> Result<(), Error> {
        (**self).delete(url, body).await
    }
}
