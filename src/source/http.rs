//! HTTPS page source for the open-data endpoint.

use crate::model::SourceError;
use crate::source::{parse_page, Page, PageSource};
use std::future::Future;
use trillium_client::Client;
use trillium_rustls::RustlsConfig;
use trillium_smol::ClientConfig;

/// Records endpoint of the "arbres remarquables" dataset.
pub const DEFAULT_ENDPOINT: &str =
    "https://opendata.paris.fr/api/explore/v2.1/catalog/datasets/arbresremarquablesparis/records";

/// Page source that issues `GET {endpoint}?limit=..&offset=..`.
pub struct HttpSource {
    client: Client,
    endpoint: String,
}

impl std::fmt::Debug for HttpSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpSource")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl HttpSource {
    /// Create a source for `endpoint` using a rustls-backed client.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(RustlsConfig::<ClientConfig>::default()),
            endpoint: endpoint.into(),
        }
    }

    /// The configured endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// URL for the page at `offset`.
    pub fn page_url(&self, offset: usize, limit: usize) -> String {
        page_url(&self.endpoint, offset, limit)
    }
}

fn page_url(endpoint: &str, offset: usize, limit: usize) -> String {
    let separator = if endpoint.contains('?') { '&' } else { '?' };
    format!("{endpoint}{separator}limit={limit}&offset={offset}")
}

impl PageSource for HttpSource {
    fn fetch_page(
        &self,
        offset: usize,
        limit: usize,
    ) -> impl Future<Output = Result<Page, SourceError>> {
        let url = self.page_url(offset, limit);
        async move {
            let mut conn = self
                .client
                .get(url.as_str())
                .await
                .map_err(|e| SourceError::Transport(e.to_string()))?;

            let status = conn
                .status()
                .ok_or_else(|| SourceError::Transport("response carried no status".to_string()))?;
            if !status.is_success() {
                return Err(SourceError::Status { code: status as u16 });
            }

            let body = conn
                .response_body()
                .read_string()
                .await
                .map_err(|e| SourceError::Transport(e.to_string()))?;

            parse_page(&body)
        }
    }
}
