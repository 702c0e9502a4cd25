//! HTTP client for the Géoplateforme and API Carto services.

use anyhow::{Context, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::info;
use url::Url;

use crate::select::Selection;

pub const DEFAULT_GPF_URL: &str = "https://data.geopf.fr";
pub const DEFAULT_APICARTO_URL: &str = "https://apicarto.ign.fr";

const USER_AGENT: &str = concat!("geocontext/", env!("CARGO_PKG_VERSION"));

/// Base URLs of the upstream services
#[derive(Debug, Clone)]
pub struct Endpoints {
    gpf_url: String,
    apicarto_url: String,
}

impl Endpoints {
    pub fn new(gpf_url: &str, apicarto_url: &str) -> Result<Self> {
        Ok(Self {
            gpf_url: base_url(gpf_url)?,
            apicarto_url: base_url(apicarto_url)?,
        })
    }

    /// `{gpf_url}/{path}` with the given query parameters
    pub fn gpf(&self, path: &str, params: &[(&str, String)]) -> Result<Url> {
        build_url(&self.gpf_url, path, params)
    }

    /// `{apicarto_url}/{path}` with the given query parameters
    pub fn apicarto(&self, path: &str, params: &[(&str, String)]) -> Result<Url> {
        build_url(&self.apicarto_url, path, params)
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            gpf_url: DEFAULT_GPF_URL.to_string(),
            apicarto_url: DEFAULT_APICARTO_URL.to_string(),
        }
    }
}

fn base_url(raw: &str) -> Result<String> {
    Url::parse(raw).with_context(|| format!("invalid base URL {:?}", raw))?;
    Ok(raw.trim_end_matches('/').to_string())
}

fn build_url(base: &str, path: &str, params: &[(&str, String)]) -> Result<Url> {
    let url = format!("{}/{}", base, path.trim_start_matches('/'));
    // parse_with_params leaves a dangling `?` when there is nothing to append
    let parsed = if params.is_empty() {
        Url::parse(&url)
    } else {
        Url::parse_with_params(&url, params)
    };
    parsed.with_context(|| format!("invalid URL {}", url))
}

/// Client shared by every lookup.
///
/// Cheap to clone: the underlying connection pool is reference counted.
#[derive(Clone)]
pub struct GeoplateformeClient {
    client: Client,
    pub(crate) endpoints: Endpoints,
    pub(crate) selection: Selection,
}

impl GeoplateformeClient {
    pub fn new(endpoints: Endpoints, selection: Selection) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            endpoints,
            selection,
        })
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// GET a JSON document, failing on non-success statuses
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        info!("[HTTP-GET] {} ...", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("request to {} failed", url))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("{} returned {}: {}", url, status, body);
        }

        response
            .json::<T>()
            .await
            .with_context(|| format!("invalid JSON response from {}", url))
    }
}
