//! Audible library API client

use crate::{
    config::AudibleConfig,
    error::{AppError, AppResult},
    models::library_entry::{LibraryEntry, LibraryResponse},
};

const RESPONSE_GROUPS: &str = "contributors,product_desc,product_attrs";

/// Sent with every bearer-token request alongside `Authorization`
const CLIENT_ID_HEADER: (&str, &str) = ("client-id", "0");

/// Marketplace top-level domain for an Audible locale code
pub fn marketplace_domain(locale: &str) -> &'static str {
    match locale.trim().to_ascii_uppercase().as_str() {
        "UK" | "GB" => "co.uk",
        "DE" => "de",
        "FR" => "fr",
        "CA" => "ca",
        "AU" => "com.au",
        "JP" => "co.jp",
        "IT" => "it",
        "IN" => "in",
        "ES" => "es",
        _ => "com",
    }
}

pub fn api_base_for_locale(locale: &str) -> String {
    format!("https://api.audible.{}", marketplace_domain(locale))
}

#[derive(Clone)]
pub struct AudibleClient {
    http: reqwest::Client,
    api_base: String,
    access_token: String,
    num_results: u32,
}

impl AudibleClient {
    pub fn new(config: &AudibleConfig, access_token: String) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("book-alchemy/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let api_base = config
            .api_base
            .clone()
            .unwrap_or_else(|| api_base_for_locale(&config.locale));

        Ok(Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            access_token,
            num_results: config.num_results,
        })
    }

    pub fn library_url(&self) -> String {
        format!("{}/1.0/library", self.api_base)
    }

    /// Authenticated library request
    pub fn library_request(&self) -> AppResult<reqwest::Request> {
        let request = self
            .http
            .get(self.library_url())
            .bearer_auth(&self.access_token)
            .header(CLIENT_ID_HEADER.0, CLIENT_ID_HEADER.1)
            .query(&[
                ("num_results", self.num_results.to_string()),
                ("response_groups", RESPONSE_GROUPS.to_string()),
            ])
            .build()?;
        Ok(request)
    }

    /// Fetch the account's library in a single request
    pub async fn fetch_library(&self) -> AppResult<Vec<LibraryEntry>> {
        let request = self.library_request()?;
        tracing::info!("Fetching Audible library from {}", request.url());

        let response = self.http.execute(request).await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::External(format!(
                "Audible library request failed with {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        let library: LibraryResponse = response.json().await?;
        let entries = library.into_entries();
        tracing::info!("Fetched {} library entries", entries.len());
        Ok(entries)
    }
}
