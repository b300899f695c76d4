//! Drive listing backend
//!
//! Authenticated file-listing API: a refresh token is exchanged for a bearer
//! access token on each uncached listing, then the folder contents are
//! fetched over HTTPS. The media-source reference is the drive folder id.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use oauth2::{
    AuthUrl, ClientId, ClientSecret, RefreshToken, TokenResponse, TokenUrl, basic::BasicClient,
};
use serde::Deserialize;
use tracing::debug;

use crate::config::DriveConfig;
use crate::resolvers::remote::ObjectLister;

const AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const FILES_URL: &str = "https://www.googleapis.com/drive/v3/files";

/// Lists gallery files from a drive folder
pub struct DriveLister {
    http: reqwest::Client,
    config: DriveConfig,
}

#[derive(Deserialize)]
struct DriveFileList {
    #[serde(default)]
    files: Vec<DriveFile>,
}

#[derive(Deserialize)]
struct DriveFile {
    name: String,
}

impl DriveLister {
    pub fn new(config: DriveConfig, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, config })
    }

    /// Exchange the configured refresh token for a bearer access token
    async fn access_token(&self) -> Result<String> {
        let client = BasicClient::new(
            ClientId::new(self.config.client_id.clone()),
            Some(ClientSecret::new(self.config.client_secret.clone())),
            AuthUrl::new(AUTH_URL.to_string())?,
            Some(TokenUrl::new(TOKEN_URL.to_string())?),
        );

        let token = client
            .exchange_refresh_token(&RefreshToken::new(self.config.refresh_token.clone()))
            .request_async(oauth2::reqwest::async_http_client)
            .await?;

        Ok(token.access_token().secret().clone())
    }
}

#[async_trait]
impl ObjectLister for DriveLister {
    async fn list(&self, source_ref: &str) -> Result<Vec<String>> {
        let access_token = self.access_token().await?;
        debug!("Listing drive folder {}", source_ref);

        let query = format!("'{}' in parents", source_ref);
        let response = self
            .http
            .get(FILES_URL)
            .query(&[
                ("q", query.as_str()),
                ("fields", "files(id,name,mimeType)"),
                ("pageSize", "1000"),
            ])
            .bearer_auth(access_token)
            .send()
            .await?
            .error_for_status()?;

        let listing: DriveFileList = response.json().await?;
        Ok(listing.files.into_iter().map(|file| file.name).collect())
    }
}
