//! OAuth client configuration and the installed-app handshake.
//!
//! The client id/secret come from a Google Cloud Console "Desktop app"
//! credential and are persisted as JSON next to the token cache. Tokens are
//! the authenticator's problem: it refreshes them when possible and falls
//! back to the interactive browser flow when not.

use anyhow::{bail, Context, Result};
use hyper::client::HttpConnector;
use hyper_rustls::HttpsConnector;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

// IMPORTANT: use the oauth2 version re-exported by google-gmail1 to avoid version mismatches.
use google_gmail1::oauth2;

use crate::GMAIL_READONLY_SCOPE;

pub(crate) type GmailAuthenticator =
    oauth2::authenticator::Authenticator<HttpsConnector<HttpConnector>>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleOAuthClient {
    pub client_id: String,
    pub client_secret: String,
    /// Defaults to https://accounts.google.com/o/oauth2/auth
    pub auth_uri: Option<String>,
    /// Defaults to https://oauth2.googleapis.com/token
    pub token_uri: Option<String>,
    /// Defaults to ["http://localhost"]
    pub redirect_uris: Option<Vec<String>>,
}

pub fn save_oauth_client(path: &Path, client: &GoogleOAuthClient) -> Result<()> {
    fs::write(path, serde_json::to_string_pretty(client)?)
        .with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn load_oauth_client(path: &Path) -> Result<GoogleOAuthClient> {
    if !path.exists() {
        bail!(
            "Missing Google OAuth client config at {}. Run: spendtrail connect",
            path.display()
        );
    }
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    Ok(serde_json::from_str(&s)?)
}

/// yup-oauth2 expects the same structure as Google "installed" client secrets.
pub(crate) fn application_secret(client: &GoogleOAuthClient) -> oauth2::ApplicationSecret {
    oauth2::ApplicationSecret {
        client_id: client.client_id.clone(),
        client_secret: client.client_secret.clone(),
        auth_uri: client
            .auth_uri
            .clone()
            .unwrap_or_else(|| "https://accounts.google.com/o/oauth2/auth".to_string()),
        token_uri: client
            .token_uri
            .clone()
            .unwrap_or_else(|| "https://oauth2.googleapis.com/token".to_string()),
        redirect_uris: client
            .redirect_uris
            .clone()
            .unwrap_or_else(|| vec!["http://localhost".to_string()]),
        ..Default::default()
    }
}

/// Installed-app authenticator with its token cache on disk.
///
/// `HTTPRedirect` opens a local callback listener on an ephemeral port; the
/// user's browser bounces the authorization code back to it. Once tokens are
/// cached, later runs refresh without any interaction.
pub(crate) async fn build_authenticator(
    client: &GoogleOAuthClient,
    token_cache: &Path,
) -> Result<GmailAuthenticator> {
    oauth2::InstalledFlowAuthenticator::builder(
        application_secret(client),
        oauth2::InstalledFlowReturnMethod::HTTPRedirect,
    )
    .persist_tokens_to_disk(token_cache)
    .build()
    .await
    .context("building oauth authenticator")
}

/// Run the installed-app flow once and cache the resulting tokens on disk.
pub async fn run_installed_flow(client: &GoogleOAuthClient, token_cache: &Path) -> Result<()> {
    let auth = build_authenticator(client, token_cache).await?;

    // Requesting a token is what actually triggers the flow.
    auth.token(&[GMAIL_READONLY_SCOPE])
        .await
        .context("authorizing gmail readonly access")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_application_secret_defaults() {
        let client = GoogleOAuthClient {
            client_id: "abc.apps.googleusercontent.com".to_string(),
            client_secret: "s3cret".to_string(),
            auth_uri: None,
            token_uri: None,
            redirect_uris: None,
        };
        let secret = application_secret(&client);
        assert_eq!(secret.auth_uri, "https://accounts.google.com/o/oauth2/auth");
        assert_eq!(secret.token_uri, "https://oauth2.googleapis.com/token");
        assert_eq!(secret.redirect_uris, vec!["http://localhost".to_string()]);
    }

    #[test]
    fn test_oauth_client_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("google_oauth.json");

        let client = GoogleOAuthClient {
            client_id: "abc.apps.googleusercontent.com".to_string(),
            client_secret: "s3cret".to_string(),
            auth_uri: None,
            token_uri: None,
            redirect_uris: Some(vec!["http://localhost".to_string()]),
        };
        save_oauth_client(&path, &client).unwrap();
        let back = load_oauth_client(&path).unwrap();
        assert_eq!(back.client_id, client.client_id);
        assert_eq!(back.redirect_uris, client.redirect_uris);
    }

    #[test]
    fn test_load_missing_config_mentions_connect() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_oauth_client(&dir.path().join("google_oauth.json")).unwrap_err();
        assert!(err.to_string().contains("spendtrail connect"));
    }
}
