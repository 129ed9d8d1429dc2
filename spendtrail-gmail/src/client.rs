//! Thin wrappers over `users.messages.list` / `users.messages.get`.

use anyhow::{Context, Result};
use google_gmail1::Gmail;
use hyper::client::HttpConnector;
use hyper_rustls::HttpsConnector;
use std::path::Path;

use crate::auth::{build_authenticator, GoogleOAuthClient};
use crate::GMAIL_READONLY_SCOPE;

pub struct GmailClient {
    hub: Gmail<HttpsConnector<HttpConnector>>,
}

impl GmailClient {
    /// Build an authenticated hub. Uses cached tokens when they're still
    /// good; otherwise the authenticator runs the interactive flow.
    pub async fn connect(client: &GoogleOAuthClient, token_cache: &Path) -> Result<Self> {
        let auth = build_authenticator(client, token_cache).await?;

        let connector = hyper_rustls::HttpsConnectorBuilder::new()
            .with_native_roots()
            .context("loading native TLS roots")?
            .https_or_http()
            .enable_http1()
            .build();
        let hub = Gmail::new(hyper::Client::builder().build(connector), auth);
        Ok(Self { hub })
    }

    /// All message ids matching `query`, across every result page.
    ///
    /// The caller computes the query once; this loop only threads the
    /// continuation token through.
    pub async fn list_message_ids(&self, query: &str) -> Result<Vec<String>> {
        let mut ids = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut call = self
                .hub
                .users()
                .messages_list("me")
                .q(query)
                .add_scope(GMAIL_READONLY_SCOPE);
            if let Some(token) = &page_token {
                call = call.page_token(token);
            }

            let (_, resp) = call
                .doit()
                .await
                .with_context(|| format!("listing messages for query {query:?}"))?;

            if let Some(messages) = resp.messages {
                ids.extend(messages.into_iter().filter_map(|m| m.id));
            }

            match resp.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        Ok(ids)
    }

    /// The plain-text preview of one message. Minimal format is enough: it
    /// carries the snippet without the full payload.
    pub async fn fetch_snippet(&self, message_id: &str) -> Result<String> {
        let (_, message) = self
            .hub
            .users()
            .messages_get("me", message_id)
            .format("minimal")
            .add_scope(GMAIL_READONLY_SCOPE)
            .doit()
            .await
            .with_context(|| format!("fetching message {message_id}"))?;

        Ok(message.snippet.unwrap_or_default())
    }

    /// Fetch snippets one message at a time, in order.
    pub async fn fetch_snippets(&self, message_ids: &[String]) -> Result<Vec<String>> {
        let mut snippets = Vec::with_capacity(message_ids.len());
        for id in message_ids {
            snippets.push(self.fetch_snippet(id).await?);
        }
        Ok(snippets)
    }
}
