//! spendtrail-gmail: the external-collaborator surface.
//!
//! Three operations, nothing more: run the OAuth handshake, list message ids
//! matching a query (following pagination), and fetch a message's snippet.
//! Everything hard (token refresh, the interactive flow, pagination tokens)
//! belongs to the Gmail client library.

pub mod auth;
pub mod client;

/// Read-only mail access; changing this invalidates cached tokens.
pub const GMAIL_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/gmail.readonly";

pub use auth::{load_oauth_client, run_installed_flow, save_oauth_client, GoogleOAuthClient};
pub use client::GmailClient;
