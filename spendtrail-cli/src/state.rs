use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

pub fn spendtrail_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".spendtrail"))
}

pub fn ensure_spendtrail_home() -> Result<PathBuf> {
    let dir = spendtrail_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn oauth_client_path() -> Result<PathBuf> {
    Ok(ensure_spendtrail_home()?.join("google_oauth.json"))
}

pub fn token_cache_path() -> Result<PathBuf> {
    Ok(ensure_spendtrail_home()?.join("google_token_cache.json"))
}

/// Default location of the line-delimited snippets artifact.
pub fn snippets_path() -> Result<PathBuf> {
    Ok(ensure_spendtrail_home()?.join("snippets.txt"))
}
