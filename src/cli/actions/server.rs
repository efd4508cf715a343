use crate::{
    api,
    provider::{gotrue::GoTrueClient, SharedProvider},
};
use anyhow::Result;
use secrecy::SecretString;
use std::sync::Arc;
use tracing::info;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub provider_url: String,
    pub provider_key: SecretString,
    pub base_path: String,
}

/// Build the provider client and run the HTTP server until shutdown.
///
/// # Errors
/// Returns an error if the provider URL is invalid or the listener cannot
/// bind the requested port.
pub async fn execute(args: Args) -> Result<()> {
    let base_path = normalize_base_path(&args.base_path);

    log_startup_args(&args, &base_path);

    // One client for the life of the process, handlers share it via Extension.
    let client = GoTrueClient::new(&args.provider_url, args.provider_key)?;
    let provider: SharedProvider = Arc::new(client);

    api::serve(args.port, &base_path, provider).await
}

/// Route prefixes need a leading slash, anything else panics deep inside the
/// router. Accept "auth" and "/auth" alike, strip a trailing slash.
fn normalize_base_path(base_path: &str) -> String {
    let trimmed = base_path.trim().trim_end_matches('/');

    if trimmed.is_empty() {
        return "/".to_string();
    }

    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

fn log_startup_args(args: &Args, base_path: &str) {
    info!(
        port = args.port,
        provider_url = %args.provider_url,
        provider_key_set = true,
        base_path = %base_path,
        "starting gateway"
    );
}
