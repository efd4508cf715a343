//! # Portage (Auth Gateway)
//!
//! `portage` is the authentication gateway for a multi-tenant travel-booking
//! platform. It exposes a small REST surface (register, login, logout,
//! reset-password, update-password, verify-session) and proxies every
//! operation to an external identity provider, translating provider
//! responses and errors into one uniform JSON contract.
//!
//! The gateway is deliberately stateless: credentials are forwarded, never
//! persisted; sessions are opaque bearer tokens owned by the provider and
//! presented by the caller on each request. Each request is a single
//! round trip to the provider with no retries and no cross-request state,
//! so instances can be scaled and restarted freely.
//!
//! Provider errors are passed through verbatim. The gateway wraps them in a
//! fixed error taxonomy (see [`api::error::ApiError`]) but never rewrites
//! the provider's message text, which carries the actual failure reason
//! (duplicate account, weak password, bad credentials, ...).

pub mod api;
pub mod cli;
pub mod provider;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
