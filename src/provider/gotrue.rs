//! HTTP client for a GoTrue-style identity provider.

use anyhow::{anyhow, Context, Result};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde_json::{json, Value};
use tracing::{debug, error, instrument};
use url::Url;

use super::{
    provider_error_message, split_session, AuthSession, BoxFuture, Credentials, IdentityProvider,
    ProviderError, SignUp,
};

/// Identity-provider client over the provider's credential/session REST API.
///
/// Built once at startup and shared across requests; `reqwest::Client` pools
/// connections internally so no extra reuse discipline is needed.
pub struct GoTrueClient {
    http: Client,
    auth_base: String,
    api_key: SecretString,
}

impl GoTrueClient {
    /// Build a client for the given provider endpoint.
    ///
    /// The URL is parsed and normalized up front so a misconfigured endpoint
    /// aborts startup instead of failing on the first request.
    ///
    /// # Errors
    /// Returns an error if the URL cannot be parsed, has no host, uses an
    /// unsupported scheme, or the HTTP client cannot be constructed.
    pub fn new(provider_url: &str, api_key: SecretString) -> Result<Self> {
        let auth_base = endpoint_url(provider_url, "/auth/v1")?;

        let http = Client::builder()
            .user_agent(crate::APP_USER_AGENT)
            .build()
            .context("Failed to build provider HTTP client")?;

        Ok(Self {
            http,
            auth_base,
            api_key,
        })
    }

    fn request(&self, method: Method, path: &str, bearer: Option<&str>) -> RequestBuilder {
        let mut builder = self
            .http
            .request(method, format!("{}{path}", self.auth_base))
            .header("apikey", self.api_key.expose_secret());

        if let Some(token) = bearer {
            builder = builder.bearer_auth(token);
        }

        builder
    }

    /// Send a request and decode the JSON body of a successful response.
    async fn send_json(builder: RequestBuilder) -> Result<Value, ProviderError> {
        let response = builder.send().await?;
        let status = response.status();

        if status.is_success() {
            Ok(response.json().await?)
        } else {
            Err(rejected(status, response.json().await.unwrap_or(Value::Null)))
        }
    }

    /// Send a request where only the status matters; the body is discarded.
    async fn send_unit(builder: RequestBuilder) -> Result<(), ProviderError> {
        let response = builder.send().await?;
        let status = response.status();

        if status.is_success() {
            Ok(())
        } else {
            Err(rejected(status, response.json().await.unwrap_or(Value::Null)))
        }
    }
}

fn rejected(status: StatusCode, json_response: Value) -> ProviderError {
    let message = provider_error_message(&json_response, status);
    error!("Provider call failed: {} - {}", status, message);
    ProviderError::Rejected { status, message }
}

impl IdentityProvider for GoTrueClient {
    fn sign_up(&self, signup: SignUp) -> BoxFuture<'_, Result<AuthSession, ProviderError>> {
        Box::pin(async move {
            let payload = json!({
                "email": signup.email,
                "password": signup.password,
                "data": {
                    "full_name": signup.full_name,
                    "phone": signup.phone,
                },
            });

            let body =
                Self::send_json(self.request(Method::POST, "/signup", None).json(&payload)).await?;

            Ok(split_session(body))
        })
    }

    fn sign_in(
        &self,
        credentials: Credentials,
    ) -> BoxFuture<'_, Result<AuthSession, ProviderError>> {
        Box::pin(async move {
            let payload = json!({
                "email": credentials.email,
                "password": credentials.password,
            });

            let body = Self::send_json(
                self.request(Method::POST, "/token?grant_type=password", None)
                    .json(&payload),
            )
            .await?;

            Ok(split_session(body))
        })
    }

    fn sign_out<'a>(
        &'a self,
        access_token: Option<&'a str>,
    ) -> BoxFuture<'a, Result<(), ProviderError>> {
        Box::pin(async move {
            // With no token there is no session to bind; the provider treats
            // sign-out as a no-op and the operation still reports success.
            let Some(token) = access_token else {
                debug!("Sign-out without a bound session");
                return Ok(());
            };

            Self::send_unit(self.request(Method::POST, "/logout", Some(token))).await
        })
    }

    fn send_password_reset<'a>(
        &'a self,
        email: &'a str,
    ) -> BoxFuture<'a, Result<(), ProviderError>> {
        Box::pin(async move {
            let payload = json!({ "email": email });

            Self::send_unit(self.request(Method::POST, "/recover", None).json(&payload)).await
        })
    }

    fn update_password<'a>(
        &'a self,
        access_token: &'a str,
        password: &'a str,
    ) -> BoxFuture<'a, Result<(), ProviderError>> {
        Box::pin(async move {
            let payload = json!({ "password": password });

            Self::send_unit(
                self.request(Method::PUT, "/user", Some(access_token))
                    .json(&payload),
            )
            .await
        })
    }

    fn user_for_token<'a>(
        &'a self,
        access_token: &'a str,
    ) -> BoxFuture<'a, Result<Value, ProviderError>> {
        Box::pin(async move {
            let user = Self::send_json(self.request(Method::GET, "/user", Some(access_token))).await?;

            // A token the provider cannot resolve to an identity is as good
            // as a rejected one.
            if user.get("id").and_then(Value::as_str).is_some() {
                Ok(user)
            } else {
                Err(ProviderError::Rejected {
                    status: StatusCode::UNAUTHORIZED,
                    message: "No user for session".to_string(),
                })
            }
        })
    }
}

#[instrument]
/// # Errors
/// Returns an error if `url` cannot be parsed, has no host, or uses an unsupported scheme.
pub fn endpoint_url(url: &str, path: &str) -> Result<String> {
    let url = Url::parse(url)?;

    let scheme = url.scheme();

    let host = url
        .host()
        .ok_or_else(|| anyhow!("Error parsing URL: no host specified"))?
        .to_owned();

    let port = match url.port() {
        Some(p) => p,
        None => match scheme {
            "http" => 80,
            "https" => 443,
            _ => return Err(anyhow!("Error parsing URL: unsupported scheme {scheme}")),
        },
    };

    let endpoint_url = format!("{scheme}://{host}:{port}{path}");

    debug!("endpoint URL: {}", endpoint_url);

    Ok(endpoint_url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_url_defaults_https_port() {
        let url = endpoint_url("https://project.supabase.co", "/auth/v1");
        assert!(matches!(url, Ok(value) if value == "https://project.supabase.co:443/auth/v1"));
    }

    #[test]
    fn endpoint_url_keeps_explicit_port() {
        let url = endpoint_url("http://localhost:9999", "/auth/v1");
        assert!(matches!(url, Ok(value) if value == "http://localhost:9999/auth/v1"));
    }

    #[test]
    fn endpoint_url_rejects_unsupported_scheme() {
        assert!(endpoint_url("ftp://provider.tld", "/auth/v1").is_err());
    }

    #[test]
    fn endpoint_url_rejects_missing_host() {
        assert!(endpoint_url("not a url", "/auth/v1").is_err());
    }

    #[test]
    fn client_construction_fails_fast_on_bad_url() {
        let client = GoTrueClient::new("", SecretString::from("anon-key".to_string()));
        assert!(client.is_err());
    }

    #[test]
    fn client_construction_accepts_valid_url() {
        let client = GoTrueClient::new(
            "https://project.supabase.co",
            SecretString::from("anon-key".to_string()),
        );
        assert!(client.is_ok());
    }
}
