use crate::cli::actions::{server, Action};
use anyhow::Result;
use secrecy::SecretString;

/// Map parsed CLI arguments into an [`Action`].
///
/// The provider URL and key are required by clap (flag or `PORTAGE_*` env),
/// so a missing value aborts startup here instead of degrading to an empty
/// configuration at request time.
///
/// # Errors
/// Returns an error if a required argument is absent.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    Ok(Action::Server(server::Args {
        port: matches.get_one::<u16>("port").copied().unwrap_or(8080),
        provider_url: matches
            .get_one("provider-url")
            .map(|s: &String| s.to_string())
            .ok_or_else(|| anyhow::anyhow!("missing required argument: --provider-url"))?,
        provider_key: matches
            .get_one("provider-key")
            .map(|s: &String| SecretString::from(s.to_string()))
            .ok_or_else(|| anyhow::anyhow!("missing required argument: --provider-key"))?,
        base_path: matches
            .get_one("base-path")
            .map_or_else(|| "/auth".to_string(), |s: &String| s.to_string()),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands;
    use secrecy::ExposeSecret;

    #[test]
    fn handler_builds_server_action() -> Result<()> {
        let matches = commands::new().get_matches_from(vec![
            "portage",
            "--port",
            "9000",
            "--provider-url",
            "https://project.supabase.co",
            "--provider-key",
            "anon-key",
            "--base-path",
            "/api/auth",
        ]);

        let Action::Server(args) = handler(&matches)?;
        assert_eq!(args.port, 9000);
        assert_eq!(args.provider_url, "https://project.supabase.co");
        assert_eq!(args.provider_key.expose_secret(), "anon-key");
        assert_eq!(args.base_path, "/api/auth");
        Ok(())
    }
}
