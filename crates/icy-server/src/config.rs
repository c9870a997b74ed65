use std::path::PathBuf;

use anyhow::{Context, Result, bail};

/// Server configuration, read from the environment (after `.env` is loaded).
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    pub sender_email: String,
    pub default_owner: String,
    pub youtube_api_key: String,
    pub gemini_api_key: String,
    pub gemini_model: String,
    /// Sending is disabled when absent.
    pub sendgrid_api_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| get(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let or = |key: &str, default: &str| var(key).unwrap_or_else(|| default.to_string());

        let port = or("ICY_PORT", "5000");
        let port: u16 = port
            .parse()
            .with_context(|| format!("ICY_PORT must be a port number, got '{}'", port))?;

        let Some(youtube_api_key) = var("YOUTUBE_API_KEY") else {
            bail!("YOUTUBE_API_KEY is not set");
        };
        let Some(gemini_api_key) = var("GEMINI_API_KEY") else {
            bail!("GEMINI_API_KEY is not set");
        };

        let sender_email = or("ICY_SENDER_EMAIL", "noreply@icy-outreach.com");
        if !icy_api::validate::is_email(&sender_email) {
            bail!("ICY_SENDER_EMAIL must be an email address, got '{}'", sender_email);
        }

        Ok(Self {
            host: or("ICY_HOST", "0.0.0.0"),
            port,
            db_path: or("ICY_DB_PATH", "icy.db").into(),
            sender_email,
            default_owner: or("ICY_DEFAULT_OWNER", "testuser"),
            youtube_api_key,
            gemini_api_key,
            gemini_model: or("GEMINI_MODEL", icy_clients::gemini::DEFAULT_MODEL),
            sendgrid_api_key: var("SENDGRID_API_KEY"),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(pairs: &[(&str, &str)]) -> Result<Config> {
        let env: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_lookup(|key| env.get(key).cloned())
    }

    const KEYS: [(&str, &str); 2] = [("YOUTUBE_API_KEY", "yt"), ("GEMINI_API_KEY", "gm")];

    #[test]
    fn test_defaults() {
        let config = load(&KEYS).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 5000);
        assert_eq!(config.db_path, PathBuf::from("icy.db"));
        assert_eq!(config.sender_email, "noreply@icy-outreach.com");
        assert_eq!(config.default_owner, "testuser");
        assert_eq!(config.gemini_model, "gemini-2.0-flash");
        assert!(config.sendgrid_api_key.is_none());
    }

    #[test]
    fn test_missing_required_keys() {
        let err = load(&[("GEMINI_API_KEY", "gm")]).unwrap_err();
        assert_eq!(err.to_string(), "YOUTUBE_API_KEY is not set");

        let err = load(&[("YOUTUBE_API_KEY", "yt"), ("GEMINI_API_KEY", "  ")]).unwrap_err();
        assert_eq!(err.to_string(), "GEMINI_API_KEY is not set");
    }

    #[test]
    fn test_overrides_and_bad_port() {
        let mut pairs = KEYS.to_vec();
        pairs.extend([("ICY_PORT", "8080"), ("SENDGRID_API_KEY", "sg"), ("ICY_SENDER_EMAIL", "hi@acme.test")]);
        let config = load(&pairs).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.sendgrid_api_key.as_deref(), Some("sg"));
        assert_eq!(config.sender_email, "hi@acme.test");

        let mut pairs = KEYS.to_vec();
        pairs.push(("ICY_PORT", "eighty"));
        assert!(load(&pairs).is_err());
    }

    #[test]
    fn test_bad_sender_email() {
        let mut pairs = KEYS.to_vec();
        pairs.push(("ICY_SENDER_EMAIL", "noreply"));
        let err = load(&pairs).unwrap_err();
        assert_eq!(err.to_string(), "ICY_SENDER_EMAIL must be an email address, got 'noreply'");
    }
}
