//! Server configuration module

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port to listen on
    pub port: u16,

    /// Data directory for the document store; in-memory storage when unset
    pub data_dir: Option<PathBuf>,

    /// JWT secret key for signing session tokens
    pub jwt_secret: String,

    /// Session token lifetime in days
    pub jwt_expiration_days: u64,

    /// Allow user signup (set to false in production)
    pub allow_signup: bool,

    /// Mark session cookies Secure (enable behind HTTPS)
    pub secure_cookies: bool,

    /// Chat provider configuration
    pub chat: ChatConfig,
}

/// Chat provider configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Provider API key
    pub api_key: Option<String>,

    /// Provider API secret used to sign user tokens
    pub api_secret: Option<String>,

    /// Provider REST endpoint
    pub base_url: String,
}

impl ChatConfig {
    /// Whether enough configuration is present to talk to the provider
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some() && self.api_secret.is_some()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            data_dir: None,
            jwt_secret: String::new(), // Generated at runtime if not provided
            jwt_expiration_days: 7,
            allow_signup: true,
            secure_cookies: false,
            chat: ChatConfig {
                api_key: None,
                api_secret: None,
                base_url: "https://chat.stream-io-api.com".to_string(),
            },
        }
    }
}

impl ServerConfig {
    /// Load configuration from CLI arguments and environment variables.
    /// CLI arguments take precedence over environment variables.
    pub fn from_cli_and_env(cli_args: crate::cli::CliArgs) -> Result<Self> {
        let mut config = Self::default();

        if let Some(port) = cli_args.port {
            config.port = port;
        } else if let Ok(port) = env::var("TANDEM_PORT") {
            config.port = port.parse()?;
        }

        if let Some(data_dir) = cli_args.data_dir {
            config.data_dir = Some(data_dir);
        } else if let Ok(data_dir) = env::var("TANDEM_DATA_DIR") {
            config.data_dir = Some(PathBuf::from(data_dir));
        }

        if let Some(jwt_secret) = cli_args.jwt_secret {
            config.jwt_secret = jwt_secret;
        } else if let Ok(jwt_secret) = env::var("TANDEM_JWT_SECRET") {
            config.jwt_secret = jwt_secret;
        } else if config.jwt_secret.is_empty() {
            // Generate a random JWT secret if not provided; existing sessions
            // do not survive a restart in this mode.
            config.jwt_secret = Self::generate_jwt_secret();
        }

        if let Some(exp_days) = cli_args.jwt_expiration_days {
            config.jwt_expiration_days = exp_days;
        } else if let Ok(exp_days) = env::var("TANDEM_JWT_EXPIRATION_DAYS") {
            config.jwt_expiration_days = exp_days.parse()?;
        }

        if let Some(allow_signup) = cli_args.allow_signup {
            config.allow_signup = allow_signup;
        } else if let Ok(allow_signup) = env::var("TANDEM_ALLOW_SIGNUP") {
            config.allow_signup = allow_signup.parse().unwrap_or(true);
        }

        if let Some(secure_cookies) = cli_args.secure_cookies {
            config.secure_cookies = secure_cookies;
        } else if let Ok(secure_cookies) = env::var("TANDEM_SECURE_COOKIES") {
            config.secure_cookies = secure_cookies.parse().unwrap_or(false);
        }

        if let Ok(api_key) = env::var("STREAM_API_KEY") {
            config.chat.api_key = Some(api_key);
        }
        if let Ok(api_secret) = env::var("STREAM_API_SECRET") {
            config.chat.api_secret = Some(api_secret);
        }
        if let Ok(base_url) = env::var("STREAM_API_URL") {
            config.chat.base_url = base_url;
        }

        Ok(config)
    }

    /// Generate a secure random JWT secret
    pub fn generate_jwt_secret() -> String {
        use rand::distr::Alphanumeric;
        use rand::Rng;
        rand::rng()
            .sample_iter(&Alphanumeric)
            .take(64)
            .map(char::from)
            .collect()
    }
}
