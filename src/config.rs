use std::env;
use std::fmt;

#[derive(Clone)]
pub struct Config {
    // Server
    pub host: String,
    pub port: u16,
    pub environment: String,

    // Payout signing
    pub rpc_url: Option<String>,
    pub wallet_private_key: Option<String>,

    // Pay-then-play variant
    pub payment_app_id: Option<String>,
    pub payment_gate_enabled: bool,

    // CORS
    pub cors_allowed_origins: String,
}

/// Credentials needed to sign and broadcast a payout.
#[derive(Clone)]
pub struct PayoutCredentials {
    pub rpc_url: String,
    pub private_key: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()?,
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),

            rpc_url: non_empty_var("RPC_URL"),
            wallet_private_key: non_empty_var("WALLET_PRIVATE_KEY"),

            payment_app_id: non_empty_var("DAIMO_PAY_APP_ID"),
            payment_gate_enabled: env_flag("PAYMENT_GATE_ENABLED"),

            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .unwrap_or_else(|_| "*".to_string()),
        })
    }

    /// Warns about incomplete configuration. Missing payout credentials do not
    /// stop the server; the payout route answers "Server not configured".
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.rpc_url.is_none() {
            tracing::warn!("RPC_URL is not set; payouts will be rejected");
        }
        if self.wallet_private_key.is_none() {
            tracing::warn!("WALLET_PRIVATE_KEY is not set; payouts will be rejected");
        }
        if let Some(rpc_url) = &self.rpc_url {
            if let Err(e) = url::Url::parse(rpc_url) {
                tracing::warn!("RPC_URL does not parse as a URL: {}", e);
            }
        }
        if self.payment_gate_enabled && self.payment_app_id.is_none() {
            tracing::warn!("Payment gate enabled without DAIMO_PAY_APP_ID");
        }
        if self.cors_allowed_origins.trim().is_empty() {
            tracing::warn!("CORS_ALLOWED_ORIGINS is empty; requests may be blocked");
        }
        Ok(())
    }

    pub fn payout_credentials(&self) -> Option<PayoutCredentials> {
        let rpc_url = self.rpc_url.as_deref()?.trim();
        let private_key = self.wallet_private_key.as_deref()?.trim();
        if rpc_url.is_empty() || private_key.is_empty() {
            return None;
        }
        Some(PayoutCredentials {
            rpc_url: rpc_url.to_string(),
            private_key: private_key.to_string(),
        })
    }

    pub fn payout_configured(&self) -> bool {
        self.payout_credentials().is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            environment: "development".to_string(),
            rpc_url: None,
            wallet_private_key: None,
            payment_app_id: None,
            payment_gate_enabled: false,
            cors_allowed_origins: "*".to_string(),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("environment", &self.environment)
            .field("rpc_url", &self.rpc_url.as_ref().map(|_| "<set>"))
            .field(
                "wallet_private_key",
                &self.wallet_private_key.as_ref().map(|_| "<redacted>"),
            )
            .field("payment_app_id", &self.payment_app_id)
            .field("payment_gate_enabled", &self.payment_gate_enabled)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .finish()
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub fn env_flag(name: &str) -> bool {
    env::var(name)
        .ok()
        .map(|value| {
            matches!(
                value.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "y" | "on"
            )
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payout_credentials_require_both_values() {
        let mut config = Config {
            rpc_url: Some("https://mainnet.base.org".to_string()),
            ..Config::default()
        };
        assert!(config.payout_credentials().is_none());

        config.wallet_private_key = Some("   ".to_string());
        assert!(config.payout_credentials().is_none());

        config.wallet_private_key = Some("0xabc".to_string());
        let creds = config.payout_credentials().expect("credentials");
        assert_eq!(creds.rpc_url, "https://mainnet.base.org");
        assert_eq!(creds.private_key, "0xabc");
    }

    #[test]
    fn debug_output_redacts_private_key() {
        let config = Config {
            wallet_private_key: Some("0xsecret".to_string()),
            ..Config::default()
        };
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("0xsecret"));
        assert!(rendered.contains("<redacted>"));
    }
}
