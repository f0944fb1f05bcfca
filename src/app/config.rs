use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub gateway_base_url: String,
    pub gateway_api_key: Option<String>,
    pub gateway_timeout_ms: u64,
    pub default_currency: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            gateway_base_url: env::var("PUSHINPAY_BASE_URL")
                .unwrap_or_else(|_| "https://api.pushinpay.com.br".to_string()),
            gateway_api_key: env::var("PUSHINPAY_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            gateway_timeout_ms: env::var("GATEWAY_TIMEOUT_MS")
                .unwrap_or_else(|_| "15000".to_string())
                .parse()
                .unwrap_or(15000),
            default_currency: env::var("DEFAULT_CURRENCY")
                .unwrap_or_else(|_| "BRL".to_string()),
        }
    }
}

#[cfg(test)]
pub mod tests {
    use super::Config;

    pub fn test_config() -> Config {
        Config {
            server_port: 0,
            gateway_base_url: "http://localhost:0".to_string(),
            gateway_api_key: Some("test-key".to_string()),
            gateway_timeout_ms: 1000,
            default_currency: "BRL".to_string(),
        }
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let key = Some("   ".to_string()).filter(|k: &String| !k.trim().is_empty());
        assert!(key.is_none());
    }
}
