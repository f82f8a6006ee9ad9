use std::env;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub insight: InsightConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsightConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let port = non_empty("PORT")
            .and_then(|value| value.trim().parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let api_key = non_empty("API_KEY").or_else(|| non_empty("GEMINI_API_KEY"));
        let model = non_empty("INSIGHT_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let endpoint = non_empty("INSIGHT_ENDPOINT")
            .map(|value| value.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        Self {
            port,
            insight: InsightConfig {
                api_key,
                model,
                endpoint,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let config = config_from(&[]);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.insight, InsightConfig::default());
    }

    #[test]
    fn api_key_falls_back_and_ignores_blanks() {
        let config = config_from(&[("API_KEY", "  "), ("GEMINI_API_KEY", "secret")]);
        assert_eq!(config.insight.api_key.as_deref(), Some("secret"));

        let config = config_from(&[("API_KEY", "primary"), ("GEMINI_API_KEY", "secret")]);
        assert_eq!(config.insight.api_key.as_deref(), Some("primary"));
    }

    #[test]
    fn invalid_port_uses_default() {
        assert_eq!(config_from(&[("PORT", "http")]).port, DEFAULT_PORT);
        assert_eq!(config_from(&[("PORT", "3000")]).port, 3000);
    }

    #[test]
    fn endpoint_drops_trailing_slash() {
        let config = config_from(&[("INSIGHT_ENDPOINT", "http://127.0.0.1:9000/")]);
        assert_eq!(config.insight.endpoint, "http://127.0.0.1:9000");
    }
}
