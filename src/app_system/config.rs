use std::time::Duration;

use crate::app_system::{PortalError, Result};

#[derive(Debug, Clone)]
pub struct PortalConfig {
    /// Queue depth of each store's mailbox and change feed.
    pub mailbox_capacity: usize,
    pub officer_access_code: String,
    pub supplier_access_code: String,
    /// Page listing the weather bulletin PDFs. Unset disables the lookup.
    pub bulletin_url: Option<String>,
    pub http_timeout: Duration,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            mailbox_capacity: 64,
            officer_access_code: "officer".to_string(),
            supplier_access_code: "supplier".to_string(),
            bulletin_url: None,
            http_timeout: Duration::from_secs(15),
        }
    }
}

impl PortalConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let config = Self::from_lookup(|key| std::env::var(key).ok())?;
        tracing::info!(
            mailbox_capacity = config.mailbox_capacity,
            bulletin_url = ?config.bulletin_url,
            "Portal configuration loaded"
        );
        Ok(config)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let mailbox_capacity = match lookup("PORTAL_MAILBOX_CAPACITY") {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(0) => return Err(PortalError::Config("PORTAL_MAILBOX_CAPACITY must be positive".to_string())),
                Ok(n) => n,
                Err(e) => return Err(PortalError::Config(format!("Invalid PORTAL_MAILBOX_CAPACITY: {}", e))),
            },
            None => defaults.mailbox_capacity,
        };

        let http_timeout = match lookup("HTTP_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(0) => return Err(PortalError::Config("HTTP_TIMEOUT_SECS must be positive".to_string())),
                Ok(secs) => Duration::from_secs(secs),
                Err(e) => return Err(PortalError::Config(format!("Invalid HTTP_TIMEOUT_SECS: {}", e))),
            },
            None => defaults.http_timeout,
        };

        Ok(Self {
            mailbox_capacity,
            officer_access_code: lookup("PORTAL_OFFICER_CODE").unwrap_or(defaults.officer_access_code),
            supplier_access_code: lookup("PORTAL_SUPPLIER_CODE").unwrap_or(defaults.supplier_access_code),
            bulletin_url: lookup("WEATHER_BULLETIN_URL").filter(|url| !url.trim().is_empty()),
            http_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = PortalConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.mailbox_capacity, 64);
        assert_eq!(config.officer_access_code, "officer");
        assert_eq!(config.bulletin_url, None);
        assert_eq!(config.http_timeout, Duration::from_secs(15));
    }

    #[test]
    fn test_values_are_read_and_parsed() {
        let config = PortalConfig::from_lookup(lookup(&[
            ("PORTAL_MAILBOX_CAPACITY", "8"),
            ("PORTAL_SUPPLIER_CODE", "agro-dealer"),
            ("WEATHER_BULLETIN_URL", "https://meteo.example/bulletins"),
            ("HTTP_TIMEOUT_SECS", "3"),
        ]))
        .unwrap();
        assert_eq!(config.mailbox_capacity, 8);
        assert_eq!(config.supplier_access_code, "agro-dealer");
        assert_eq!(config.bulletin_url.as_deref(), Some("https://meteo.example/bulletins"));
        assert_eq!(config.http_timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_bad_numbers_are_config_errors() {
        let err = PortalConfig::from_lookup(lookup(&[("PORTAL_MAILBOX_CAPACITY", "lots")])).unwrap_err();
        assert!(matches!(err, PortalError::Config(_)));
        let err = PortalConfig::from_lookup(lookup(&[("PORTAL_MAILBOX_CAPACITY", "0")])).unwrap_err();
        assert!(matches!(err, PortalError::Config(_)));
        let err = PortalConfig::from_lookup(lookup(&[("HTTP_TIMEOUT_SECS", "-1")])).unwrap_err();
        assert!(matches!(err, PortalError::Config(_)));
        let err = PortalConfig::from_lookup(lookup(&[("HTTP_TIMEOUT_SECS", "0")])).unwrap_err();
        assert!(matches!(err, PortalError::Config(_)));
    }
}
