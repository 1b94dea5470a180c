//! Client configuration.
//!
//! The SPA is a static bundle, so configuration is fixed at build time from
//! environment variables and falls back to a local development backend.

use std::time::Duration;

use log::LevelFilter;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";

/// Storage key of the persisted cart.
pub const CART_STORAGE_KEY: &str = "cart-storage";
/// Storage key of the persisted user and token.
pub const USER_STORAGE_KEY: &str = "user-store";
/// Storage key of the last delivery location.
pub const LOCATION_STORAGE_KEY: &str = "location-storage";
/// Prefix of the per-order delivery estimate entries.
pub const DELIVERY_TIME_KEY_PREFIX: &str = "deliveryTime_";
/// Keys written by older builds, migrated into [`USER_STORAGE_KEY`].
pub const LEGACY_TOKEN_KEY: &str = "token";
pub const LEGACY_USER_KEY: &str = "user";

/// Where deliveries start from, as (lat, lon).
pub const RESTAURANT_COORDINATES: (f64, f64) = (5.677_069_742_918_279, -0.165_073_759_659_599_75);
/// Driving-matrix endpoint used for delivery estimates.
pub const ROUTING_MATRIX_URL: &str = "https://us1.locationiq.com/v1/matrix/driving";

#[derive(Debug, Clone, PartialEq)]
pub struct PollIntervals {
    pub customer_order: Duration,
    pub customer_order_list: Duration,
    pub admin_orders: Duration,
    pub rider_dashboard: Duration,
    pub admin_reservations: Duration,
}

impl Default for PollIntervals {
    fn default() -> Self {
        Self {
            customer_order: Duration::from_secs(10),
            customer_order_list: Duration::from_secs(15),
            admin_orders: Duration::from_secs(5),
            rider_dashboard: Duration::from_secs(5),
            admin_reservations: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub poll: PollIntervals,
    pub log_level: LevelFilter,
    /// Access key of the routing service. Without one no delivery
    /// estimates are computed.
    pub routing_key: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            poll: PollIntervals::default(),
            log_level: LevelFilter::Info,
            routing_key: None,
        }
    }
}

impl ClientConfig {
    /// Reads `RESTAURANT_API_URL`, `RESTAURANT_LOG_LEVEL` and
    /// `RESTAURANT_ROUTING_KEY` as they were at compile time.
    pub fn from_build_env() -> Self {
        let mut config = Self::from_values(
            option_env!("RESTAURANT_API_URL"),
            option_env!("RESTAURANT_LOG_LEVEL"),
        );
        config.routing_key = option_env!("RESTAURANT_ROUTING_KEY")
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string);
        config
    }

    /// Builds a configuration from optional raw values, ignoring blank or
    /// unparsable ones.
    pub fn from_values(api_url: Option<&str>, log_level: Option<&str>) -> Self {
        let mut config = Self::default();
        if let Some(url) = api_url.map(str::trim).filter(|u| !u.is_empty()) {
            config.api_base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(level) = log_level.and_then(|l| l.trim().parse::<LevelFilter>().ok()) {
            config.log_level = level;
        }
        config
    }

    /// Absolute URL of an API path. One leading `/` on `path` is ignored.
    pub fn api_url(&self, path: &str) -> String {
        let clean = path.strip_prefix('/').unwrap_or(path);
        format!("{}/{}", self.api_base_url, clean)
    }

    /// Driving-matrix URL between the restaurant and `(lat, lon)`, if a
    /// routing key is configured.
    pub fn routing_url(&self, destination: (f64, f64)) -> Option<String> {
        let key = self.routing_key.as_deref()?;
        let (lat, lon) = RESTAURANT_COORDINATES;
        Some(format!(
            "{ROUTING_MATRIX_URL}/{lon},{lat};{},{}?key={key}",
            destination.1, destination.0
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_url_joins_without_double_slash() {
        let config = ClientConfig::default();
        assert_eq!(config.api_url("/menu"), "http://localhost:3000/menu");
        assert_eq!(config.api_url("admin/orders"), "http://localhost:3000/admin/orders");
    }

    #[test]
    fn from_values_applies_overrides_and_ignores_garbage() {
        let config = ClientConfig::from_values(Some("https://api.example.com/"), Some("debug"));
        assert_eq!(config.api_base_url, "https://api.example.com");
        assert_eq!(config.log_level, LevelFilter::Debug);

        let config = ClientConfig::from_values(Some("  "), Some("loud"));
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn routing_url_needs_a_key() {
        let mut config = ClientConfig::default();
        assert_eq!(config.routing_url((5.6, -0.2)), None);

        config.routing_key = Some("k".into());
        let url = config.routing_url((5.6, -0.2)).unwrap();
        assert!(url.starts_with(ROUTING_MATRIX_URL));
        assert!(url.ends_with(";-0.2,5.6?key=k"));
    }
}
