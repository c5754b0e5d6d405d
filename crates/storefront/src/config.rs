//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; the defaults reproduce the stock storefront
//! page set and tax rate.
//!
//! - `SMARTBITE_TAX_RATE` - Tax rate applied to the cart subtotal (default: 0.014)
//! - `SMARTBITE_MATCH_MODE` - Protected-page matching, `exact` or `substring`
//!   (default: exact)
//! - `SMARTBITE_LOGIN_REDIRECT_DELAY_MS` - Delay before the post-login
//!   redirect (default: 1000)
//! - `SMARTBITE_STORE_PATH` - File path for the persistent store snapshot
//!   (default: unset, in-memory store)

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use rust_decimal::Decimal;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// How a path is tested against the protected-page list.
///
/// The stock behavior is `Exact` (the path must end with the protected page
/// path). `Substring` reproduces containment matching, where any URL with
/// `cart.html` anywhere in it counts as protected; that is opt-in because it
/// over-matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Current path must end with the protected page path.
    #[default]
    Exact,
    /// Current path must contain the protected page path anywhere.
    Substring,
}

impl FromStr for MatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "exact" => Ok(Self::Exact),
            "substring" => Ok(Self::Substring),
            other => Err(format!("unknown match mode '{other}'")),
        }
    }
}

/// Navigable page paths referenced by the storefront.
#[derive(Debug, Clone)]
pub struct PageConfig {
    /// Home page (logout destination).
    pub home: String,
    /// Login page.
    pub login: String,
    /// Menu page (default post-login destination).
    pub menu: String,
    /// Cart page (protected).
    pub cart: String,
    /// Orders page (protected).
    pub orders: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            home: "index.html".to_owned(),
            login: "login.html".to_owned(),
            menu: "menu.html".to_owned(),
            cart: "cart.html".to_owned(),
            orders: "orders.html".to_owned(),
        }
    }
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Page paths used for gating and navigation.
    pub pages: PageConfig,
    /// Pages that require authentication.
    pub protected: Vec<String>,
    /// How paths are matched against the protected list.
    pub match_mode: MatchMode,
    /// Tax rate applied to the cart subtotal.
    pub tax_rate: Decimal,
    /// Delay before the post-login redirect is applied.
    pub login_redirect_delay: Duration,
    /// File path for the persistent store snapshot, if any.
    pub store_path: Option<PathBuf>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        let pages = PageConfig::default();
        let protected = vec![pages.cart.clone(), pages.orders.clone()];
        Self {
            pages,
            protected,
            match_mode: MatchMode::default(),
            tax_rate: default_tax_rate(),
            login_redirect_delay: Duration::from_millis(1000),
            store_path: None,
        }
    }
}

/// Default tax rate of 1.4%.
const fn default_tax_rate() -> Decimal {
    Decimal::from_parts(14, 0, 0, false, 3)
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let mut config = Self::default();

        if let Some(raw) = get_optional_env("SMARTBITE_TAX_RATE") {
            config.tax_rate = parse_env("SMARTBITE_TAX_RATE", &raw)?;
        }
        if let Some(raw) = get_optional_env("SMARTBITE_MATCH_MODE") {
            config.match_mode = raw.parse().map_err(|e: String| {
                ConfigError::InvalidEnvVar("SMARTBITE_MATCH_MODE".to_owned(), e)
            })?;
        }
        if let Some(raw) = get_optional_env("SMARTBITE_LOGIN_REDIRECT_DELAY_MS") {
            let millis: u64 = parse_env("SMARTBITE_LOGIN_REDIRECT_DELAY_MS", &raw)?;
            config.login_redirect_delay = Duration::from_millis(millis);
        }
        if let Some(raw) = get_optional_env("SMARTBITE_STORE_PATH") {
            config.store_path = Some(PathBuf::from(raw));
        }

        Ok(config)
    }

    /// Whether the given path is the login page.
    ///
    /// Matching is case-insensitive and suffix-based, so both `login.html`
    /// and `/app/Login.html` count.
    #[must_use]
    pub fn is_login_page(&self, path: &str) -> bool {
        let path = path.to_ascii_lowercase();
        let login = self.pages.login.to_ascii_lowercase();
        path.ends_with(&login)
    }

    /// Whether the given path requires authentication.
    #[must_use]
    pub fn is_protected(&self, path: &str) -> bool {
        let path = path.to_ascii_lowercase();
        self.protected.iter().any(|page| {
            let page = page.to_ascii_lowercase();
            match self.match_mode {
                MatchMode::Exact => path.ends_with(&page),
                MatchMode::Substring => path.contains(&page),
            }
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Parse an environment variable value, mapping failures to `ConfigError`.
fn parse_env<T: FromStr>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    raw.parse()
        .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_owned(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tax_rate_is_1_4_percent() {
        let config = StorefrontConfig::default();
        assert_eq!(config.tax_rate, "0.014".parse().unwrap());
    }

    #[test]
    fn test_default_protected_pages() {
        let config = StorefrontConfig::default();
        assert_eq!(config.protected, vec!["cart.html", "orders.html"]);
    }

    #[test]
    fn test_match_mode_from_str() {
        assert_eq!("exact".parse::<MatchMode>().unwrap(), MatchMode::Exact);
        assert_eq!(
            "Substring".parse::<MatchMode>().unwrap(),
            MatchMode::Substring
        );
        assert!("fuzzy".parse::<MatchMode>().is_err());
    }

    #[test]
    fn test_is_login_page_case_insensitive() {
        let config = StorefrontConfig::default();
        assert!(config.is_login_page("login.html"));
        assert!(config.is_login_page("/app/Login.html"));
        assert!(!config.is_login_page("menu.html"));
    }

    #[test]
    fn test_is_protected_exact() {
        let config = StorefrontConfig::default();
        assert!(config.is_protected("/shop/cart.html"));
        assert!(config.is_protected("orders.html"));
        // Exact mode does not over-match paths that merely contain the page
        assert!(!config.is_protected("/cart.html.bak"));
        assert!(!config.is_protected("menu.html"));
    }

    #[test]
    fn test_is_protected_substring() {
        let config = StorefrontConfig {
            match_mode: MatchMode::Substring,
            ..StorefrontConfig::default()
        };
        assert!(config.is_protected("/cart.html?ref=home"));
        assert!(config.is_protected("/cart.html.bak"));
        assert!(!config.is_protected("menu.html"));
    }

    #[test]
    fn test_parse_env_invalid() {
        let result: Result<u64, ConfigError> = parse_env("SMARTBITE_TEST", "not-a-number");
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }
}
