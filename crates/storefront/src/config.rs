//! Store configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `STORE_CATALOG_URL` - Base URL serving `products.json`, `categories.json`
//!   and `reviews.json`. Takes precedence over `STORE_CATALOG_DIR`.
//! - `STORE_CATALOG_DIR` - Directory holding the catalog documents (default: data)
//! - `STORE_STATE_DIR` - Directory for persisted state (default: .sportswear-store)
//! - `STORE_STORAGE_KEY` - Namespace key for persisted state (default: sportswear-store)
//! - `GEMINI_API_KEY` - API key for the support chat (chat disabled when unset)
//! - `GEMINI_MODEL` - Chat model name (default: gemini-pro)

use std::collections::HashMap;
use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

use crate::catalog::CatalogSource;
use crate::persistence::DEFAULT_STORAGE_KEY;

const MIN_API_KEY_LENGTH: usize = 20;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

pub const DEFAULT_CATALOG_DIR: &str = "data";
pub const DEFAULT_STATE_DIR: &str = ".sportswear-store";
pub const DEFAULT_CHAT_MODEL: &str = "gemini-pro";

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Store configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Where catalog documents come from
    pub catalog: CatalogSource,
    /// Directory for the file-backed state storage
    pub state_dir: PathBuf,
    /// Namespace key for the persisted snapshot
    pub storage_key: String,
    /// Support chat settings, present when an API key is configured
    pub chat: Option<ChatConfig>,
}

/// Chat-completion service configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct ChatConfig {
    pub api_key: SecretString,
    pub model: String,
}

impl std::fmt::Debug for ChatConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .finish()
    }
}

impl StoreConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is malformed or the API key
    /// fails validation (placeholder detection, length, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same as [`StoreConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env(lookup);

        let catalog = match env.optional("STORE_CATALOG_URL") {
            Some(raw) => CatalogSource::http(parse_base_url(&raw)?),
            None => CatalogSource::Directory(PathBuf::from(
                env.or_default("STORE_CATALOG_DIR", DEFAULT_CATALOG_DIR),
            )),
        };

        let storage_key = env.or_default("STORE_STORAGE_KEY", DEFAULT_STORAGE_KEY);
        if storage_key.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "STORE_STORAGE_KEY".to_string(),
                "must not be empty".to_string(),
            ));
        }

        let chat = match env.optional("GEMINI_API_KEY") {
            Some(key) => {
                validate_api_key(&key, "GEMINI_API_KEY")?;
                Some(ChatConfig {
                    api_key: SecretString::from(key),
                    model: env.or_default("GEMINI_MODEL", DEFAULT_CHAT_MODEL),
                })
            }
            None => None,
        };

        Ok(Self {
            catalog,
            state_dir: PathBuf::from(env.or_default("STORE_STATE_DIR", DEFAULT_STATE_DIR)),
            storage_key,
            chat,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Env<F>(F);

impl<F: Fn(&str) -> Option<String>> Env<F> {
    /// Get an optional variable; blank values count as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw)
        .map_err(|e| ConfigError::InvalidEnvVar("STORE_CATALOG_URL".to_string(), e.to_string()))
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.chars().count() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)]
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that an API key is long enough, not a placeholder, and has
/// sufficient entropy.
fn validate_api_key(key: &str, var_name: &str) -> Result<(), ConfigError> {
    if key.len() < MIN_API_KEY_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "must be at least {MIN_API_KEY_LENGTH} characters (got {})",
                key.len()
            ),
        ));
    }

    let lower = key.to_lowercase();
    if let Some(pattern) = PLACEHOLDER_PATTERNS.iter().find(|p| lower.contains(**p)) {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!("appears to be a placeholder (contains '{pattern}')"),
        ));
    }

    let entropy = shannon_entropy(key);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1})"
            ),
        ));
    }

    Ok(())
}
