use std::fmt;

use crate::error::{MmaError, Result};

const ODDS_API_KEY_VAR: &str = "ODDS_API_KEY";

/// Access configuration for the odds API.
///
/// The key is read from the `ODDS_API_KEY` environment variable
/// (a `.env` file is honored). A missing key is fatal at startup.
#[derive(Clone)]
pub struct OddsConfig {
    pub api_key: String,
}

impl OddsConfig {
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        let api_key = std::env::var(ODDS_API_KEY_VAR)
            .map_err(|_| MmaError::MissingCredential(ODDS_API_KEY_VAR))?;
        if api_key.trim().is_empty() {
            return Err(MmaError::MissingCredential(ODDS_API_KEY_VAR));
        }
        Ok(Self { api_key })
    }
}

// Keep the key out of logs.
impl fmt::Debug for OddsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OddsConfig")
            .field("api_key", &"***")
            .finish()
    }
}
