use crate::error::ConfigError;
use crate::upload::FilePolicy;

pub const API_URL_VAR: &str = "UPLOADER_API_URL";
pub const MAX_FILE_SIZE_VAR: &str = "UPLOADER_MAX_FILE_SIZE";
pub const ACCEPTED_TYPES_VAR: &str = "UPLOADER_ACCEPTED_TYPES";

pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024;
pub const DEFAULT_ACCEPTED_TYPE: &str = "image/png";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub max_file_size: u64,
    pub accepted_types: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds the config from an arbitrary variable source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|value| !value.trim().is_empty());

        let api_url = get(API_URL_VAR)
            .map(|url| url.trim().to_string())
            .ok_or(ConfigError::Missing(API_URL_VAR))?;

        let max_file_size = match get(MAX_FILE_SIZE_VAR) {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::Invalid {
                    var: MAX_FILE_SIZE_VAR,
                    value,
                })?,
            None => DEFAULT_MAX_FILE_SIZE,
        };

        let accepted_types = match get(ACCEPTED_TYPES_VAR) {
            Some(value) => value
                .split(',')
                .map(|ty| ty.trim().to_lowercase())
                .filter(|ty| !ty.is_empty())
                .collect(),
            None => vec![DEFAULT_ACCEPTED_TYPE.to_string()],
        };

        Ok(Self {
            api_url,
            max_file_size,
            accepted_types,
        })
    }

    pub fn file_policy(&self) -> FilePolicy {
        FilePolicy {
            max_file_size: self.max_file_size,
            accepted_types: self.accepted_types.clone(),
        }
    }
}
