//! named credential profiles
//!
//! profiles live in a toml file, by default `~/.config/arize/profiles.toml`:
//!
//! ```toml
//! default_profile = "prod"
//!
//! [profiles.prod]
//! api_key = "..."
//! organization = "acme"
//! space = "fraud"
//! ```
//!
//! path priority: explicit path, then `ARIZE_CONFIG`, then the default.

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// profile used when none is selected and the store names no default
pub const DEFAULT_PROFILE: &str = "default";

pub const CONFIG_ENV: &str = "ARIZE_CONFIG";
pub const PROFILE_ENV: &str = "ARIZE_PROFILE";
pub const API_KEY_ENV: &str = "ARIZE_API_KEY";
pub const ORGANIZATION_ENV: &str = "ARIZE_ORGANIZATION";
pub const SPACE_ENV: &str = "ARIZE_SPACE";
pub const BASE_URL_ENV: &str = "ARIZE_BASE_URL";

/// credentials and location of one space
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Profile {
    pub api_key: String,
    pub organization: String,
    pub space: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl Profile {
    pub fn new(
        api_key: impl Into<String>,
        organization: impl Into<String>,
        space: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            organization: organization.into(),
            space: space.into(),
            base_url: None,
        }
    }

    /// override fields from `ARIZE_*` environment variables
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// override fields from any variable source; empty values are ignored
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        if let Some(api_key) = get(API_KEY_ENV) {
            self.api_key = api_key;
        }
        if let Some(organization) = get(ORGANIZATION_ENV) {
            self.organization = organization;
        }
        if let Some(space) = get(SPACE_ENV) {
            self.space = space;
        }
        if let Some(base_url) = get(BASE_URL_ENV) {
            self.base_url = Some(base_url);
        }
        self
    }

    /// a profile built only from environment variables, if the api key,
    /// organization and space are all set
    pub fn from_env() -> Option<Self> {
        let profile = Profile::new("", "", "").with_env_overrides();
        let complete = !profile.api_key.is_empty()
            && !profile.organization.is_empty()
            && !profile.space.is_empty();
        complete.then_some(profile)
    }

    pub fn to_config(&self) -> ClientConfig {
        let config = ClientConfig::new(&self.api_key, &self.organization, &self.space);
        match &self.base_url {
            Some(base_url) => config.with_base_url(base_url),
            None => config,
        }
    }

    /// api key with everything but the last four characters hidden
    pub fn redacted_api_key(&self) -> String {
        let chars: Vec<char> = self.api_key.chars().collect();
        if chars.len() <= 4 {
            return "*".repeat(chars.len());
        }
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}{}", "*".repeat(chars.len() - 4), tail)
    }
}

impl std::fmt::Debug for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Profile")
            .field("api_key", &"<redacted>")
            .field("organization", &self.organization)
            .field("space", &self.space)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// all profiles in one file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileStore {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_profile: Option<String>,
    pub profiles: BTreeMap<String, Profile>,
}

impl ProfileStore {
    /// `dirs::config_dir()/arize/profiles.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("arize").join("profiles.toml"))
    }

    /// explicit path, then `ARIZE_CONFIG`, then the default path
    pub fn resolve_path(explicit: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = explicit {
            return Ok(path.to_path_buf());
        }
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            if !path.is_empty() {
                return Ok(PathBuf::from(path));
            }
        }
        Self::default_path()
            .ok_or_else(|| Error::Config("could not determine a config directory".to_string()))
    }

    /// load the store; a missing file is an empty store
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no profile file, starting empty");
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    /// write the store, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        tracing::debug!(path = %path.display(), profiles = self.profiles.len(), "saved profiles");
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Profile> {
        self.profiles.get(name)
    }

    /// insert or replace a profile; the first profile becomes the default
    pub fn upsert(&mut self, name: impl Into<String>, profile: Profile) {
        let name = name.into();
        if self.default_profile.is_none() {
            self.default_profile = Some(name.clone());
        }
        self.profiles.insert(name, profile);
    }

    pub fn set_default(&mut self, name: &str) -> Result<()> {
        if !self.profiles.contains_key(name) {
            return Err(self.unknown(name));
        }
        self.default_profile = Some(name.to_string());
        Ok(())
    }

    /// name of the profile to use: requested, else the stored default,
    /// else `default`
    pub fn selected_name<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        requested
            .or(self.default_profile.as_deref())
            .unwrap_or(DEFAULT_PROFILE)
    }

    /// the selected profile with environment overrides applied
    ///
    /// when the store has no such profile but the environment carries full
    /// credentials, the environment alone is used.
    pub fn select(&self, requested: Option<&str>) -> Result<Profile> {
        let name = self.selected_name(requested);
        match self.get(name) {
            Some(profile) => Ok(profile.clone().with_env_overrides()),
            None => Profile::from_env().ok_or_else(|| self.unknown(name)),
        }
    }

    fn unknown(&self, name: &str) -> Error {
        let known: Vec<&str> = self.profiles.keys().map(String::as_str).collect();
        let hint = if known.is_empty() {
            "run `arize config init` first".to_string()
        } else {
            format!("known profiles: {}", known.join(", "))
        };
        Error::Config(format!("profile '{name}' not found; {hint}"))
    }
}
