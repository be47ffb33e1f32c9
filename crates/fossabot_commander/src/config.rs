use std::path::Path;

use anyhow::Context as _;

use crate::FOSSABOT_API_BASE_URL;

#[derive(Default, Clone, Debug, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct Config {
    pub api: Api,
    pub logging: Logging,
}

#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct Api {
    pub base_url: String,
}

impl Default for Api {
    fn default() -> Self {
        Self {
            base_url: FOSSABOT_API_BASE_URL.to_string(),
        }
    }
}

#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct Logging {
    pub enabled: bool,
    pub include_context: bool,
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            enabled: false,
            include_context: true,
        }
    }
}

impl Config {
    const BASE_URL_ENV: &'static str = "FOSSABOT_API_BASE_URL";

    pub fn load_from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read '{}'", path.display()))?;
        Self::from_str(&data)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(data: &str) -> anyhow::Result<Self> {
        toml::from_str(data).with_context(|| "cannot deserialize the config")
    }

    pub fn to_toml(&self) -> anyhow::Result<String> {
        toml::to_string_pretty(self).map_err(Into::into)
    }

    /// The configured base url, unless `FOSSABOT_API_BASE_URL` overrides it
    pub fn base_url(&self) -> String {
        std::env::var(Self::BASE_URL_ENV)
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| self.api.base_url.clone())
    }
}
