use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExporterConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// Mount point sampled by the storage provider.
    #[serde(default = "default_storage_path")]
    pub storage_path: String,
}

fn default_port() -> u16 {
    9100
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_storage_path() -> String {
    "/data".to_string()
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            bind_addr: default_bind_addr(),
            storage_path: default_storage_path(),
        }
    }
}

impl ExporterConfig {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}
