use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub(crate) struct Config {
    /// Subject keywords combined with boolean OR in the message query
    #[serde(default = "default_subject_keywords")]
    pub(crate) subject_keywords: Vec<String>,

    /// Path of the output sheet
    #[serde(default = "default_sheet")]
    pub(crate) sheet: String,
}

fn default_subject_keywords() -> Vec<String> {
    vec!["Transaction alert".to_string(), "Transaction Alert".to_string()]
}

fn default_sheet() -> String {
    "transactions.csv".to_string()
}

impl Config {
    pub(crate) fn default_config() -> Config {
        Config {
            subject_keywords: default_subject_keywords(),
            sheet: default_sheet(),
        }
    }

    pub(crate) fn load_from_file(file_path: &str) -> anyhow::Result<Config> {
        let path = Path::new(file_path);
        if path.exists() && path.is_file() {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Unable to read config file {}", file_path))?;
            let config: Config = toml::from_str(&content)
                .with_context(|| format!("Invalid config file {}", file_path))?;
            Ok(config)
        } else {
            Ok(Config::default_config())
        }
    }
}
