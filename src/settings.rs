// src/settings.rs

use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
};

use clap::Parser;
use config::{builder::DefaultState, ConfigBuilder, ConfigError, File};
use serde::{Deserialize, Serialize};

const DEFAULT_ADDR: &str = "127.0.0.1:8000";
const DEFAULT_DATA_PATH: &str = "data/AI_DATASET_CLEANED.csv";

#[derive(Parser, Debug)]
#[command(version)]
pub struct Args {
    /// Path to the local configuration TOML file.
    #[arg(short, value_name = "CONFIG_PATH")]
    pub config: Option<PathBuf>,

    /// Path to the job postings CSV file. Overrides `data.path`.
    #[arg(long, value_name = "CSV_PATH")]
    pub data: Option<PathBuf>,

    /// Path to the certificate file.
    #[arg(long, value_name = "CERT_PATH", requires = "key")]
    pub cert: Option<PathBuf>,

    /// Path to the key file.
    #[arg(long, value_name = "KEY_PATH", requires = "cert")]
    pub key: Option<PathBuf>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Web {
    #[serde(deserialize_with = "deserialize_socket_addr")]
    pub address: SocketAddr,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Data {
    pub path: PathBuf,
}

/// Preferred values used to seed the initial filter selection.
///
/// Each entry is matched case-insensitively against the enumerated options,
/// either exactly or as a substring of the option.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultPreferences {
    pub job_titles: Vec<String>,
    pub locations: Vec<String>,
    pub experience_levels: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Settings {
    pub web: Web,
    pub data: Data,
    pub defaults: DefaultPreferences,
}

impl Settings {
    /// Load settings from the given TOML file, with sane defaults.
    ///
    /// Without a file, only the built-in defaults apply.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::<DefaultState>::default()
            .set_default("web.address", DEFAULT_ADDR)?
            .set_default("data.path", DEFAULT_DATA_PATH)?
            .set_default(
                "defaults.job_titles",
                vec!["Data Scientist", "Ai Research Scientist"],
            )?
            .set_default("defaults.locations", vec!["germany"])?
            .set_default("defaults.experience_levels", vec!["mi"])?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        builder.build()?.try_deserialize()
    }
}

fn deserialize_socket_addr<'de, D>(deserializer: D) -> Result<SocketAddr, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    s.parse().map_err(serde::de::Error::custom)
}
