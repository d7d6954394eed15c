use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub mod network;
pub mod ui;

use self::network::NetworkConfig;
use self::ui::UiConfig;

pub use network::ConfigError;

#[derive(Serialize, Deserialize)]
pub struct Config {
    pub network: NetworkConfig,
    pub ui: UiConfig,

    /// Directory for finalized-text transcript files, off when unset
    pub transcript_dir: Option<PathBuf>,
}

impl Config {
    pub fn new() -> Self {
        let transcript_dir = env::var("KAGAMI_TRANSCRIPT_DIR").ok().map(PathBuf::from);

        Config {
            network: NetworkConfig::new(),
            ui: UiConfig::new(),
            transcript_dir,
        }
    }
}
