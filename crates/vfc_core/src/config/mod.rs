//! Settings for the converter, stored as `.config/settings.toml`.
//!
//! ```no_run
//! use vfc_core::config::ConfigManager;
//!
//! let mut config = ConfigManager::new(".config/settings.toml");
//! config.load_or_create().unwrap();
//! println!("Encoder: {}", config.settings().tools.ffmpeg);
//! ```

mod manager;
mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult};
pub use settings::{EncodeSettings, LoggingSettings, PathSettings, Settings, ToolSettings};
