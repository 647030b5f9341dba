pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use self::config::CliConfig;

pub use self::adapters::storage::LocalStorage;
pub use self::config::Settings;
pub use self::core::{
    engine::{RunSummary, TallyEngine},
    report::{JsonReporter, TextReporter},
};
pub use self::utils::error::{Result, TallyError};
