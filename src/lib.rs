pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{CliConfig, Command};
pub use config::toml_config::KitConfig;

pub use core::archive::ZipOptions;
pub use core::digest::DigestAlgorithm;
pub use core::progression::Progression;
pub use core::sequence::SequenceExt;
pub use utils::error::{KitError, Result};
