pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::config::{cli::LocalStorage, CliConfig};
pub use crate::core::classify::RuleSet;
pub use crate::core::{engine::FilterEngine, pipeline::SievePipeline, verify::SystemResolver};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Resolver, Storage};
pub use crate::utils::error::{Result, SiftError};
