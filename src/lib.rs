pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::adapters::google_chat::GoogleChatClient;
pub use crate::config::{AdapterConfig, CliConfig};
pub use crate::core::{pipeline::AlertPipeline, relay::RelayEngine};
pub use crate::utils::error::{AdapterError, Result};
