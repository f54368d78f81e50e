pub mod format;
pub mod pipeline;
pub mod relay;

pub use crate::domain::model::{Alert, AlertmanagerPayload, GoogleChatMessage};
pub use crate::domain::ports::{ChatSink, ConfigProvider, Pipeline};
pub use crate::utils::error::Result;
