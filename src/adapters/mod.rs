// Adapters layer: concrete implementations for external systems (HTTP listener, Google Chat).

pub mod google_chat;
pub mod http;
