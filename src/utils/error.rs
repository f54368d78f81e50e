use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdapterError {
    #[error("Invalid payload: {message}")]
    InvalidPayload { message: String },

    #[error("Forwarding to Google Chat failed: {0}")]
    Forward(#[from] reqwest::Error),

    #[error("Google Chat webhook failed with status: {status}")]
    WebhookStatus { status: u16 },

    #[error("Method not allowed: {method}")]
    MethodNotAllowed { method: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl AdapterError {
    /// HTTP status reported to the caller that posted the alert.
    pub fn status_code(&self) -> u16 {
        match self {
            AdapterError::InvalidPayload { .. } => 400,
            AdapterError::MethodNotAllowed { .. } => 405,
            _ => 500,
        }
    }

    /// Short response body text. Internal details stay in the logs.
    pub fn public_message(&self) -> &'static str {
        match self {
            AdapterError::InvalidPayload { .. } => "Invalid payload",
            AdapterError::MethodNotAllowed { .. } => "Method not allowed",
            AdapterError::Forward(_) => "Error forwarding alert",
            AdapterError::WebhookStatus { .. } => "Webhook failed",
            _ => "Internal server error",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            AdapterError::MissingConfigError { field } if field == "webhook_url" => {
                "Error: GOOGLE_CHAT_WEBHOOK_URL environment variable is not set.".to_string()
            }
            AdapterError::MissingConfigError { field } => {
                format!("Required setting '{}' is not set.", field)
            }
            AdapterError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            AdapterError::MissingConfigError { .. } => {
                "Set GOOGLE_CHAT_WEBHOOK_URL or pass --webhook-url"
            }
            AdapterError::InvalidConfigValueError { .. } | AdapterError::ConfigError { .. } => {
                "Check the command line flags, environment and --config file"
            }
            AdapterError::Io(_) => "Check that the listen address is free and the config file is readable",
            AdapterError::Forward(_) | AdapterError::WebhookStatus { .. } => {
                "Check network access to chat.googleapis.com and that the webhook is still active"
            }
            _ => "Check the logs for details",
        }
    }
}

pub type Result<T> = std::result::Result<T, AdapterError>;
