use thiserror::Error;

#[derive(Error, Debug)]
pub enum KitError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid argument `{field}` = {value:?}: {reason}")]
    InvalidArgument {
        field: String,
        value: String,
        reason: String,
    },

    #[error("{kind} `{name}` not found in {owner}")]
    NotFound {
        kind: String,
        name: String,
        owner: String,
    },

    #[error("Cannot parse {input:?}: {message}")]
    Parse { input: String, message: String },

    #[error("Crypto error: {message}")]
    Crypto { message: String },

    #[error("Operation canceled: {operation}")]
    Canceled { operation: String },

    #[error("Configuration error in `{field}`: {message}")]
    Config { field: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl KitError {
    pub fn invalid_argument(
        field: impl Into<String>,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        KitError::InvalidArgument {
            field: field.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn parse(input: impl Into<String>, message: impl ToString) -> Self {
        KitError::Parse {
            input: input.into(),
            message: message.to_string(),
        }
    }

    pub fn crypto(message: impl ToString) -> Self {
        KitError::Crypto {
            message: message.to_string(),
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            KitError::Canceled { .. } => ErrorSeverity::Low,
            KitError::InvalidArgument { .. }
            | KitError::Parse { .. }
            | KitError::NotFound { .. }
            | KitError::Config { .. } => ErrorSeverity::Medium,
            KitError::ZipError(_) | KitError::Crypto { .. } => ErrorSeverity::High,
            KitError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            KitError::IoError(e) => format!("File system operation failed: {}", e),
            KitError::ZipError(e) => format!("The archive could not be processed: {}", e),
            KitError::Canceled { operation } => format!("{} was canceled", operation),
            KitError::Config { field, message } => {
                format!("Check the configuration value `{}`: {}", field, message)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, KitError>;
