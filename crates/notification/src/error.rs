use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MailError {
    #[error("invalid address: {0}")]
    Address(String),

    #[error("failed to build message: {0}")]
    Build(String),

    #[error("transport error: {message}")]
    Transport { message: String, permanent: bool },
}

impl MailError {
    pub fn transient(message: impl Into<String>) -> Self {
        MailError::Transport {
            message: message.into(),
            permanent: false,
        }
    }

    pub fn permanent(message: impl Into<String>) -> Self {
        MailError::Transport {
            message: message.into(),
            permanent: true,
        }
    }

    /// Only transport failures the server did not reject outright are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            MailError::Transport {
                permanent: false,
                ..
            }
        )
    }
}

impl From<lettre::address::AddressError> for MailError {
    fn from(err: lettre::address::AddressError) -> Self {
        MailError::Address(err.to_string())
    }
}

impl From<lettre::error::Error> for MailError {
    fn from(err: lettre::error::Error) -> Self {
        MailError::Build(err.to_string())
    }
}

impl From<lettre::transport::smtp::Error> for MailError {
    fn from(err: lettre::transport::smtp::Error) -> Self {
        MailError::Transport {
            message: err.to_string(),
            permanent: err.is_permanent(),
        }
    }
}
