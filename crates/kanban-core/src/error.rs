use thiserror::Error;

#[derive(Error, Debug)]
pub enum KanbanError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Internal error: {0}")]
    Internal(String),

    /// A remote call failed. `status` is `None` when no response was received.
    #[error("{}", format_remote(.status, .message))]
    Remote {
        status: Option<u16>,
        message: String,
    },
}

fn format_remote(status: &Option<u16>, message: &str) -> String {
    match status {
        Some(status) => format!("Remote error (HTTP {}): {}", status, message),
        None => format!("Remote error: {}", message),
    }
}

const NOT_FOUND_MARKERS: &[&str] = &["not found", "no query results"];

impl KanbanError {
    pub fn remote(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Remote {
            status,
            message: message.into(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Remote { status, .. } => *status,
            _ => None,
        }
    }

    /// Whether the error means the addressed entity no longer exists.
    ///
    /// Remote collaborators are inconsistent about how they report this, so a
    /// 404 status and a "not found"-style message are both accepted.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound(_) => true,
            Self::Remote { status, message } => {
                if *status == Some(404) {
                    return true;
                }
                let message = message.to_lowercase();
                NOT_FOUND_MARKERS.iter().any(|m| message.contains(m))
            }
            _ => false,
        }
    }
}
