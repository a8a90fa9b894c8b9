//! Cart Error Taxonomy
//!
//! Every failure the sync layer can surface, kept distinguishable so callers
//! can pick between an inline message and a full panel resync.

/// Common result type for cart operations
pub type CartResult<T> = Result<T, CartError>;

/// Cart-level errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    /// Server answered with a non-2xx status
    Transport { status: u16 },
    /// 2xx response carrying `success: false`
    ServerRejected { message: String },
    /// Body could not be read as the expected shape
    MalformedResponse(String),
    /// The request never completed
    Network(String),
    /// Rejected locally before any request was made
    InvalidInput(String),
    /// Page configuration could not be used
    Config(String),
}

impl CartError {
    /// Text shown to the shopper in a toast.
    pub fn user_message(&self) -> String {
        match self {
            CartError::Transport { status } => format!("Error HTTP: {}", status),
            CartError::ServerRejected { message } if message.is_empty() => "Error del servidor".to_string(),
            CartError::ServerRejected { message } => message.clone(),
            CartError::MalformedResponse(_) => "Respuesta inválida del servidor".to_string(),
            CartError::Network(_) => "Error de conexión".to_string(),
            CartError::InvalidInput(msg) => msg.clone(),
            CartError::Config(_) => "Error de configuración".to_string(),
        }
    }
}

impl std::fmt::Display for CartError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CartError::Transport { status } => write!(f, "Transport error: HTTP {}", status),
            CartError::ServerRejected { message } => write!(f, "Server rejected: {}", message),
            CartError::MalformedResponse(msg) => write!(f, "Malformed response: {}", msg),
            CartError::Network(msg) => write!(f, "Network error: {}", msg),
            CartError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            CartError::Config(msg) => write!(f, "Config error: {}", msg),
        }
    }
}

impl std::error::Error for CartError {}
