use fitnest_types::TextError;

/// A single rejected field on the vital-sign entry form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, thiserror::Error)]
pub enum VitalsError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("Please enter valid values for all fields ({})", join_field_errors(.0))]
    InvalidForm(Vec<FieldError>),
    #[error("invalid user id: {0}")]
    InvalidUserId(#[from] TextError),
    #[error("failed to create storage directory: {0}")]
    StorageDirCreation(std::io::Error),
    #[error("failed to write vital signs file: {0}")]
    FileWrite(std::io::Error),
    #[error("failed to read vital signs file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to serialize vital signs: {0}")]
    Serialization(serde_json::Error),
    #[error("vital signs store lock poisoned")]
    LockPoisoned,
}

impl VitalsError {
    /// True for errors caused by the caller's input rather than by storage.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            VitalsError::InvalidInput(_) | VitalsError::InvalidForm(_) | VitalsError::InvalidUserId(_)
        )
    }
}

pub type VitalsResult<T> = std::result::Result<T, VitalsError>;
