use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("duplicate field name in snapshot: {0}")]
    DuplicateFieldName(String),
    #[error("invalid width {width} for field {name}")]
    InvalidWidth { name: String, width: f64 },
    #[error("edit script references unknown field: {0}")]
    UnknownField(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
