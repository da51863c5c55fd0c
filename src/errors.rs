use thiserror::Error;

/// Errors that can arise while applying gilded key storage to the host tables.
///
/// None of these cross the database-load boundary: the loader turns them into
/// warnings and moves on to the next case or trade.
#[derive(Debug, Error)]
pub enum ModError {
    /// Wrapper around IO errors (reading or writing table dumps and profiles).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapper around JSON serialization and deserialization errors.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The item a case is cloned from is not in the item table.
    #[error("template item not found: {0}")]
    TemplateNotFound(String),

    /// The trader named by a trade (after name resolution) is not in the trader table.
    #[error("trader not found: {0}")]
    TraderNotFound(String),

    /// The trader exists but carries no assort table to register into.
    #[error("trader {0} has no assort")]
    MissingAssort(String),

    /// Horizontal and vertical cell arrays of a container case differ in length.
    #[error("cell arrays differ in length: {horizontal} horizontal, {vertical} vertical")]
    DimensionMismatch { horizontal: usize, vertical: usize },

    /// A configuration value that cannot be applied at all.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
