use thiserror::Error;

/// Error taxonomy for the cruise pipeline.
///
/// Structural problems (missing depth axis, unknown variable) abort the
/// whole call; validation problems (unit mismatch, vocabulary violation)
/// are fatal only to the operation that raised them.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("profile '{profile}' has no depth axis")]
    MissingDepthAxis { profile: String },

    #[error(
        "unit mismatch for variable '{variable}': '{expected}' vs '{found}' (profile '{profile}')"
    )]
    UnitMismatch {
        variable: String,
        expected: String,
        found: String,
        profile: String,
    },

    #[error("attribute '{attribute}': '{value}' is not in the controlled vocabulary [{allowed}]")]
    VocabularyViolation {
        attribute: String,
        value: String,
        allowed: String,
    },

    #[error("no such variable: '{name}'")]
    NoSuchVariable { name: String },

    #[error("variable '{name}' holds text, not numeric samples")]
    NotNumeric { name: String },

    #[error("cannot join an empty list of profiles")]
    EmptyCruise,
}

pub type Result<T> = std::result::Result<T, ModelError>;
