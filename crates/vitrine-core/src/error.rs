use thiserror::Error;

/// Errors raised by the storefront domain before anything reaches the network.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("no {axis} variant named \"{name}\"")]
    UnknownVariant { axis: &'static str, name: String },

    #[error("{axis} index {index} out of range ({len} variants)")]
    VariantIndexOutOfRange {
        axis: &'static str,
        index: usize,
        len: usize,
    },

    #[error("media index {index} out of range ({len} items)")]
    UnknownMedia { index: usize, len: usize },

    #[error("\"{title}\" is not available in the selected options")]
    Unavailable { title: String },

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("new passwords do not match")]
    PasswordMismatch,

    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
