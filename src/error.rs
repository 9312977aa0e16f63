//! Error types.  Game outcomes (ship lost, wave cleared, breach) are never
//! errors; only loading a configuration can fail.

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A value that would put the simulation in an undefined configuration.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
