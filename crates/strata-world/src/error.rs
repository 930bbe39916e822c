use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read terrain config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse terrain config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid terrain config: {0}")]
    Invalid(String),
}
