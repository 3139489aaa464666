use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Timeout waiting for upstream {server}")]
    UpstreamTimeout { server: String },

    #[error("Upstream {server} unreachable: {source}")]
    UpstreamUnreachable {
        server: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    #[error("Failed to read config file '{0}': {1}")]
    FileRead(String, String),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Validation(String),
}
