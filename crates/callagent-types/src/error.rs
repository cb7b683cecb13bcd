use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating settings.
///
/// All of them are fatal at startup: the service never binds a listener
/// with a configuration it could not read.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("invalid allowed origin '{0}': expected scheme://host[:port]")]
    InvalidOrigin(String),

    #[error("allowed origins list is empty; use \"*\" to allow any origin")]
    NoAllowedOrigins,

    #[error("invalid HTTP method '{0}'")]
    InvalidMethod(String),

    #[error("invalid HTTP header name '{0}'")]
    InvalidHeader(String),

    #[error("invalid value '{value}' for {var}: {reason}")]
    InvalidEnv {
        var: String,
        value: String,
        reason: String,
    },
}

/// Errors raised while mounting route groups into the gateway.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MountError {
    #[error("invalid mount prefix '{prefix}': {reason}")]
    InvalidPrefix { prefix: String, reason: String },

    #[error("prefix '{prefix}' is already mounted by route group '{existing_group}'")]
    DuplicatePrefix {
        prefix: String,
        existing_group: String,
    },

    #[error("prefix '{prefix}' overlaps '{existing}' mounted by route group '{existing_group}'")]
    OverlappingPrefix {
        prefix: String,
        existing: String,
        existing_group: String,
    },
}

/// Any failure while assembling the gateway. Always fatal at startup.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Mount(#[from] MountError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::NotFound(PathBuf::from("/etc/callagent.toml"));
        assert_eq!(err.to_string(), "config file not found: /etc/callagent.toml");

        let err = ConfigError::InvalidOrigin("example.com".to_string());
        assert!(err.to_string().contains("example.com"));

        let err = ConfigError::NoAllowedOrigins;
        assert!(err.to_string().contains("\"*\""));
    }

    #[test]
    fn test_invalid_env_display() {
        let err = ConfigError::InvalidEnv {
            var: "CALLAGENT_PORT".to_string(),
            value: "eighty".to_string(),
            reason: "not a port number".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid value 'eighty' for CALLAGENT_PORT: not a port number"
        );
    }

    #[test]
    fn test_mount_error_display() {
        let err = MountError::DuplicatePrefix {
            prefix: "/api/v1".to_string(),
            existing_group: "system".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "prefix '/api/v1' is already mounted by route group 'system'"
        );
    }

    #[test]
    fn test_gateway_error_is_transparent() {
        let err = GatewayError::from(MountError::InvalidPrefix {
            prefix: "/".to_string(),
            reason: "cannot mount at the root path".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "invalid mount prefix '/': cannot mount at the root path"
        );
        assert!(matches!(err, GatewayError::Mount(_)));
    }
}
