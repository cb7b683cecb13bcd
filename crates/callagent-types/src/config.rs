//! Startup configuration types for the AI Calling Agent API.
//!
//! `Settings` mirrors the `callagent.toml` file layout: service metadata,
//! the listen address, and the cross-origin policy. All sections have
//! defaults matching the legacy deployment (permissive CORS on port 8000).
//!
//! The wildcard `"*"` only exists at the serialization boundary. Inside the
//! program, wildcards are explicit enum variants so a permissive policy is
//! visible in the type.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const WILDCARD: &str = "*";

/// Top-level settings, read once at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub service: ServiceMetadata,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub cors: CorsConfig,
}

/// Descriptive metadata attached to the application at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceMetadata {
    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_description")]
    pub description: String,

    #[serde(default = "default_version")]
    pub version: String,
}

fn default_name() -> String {
    "AI Calling Agent API".to_string()
}

fn default_description() -> String {
    "Backend API for AI-powered calling platform".to_string()
}

fn default_version() -> String {
    "1.0.0".to_string()
}

impl Default for ServiceMetadata {
    fn default() -> Self {
        Self {
            name: default_name(),
            description: default_description(),
            version: default_version(),
        }
    }
}

/// Listen address for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// `host:port`, bracketing IPv6 literals.
    pub fn bind_addr(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

/// Cross-origin policy applied to every inbound request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: OriginPolicy,

    #[serde(default = "default_allow_credentials")]
    pub allow_credentials: bool,

    #[serde(default)]
    pub allowed_methods: MethodPolicy,

    #[serde(default)]
    pub allowed_headers: HeaderPolicy,

    /// Preflight cache lifetime (`Access-Control-Max-Age`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_age_secs: Option<u64>,
}

fn default_allow_credentials() -> bool {
    true
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: OriginPolicy::Permissive,
            allow_credentials: default_allow_credentials(),
            allowed_methods: MethodPolicy::Any,
            allowed_headers: HeaderPolicy::Any,
            max_age_secs: None,
        }
    }
}

/// Which browser origins may read responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub enum OriginPolicy {
    /// Any origin (`Access-Control-Allow-Origin: *`). Not for production.
    #[default]
    Permissive,
    /// Only the listed origins, compared exactly.
    Restricted(Vec<String>),
}

impl OriginPolicy {
    pub fn is_permissive(&self) -> bool {
        matches!(self, OriginPolicy::Permissive)
    }
}

impl TryFrom<Vec<String>> for OriginPolicy {
    type Error = ConfigError;

    fn try_from(values: Vec<String>) -> Result<Self, Self::Error> {
        if values.iter().any(|v| v.trim() == WILDCARD) {
            return Ok(OriginPolicy::Permissive);
        }
        // An empty list would block every browser origin without saying so.
        if values.is_empty() {
            return Err(ConfigError::NoAllowedOrigins);
        }
        let origins = values
            .iter()
            .map(|v| validate_origin(v))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(OriginPolicy::Restricted(origins))
    }
}

impl From<OriginPolicy> for Vec<String> {
    fn from(policy: OriginPolicy) -> Self {
        match policy {
            OriginPolicy::Permissive => vec![WILDCARD.to_string()],
            OriginPolicy::Restricted(origins) => origins,
        }
    }
}

/// Which request methods preflight checks accept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub enum MethodPolicy {
    #[default]
    Any,
    List(Vec<String>),
}

impl TryFrom<Vec<String>> for MethodPolicy {
    type Error = ConfigError;

    fn try_from(values: Vec<String>) -> Result<Self, Self::Error> {
        if values.iter().any(|v| v.trim() == WILDCARD) {
            return Ok(MethodPolicy::Any);
        }
        let methods = values
            .iter()
            .map(|v| {
                let method = v.trim();
                if is_token(method) {
                    Ok(method.to_ascii_uppercase())
                } else {
                    Err(ConfigError::InvalidMethod(v.clone()))
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(MethodPolicy::List(methods))
    }
}

impl From<MethodPolicy> for Vec<String> {
    fn from(policy: MethodPolicy) -> Self {
        match policy {
            MethodPolicy::Any => vec![WILDCARD.to_string()],
            MethodPolicy::List(methods) => methods,
        }
    }
}

/// Which request headers preflight checks accept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub enum HeaderPolicy {
    #[default]
    Any,
    List(Vec<String>),
}

impl TryFrom<Vec<String>> for HeaderPolicy {
    type Error = ConfigError;

    fn try_from(values: Vec<String>) -> Result<Self, Self::Error> {
        if values.iter().any(|v| v.trim() == WILDCARD) {
            return Ok(HeaderPolicy::Any);
        }
        let headers = values
            .iter()
            .map(|v| {
                let header = v.trim();
                if is_token(header) {
                    Ok(header.to_ascii_lowercase())
                } else {
                    Err(ConfigError::InvalidHeader(v.clone()))
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(HeaderPolicy::List(headers))
    }
}

impl From<HeaderPolicy> for Vec<String> {
    fn from(policy: HeaderPolicy) -> Self {
        match policy {
            HeaderPolicy::Any => vec![WILDCARD.to_string()],
            HeaderPolicy::List(headers) => headers,
        }
    }
}

/// Check that `raw` is a serialized origin: `http(s)://host[:port]`, no path.
///
/// Browsers send the `Origin` header without a trailing slash, so a
/// configured `https://app.example.com/` is normalized to match.
pub fn validate_origin(raw: &str) -> Result<String, ConfigError> {
    let origin = raw.trim().trim_end_matches('/');
    let invalid = || ConfigError::InvalidOrigin(raw.to_string());

    let (scheme, authority) = origin.split_once("://").ok_or_else(invalid)?;
    if scheme != "http" && scheme != "https" {
        return Err(invalid());
    }
    if authority.is_empty()
        || authority.contains('/')
        || !authority.chars().all(|c| c.is_ascii_graphic())
    {
        return Err(invalid());
    }
    Ok(origin.to_string())
}

/// RFC 9110 `token`, the grammar for method and header names.
fn is_token(s: &str) -> bool {
    !s.is_empty()
        && s.bytes().all(|b| {
            b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_default_values() {
        let settings = Settings::default();
        assert_eq!(settings.service.name, "AI Calling Agent API");
        assert_eq!(settings.service.version, "1.0.0");
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.server.port, 8000);
        assert_eq!(settings.cors.allowed_origins, OriginPolicy::Permissive);
        assert!(settings.cors.allow_credentials);
        assert_eq!(settings.cors.allowed_methods, MethodPolicy::Any);
        assert_eq!(settings.cors.allowed_headers, HeaderPolicy::Any);
        assert_eq!(settings.cors.max_age_secs, None);
    }

    #[test]
    fn test_settings_deserialize_empty_uses_defaults() {
        let settings: Settings = toml::from_str("").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_settings_deserialize_restricted_policy() {
        let toml_str = r#"
[service]
name = "Calls"

[server]
port = 9000

[cors]
allowed_origins = ["https://app.example.com", "http://localhost:3000/"]
allow_credentials = false
allowed_methods = ["get", "POST"]
allowed_headers = ["Content-Type", "Authorization"]
max_age_secs = 600
"#;
        let settings: Settings = toml::from_str(toml_str).unwrap();
        assert_eq!(settings.service.name, "Calls");
        assert_eq!(settings.service.version, "1.0.0");
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.server.port, 9000);
        assert_eq!(
            settings.cors.allowed_origins,
            OriginPolicy::Restricted(vec![
                "https://app.example.com".to_string(),
                "http://localhost:3000".to_string(),
            ])
        );
        assert!(!settings.cors.allow_credentials);
        assert_eq!(
            settings.cors.allowed_methods,
            MethodPolicy::List(vec!["GET".to_string(), "POST".to_string()])
        );
        assert_eq!(
            settings.cors.allowed_headers,
            HeaderPolicy::List(vec![
                "content-type".to_string(),
                "authorization".to_string()
            ])
        );
        assert_eq!(settings.cors.max_age_secs, Some(600));
    }

    #[test]
    fn test_wildcard_anywhere_in_list_is_permissive() {
        let policy = OriginPolicy::try_from(vec![
            "https://a.example.com".to_string(),
            "*".to_string(),
        ])
        .unwrap();
        assert!(policy.is_permissive());
    }

    #[test]
    fn test_empty_origin_list_rejected() {
        assert!(matches!(
            OriginPolicy::try_from(Vec::new()),
            Err(ConfigError::NoAllowedOrigins)
        ));

        let err = toml::from_str::<Settings>("[cors]\nallowed_origins = []\n").unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_invalid_origin_rejected_at_parse() {
        let toml_str = r#"
[cors]
allowed_origins = ["app.example.com"]
"#;
        let err = toml::from_str::<Settings>(toml_str).unwrap_err();
        assert!(err.to_string().contains("app.example.com"));
    }

    #[test]
    fn test_validate_origin() {
        assert_eq!(
            validate_origin("https://example.com").unwrap(),
            "https://example.com"
        );
        assert_eq!(
            validate_origin(" http://localhost:8080/ ").unwrap(),
            "http://localhost:8080"
        );
        assert!(validate_origin("ftp://example.com").is_err());
        assert!(validate_origin("https://").is_err());
        assert!(validate_origin("https://example.com/app").is_err());
        assert!(validate_origin("https://exa mple.com").is_err());
    }

    #[test]
    fn test_invalid_method_and_header_rejected() {
        assert!(matches!(
            MethodPolicy::try_from(vec!["GE T".to_string()]),
            Err(ConfigError::InvalidMethod(_))
        ));
        assert!(matches!(
            HeaderPolicy::try_from(vec!["x-bad(header)".to_string()]),
            Err(ConfigError::InvalidHeader(_))
        ));
    }

    #[test]
    fn test_policies_serialize_back_to_wildcard() {
        let json = serde_json::to_value(CorsConfig::default()).unwrap();
        assert_eq!(json["allowed_origins"], serde_json::json!(["*"]));
        assert_eq!(json["allowed_methods"], serde_json::json!(["*"]));
        assert_eq!(json["allowed_headers"], serde_json::json!(["*"]));
        assert!(json.get("max_age_secs").is_none());
    }

    #[test]
    fn test_bind_addr() {
        let server = ServerConfig::default();
        assert_eq!(server.bind_addr(), "0.0.0.0:8000");

        let server = ServerConfig {
            host: "::".to_string(),
            port: 8080,
        };
        assert_eq!(server.bind_addr(), "[::]:8080");
    }
}
