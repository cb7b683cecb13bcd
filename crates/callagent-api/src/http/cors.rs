//! CORS layer construction from [`CorsConfig`].
//!
//! tower-http refuses to combine `Access-Control-Allow-Credentials: true`
//! with any `*` value. The mapping below keeps every configuration usable:
//!
//! | origins     | credentials | result                                                  |
//! |-------------|-------------|---------------------------------------------------------|
//! | Permissive  | false       | `*` origin, methods, headers                            |
//! | Permissive  | true        | `*` origin, origin echoed for credentialed requests     |
//! | Restricted  | false       | listed origins; methods/headers as configured           |
//! | Restricted  | true        | listed origins; wildcard methods/headers mirrored       |
//!
//! A credentialed request is one carrying a `Cookie` header, or a preflight
//! (`OPTIONS` with `Access-Control-Request-Method`). Browsers reject `*`
//! for those, so [`echo_credentialed_origin`] rewrites the wildcard
//! answer into the request's own origin.

use std::time::Duration;

use axum::extract::Request;
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_REQUEST_HEADERS, ACCESS_CONTROL_REQUEST_METHOD,
    COOKIE, ORIGIN, VARY,
};
use axum::http::{HeaderName, HeaderValue, Method};
use axum::middleware::Next;
use axum::response::Response;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use callagent_types::config::{CorsConfig, HeaderPolicy, MethodPolicy, OriginPolicy};
use callagent_types::error::ConfigError;

/// The middleware needed to declare a cross-origin policy.
pub struct CorsStack {
    pub cors: CorsLayer,
    /// Credentials are declared alongside a wildcard origin; the gateway
    /// wraps `cors` with [`echo_credentialed_origin`].
    pub wildcard_credentials: bool,
}

/// Translate a validated [`CorsConfig`] into tower-http layers.
pub fn build_cors(config: &CorsConfig) -> Result<CorsStack, ConfigError> {
    // Credentials are only attached to the CorsLayer when the origin list is
    // explicit; tower-http panics on credentials with a wildcard origin.
    let layer_credentials = config.allow_credentials && !config.allowed_origins.is_permissive();

    let origin = match &config.allowed_origins {
        OriginPolicy::Permissive => AllowOrigin::any(),
        OriginPolicy::Restricted(origins) => {
            let values = origins
                .iter()
                .map(|o| {
                    HeaderValue::from_str(o).map_err(|_| ConfigError::InvalidOrigin(o.clone()))
                })
                .collect::<Result<Vec<_>, _>>()?;
            AllowOrigin::list(values)
        }
    };

    let methods = match &config.allowed_methods {
        MethodPolicy::Any if layer_credentials => AllowMethods::mirror_request(),
        MethodPolicy::Any => AllowMethods::any(),
        MethodPolicy::List(methods) => {
            let methods = methods
                .iter()
                .map(|m| {
                    Method::from_bytes(m.as_bytes())
                        .map_err(|_| ConfigError::InvalidMethod(m.clone()))
                })
                .collect::<Result<Vec<_>, _>>()?;
            AllowMethods::list(methods)
        }
    };

    let headers = match &config.allowed_headers {
        HeaderPolicy::Any if layer_credentials => AllowHeaders::mirror_request(),
        HeaderPolicy::Any => AllowHeaders::any(),
        HeaderPolicy::List(headers) => {
            let headers = headers
                .iter()
                .map(|h| {
                    HeaderName::from_bytes(h.as_bytes())
                        .map_err(|_| ConfigError::InvalidHeader(h.clone()))
                })
                .collect::<Result<Vec<_>, _>>()?;
            AllowHeaders::list(headers)
        }
    };

    let mut cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(methods)
        .allow_headers(headers)
        .allow_credentials(layer_credentials);

    if let Some(secs) = config.max_age_secs {
        cors = cors.max_age(Duration::from_secs(secs));
    }

    let wildcard_credentials =
        config.allow_credentials && config.allowed_origins.is_permissive();
    if wildcard_credentials {
        tracing::warn!(
            "CORS allows every origin with credentials; credentialed requests get their \
             origin echoed back. Restrict `cors.allowed_origins` before deploying"
        );
    } else if config.allowed_origins.is_permissive() {
        tracing::warn!("CORS origin policy is permissive; not suitable for production");
    }

    Ok(CorsStack {
        cors,
        wildcard_credentials,
    })
}

/// Middleware placed outside the wildcard `CorsLayer` when credentials
/// are allowed.
///
/// Always adds `Access-Control-Allow-Credentials: true`. For credentialed
/// requests the `*` origin is replaced by the request origin, and on
/// preflight `*` methods/headers are replaced by the requested ones.
pub async fn echo_credentialed_origin(request: Request, next: Next) -> Response {
    let headers = request.headers();
    let preflight =
        request.method() == Method::OPTIONS && headers.contains_key(ACCESS_CONTROL_REQUEST_METHOD);
    let origin = headers
        .get(ORIGIN)
        .filter(|_| preflight || headers.contains_key(COOKIE))
        .cloned();
    let requested_method = headers.get(ACCESS_CONTROL_REQUEST_METHOD).cloned();
    let requested_headers = headers.get(ACCESS_CONTROL_REQUEST_HEADERS).cloned();

    let mut response = next.run(request).await;
    let out = response.headers_mut();
    out.entry(ACCESS_CONTROL_ALLOW_CREDENTIALS)
        .or_insert(HeaderValue::from_static("true"));

    let Some(origin) = origin else {
        return response;
    };
    if out.get(ACCESS_CONTROL_ALLOW_ORIGIN).is_some_and(|v| v == "*") {
        out.insert(ACCESS_CONTROL_ALLOW_ORIGIN, origin);
        out.append(VARY, HeaderValue::from_static("origin"));
    }
    if preflight {
        replace_wildcard(out, ACCESS_CONTROL_ALLOW_METHODS, requested_method);
        replace_wildcard(out, ACCESS_CONTROL_ALLOW_HEADERS, requested_headers);
    }
    response
}

fn replace_wildcard(
    headers: &mut axum::http::HeaderMap,
    name: HeaderName,
    requested: Option<HeaderValue>,
) {
    if headers.get(&name).is_some_and(|v| v == "*") {
        match requested {
            Some(value) => {
                headers.insert(name, value);
            }
            None => {
                headers.remove(name);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn restricted(origins: &[&str]) -> OriginPolicy {
        OriginPolicy::Restricted(origins.iter().map(|o| o.to_string()).collect())
    }

    #[test]
    fn permissive_with_credentials_needs_echo_middleware() {
        let stack = build_cors(&CorsConfig::default()).unwrap();
        assert!(stack.wildcard_credentials);
    }

    #[test]
    fn permissive_without_credentials_has_no_echo_middleware() {
        let config = CorsConfig {
            allow_credentials: false,
            ..CorsConfig::default()
        };
        let stack = build_cors(&config).unwrap();
        assert!(!stack.wildcard_credentials);
    }

    #[test]
    fn restricted_with_credentials_uses_cors_layer_credentials() {
        let config = CorsConfig {
            allowed_origins: restricted(&["https://app.example.com"]),
            ..CorsConfig::default()
        };
        let stack = build_cors(&config).unwrap();
        assert!(!stack.wildcard_credentials);
    }

    #[test]
    fn explicit_lists_are_accepted() {
        let config = CorsConfig {
            allowed_origins: restricted(&["https://app.example.com"]),
            allow_credentials: true,
            allowed_methods: MethodPolicy::List(vec!["GET".to_string(), "POST".to_string()]),
            allowed_headers: HeaderPolicy::List(vec!["content-type".to_string()]),
            max_age_secs: Some(600),
        };
        assert!(build_cors(&config).is_ok());
    }

    #[test]
    fn unrepresentable_values_are_config_errors() {
        let config = CorsConfig {
            allowed_headers: HeaderPolicy::List(vec!["bad header".to_string()]),
            ..CorsConfig::default()
        };
        assert!(matches!(
            build_cors(&config),
            Err(ConfigError::InvalidHeader(_))
        ));
    }
}
