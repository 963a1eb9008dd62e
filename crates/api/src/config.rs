use relink_core::config::RedirectConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Public base URL of the site; internal redirect targets resolve against it.
    pub site_base_url: String,
    /// Path prefix of the administrative surface. 404s under it are never
    /// redirected.
    pub admin_path_prefix: String,
    /// Miss collection and custom status code settings.
    pub redirect: RedirectConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                    |
    /// |-------------------------|----------------------------|
    /// | `HOST`                  | `0.0.0.0`                  |
    /// | `PORT`                  | `3000`                     |
    /// | `CORS_ORIGINS`          | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                       |
    /// | `SITE_BASE_URL`         | `http://localhost:3000/`   |
    /// | `ADMIN_PATH_PREFIX`     | `/administrator`           |
    /// | `REDIRECT_COLLECT_URLS` | `true`                     |
    /// | `REDIRECT_MODE`         | `false`                    |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let site_base_url =
            std::env::var("SITE_BASE_URL").unwrap_or_else(|_| "http://localhost:3000/".into());

        let admin_path_prefix = normalize_prefix(
            &std::env::var("ADMIN_PATH_PREFIX").unwrap_or_else(|_| "/administrator".into()),
        );

        let redirect = RedirectConfig {
            collect_urls: env_flag("REDIRECT_COLLECT_URLS", true),
            mode: env_flag("REDIRECT_MODE", false),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            site_base_url,
            admin_path_prefix,
            redirect,
        }
    }
}

/// Read a boolean flag, accepting `1/0`, `true/false`, `yes/no`, `on/off`.
fn env_flag(name: &str, default: bool) -> bool {
    match std::env::var(name) {
        Ok(value) => parse_flag(&value).unwrap_or_else(|| panic!("{name} must be a boolean")),
        Err(_) => default,
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Leading slash, no trailing slash.
fn normalize_prefix(prefix: &str) -> String {
    format!("/{}", prefix.trim().trim_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags() {
        assert_eq!(parse_flag("1"), Some(true));
        assert_eq!(parse_flag(" TRUE "), Some(true));
        assert_eq!(parse_flag("off"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn prefixes() {
        assert_eq!(normalize_prefix("administrator/"), "/administrator");
        assert_eq!(normalize_prefix("/admin"), "/admin");
    }
}
