use std::env;
use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub backend_url: String,
    pub service_port: u16,
    pub service_host: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let backend_url = env::var("BACKEND_URL")
            .or_else(|_| env::var("API_URL"))
            .context("BACKEND_URL environment variable is required")?;

        if backend_url.trim().is_empty() {
            anyhow::bail!("BACKEND_URL must not be empty");
        }

        let service_port = env::var("SERVICE_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .context("SERVICE_PORT must be a valid port number (0-65535)")?;

        let service_host = env::var("SERVICE_HOST")
            .unwrap_or_else(|_| "0.0.0.0".to_string());

        Ok(Config {
            backend_url,
            service_port,
            service_host,
        })
    }

    pub fn log_startup(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Library backend: {}", self.backend_url);
        tracing::info!("  Service listening on: {}:{}", self.service_host, self.service_port);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Environment variables are process-wide; tests touching them take this lock.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn clear_env_vars() {
        unsafe {
            env::remove_var("BACKEND_URL");
            env::remove_var("API_URL");
            env::remove_var("SERVICE_PORT");
            env::remove_var("SERVICE_HOST");
        }
    }

    fn set_required_vars() {
        unsafe {
            env::set_var("BACKEND_URL", "http://backend.test:8080");
        }
    }

    #[test]
    fn test_config_with_all_vars() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env_vars();
        set_required_vars();
        unsafe {
            env::set_var("SERVICE_PORT", "8080");
            env::set_var("SERVICE_HOST", "127.0.0.1");
        }

        let config = Config::from_env().unwrap();

        assert_eq!(config.backend_url, "http://backend.test:8080");
        assert_eq!(config.service_port, 8080);
        assert_eq!(config.service_host, "127.0.0.1");
        clear_env_vars();
    }

    #[test]
    fn test_config_with_defaults() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env_vars();
        set_required_vars();

        let config = Config::from_env().unwrap();

        assert_eq!(config.service_port, 3000);
        assert_eq!(config.service_host, "0.0.0.0");
        clear_env_vars();
    }

    #[test]
    fn test_api_url_fallback() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env_vars();
        unsafe {
            env::set_var("API_URL", "http://57.128.78.8:8080");
        }

        let config = Config::from_env().unwrap();
        assert_eq!(config.backend_url, "http://57.128.78.8:8080");
        clear_env_vars();
    }

    #[test]
    fn test_backend_url_wins_over_api_url() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env_vars();
        set_required_vars();
        unsafe {
            env::set_var("API_URL", "http://other:1");
        }

        let config = Config::from_env().unwrap();
        assert_eq!(config.backend_url, "http://backend.test:8080");
        clear_env_vars();
    }

    #[test]
    fn test_missing_backend_url() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env_vars();

        let result = Config::from_env();
        assert!(result.is_err());
        let error = result.unwrap_err();
        assert!(error.to_string().contains("BACKEND_URL"));
    }

    #[test]
    fn test_empty_backend_url() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env_vars();
        unsafe {
            env::set_var("BACKEND_URL", "  ");
        }

        let result = Config::from_env();
        assert!(result.is_err());
        clear_env_vars();
    }

    #[test]
    fn test_invalid_port() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env_vars();
        set_required_vars();
        unsafe {
            env::set_var("SERVICE_PORT", "not-a-number");
        }

        let result = Config::from_env();
        assert!(result.is_err());
        let error = result.unwrap_err();
        assert!(error.to_string().contains("SERVICE_PORT"));
        clear_env_vars();
    }

    #[test]
    fn test_port_out_of_range() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env_vars();
        set_required_vars();
        unsafe {
            env::set_var("SERVICE_PORT", "99999");
        }

        let result = Config::from_env();
        assert!(result.is_err());
        clear_env_vars();
    }
}
