// ============================================================================
// CONFIGURATION
// ============================================================================
//
// Description:
//   Lecture de la configuration depuis les variables d'environnement
//   (le fichier .env est chargé par main.rs avant l'appel à from_env).
//
// Variables:
//   - DATABASE_URL (obligatoire)
//   - HOST / PORT (défaut 127.0.0.1:8080)
//   - JWT_SECRET (défaut INSECURE, warning au démarrage)
//   - JWT_TTL_HOURS (défaut 24)
//   - AUTO_MIGRATE (défaut true) : crée les tables manquantes au boot
//   - DB_MAX_CONNECTIONS (défaut 10)
//   - ADMIN_USERNAME / ADMIN_PASSWORD : compte staff créé au boot si absent
//
// ============================================================================

use std::env;
use std::str::FromStr;

use thiserror::Error;

const DEFAULT_JWT_SECRET: &str = "default-insecure-key-change-this";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set in .env file")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Paramètres JWT partagés entre le login et l'extracteur AuthUser
#[derive(Debug, Clone)]
pub struct JwtSettings {
    pub secret: String,
    pub ttl_hours: i64,
}

#[derive(Debug, Clone)]
pub struct AdminBootstrap {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub jwt: JwtSettings,
    pub auto_migrate: bool,
    pub db_max_connections: u32,
    pub admin: Option<AdminBootstrap>,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        let secret = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ => {
                tracing::warn!("JWT_SECRET not found in .env, using default (INSECURE)");
                DEFAULT_JWT_SECRET.to_string()
            }
        };

        let admin = match (env::var("ADMIN_USERNAME"), env::var("ADMIN_PASSWORD")) {
            (Ok(username), Ok(password)) if !username.is_empty() && !password.is_empty() => {
                Some(AdminBootstrap { username, password })
            }
            _ => None,
        };

        Ok(Settings {
            database_url,
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_or("PORT", 8080)?,
            jwt: JwtSettings {
                secret,
                ttl_hours: parse_or("JWT_TTL_HOURS", 24)?,
            },
            auto_migrate: parse_bool_or("AUTO_MIGRATE", true)?,
            db_max_connections: parse_or("DB_MAX_CONNECTIONS", 10)?,
            admin,
        })
    }
}

fn parse_or<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        Err(_) => Ok(default),
    }
}

fn parse_bool_or(name: &'static str, default: bool) -> Result<bool, ConfigError> {
    match env::var(name) {
        Ok(value) => parse_bool(&value).ok_or(ConfigError::Invalid { name, value }),
        Err(_) => Ok(default),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool(" off "), Some(false));
        assert_eq!(parse_bool("peut-etre"), None);
    }

    #[test]
    fn test_parse_or_uses_default_when_unset() {
        let port: u16 = parse_or("PORTFOLIO_API_TEST_UNSET_PORT", 8080).unwrap();
        assert_eq!(port, 8080);
    }
}
