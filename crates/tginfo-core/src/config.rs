use std::{env, fs, path::Path};

use crate::{errors::Error, Result};

/// Typed configuration, read from the environment (and an optional `.env`).
#[derive(Clone, Debug)]
pub struct Config {
    // Telegram (MTProto app credentials + bot authorization)
    pub telegram_api_id: i32,
    pub telegram_api_hash: String,
    pub telegram_bot_token: String,
    pub telegram_session_file: String,
    pub retry_on_flood: bool,

    // HTTP
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));

        let telegram_bot_token = env_str("TELEGRAM_BOT_TOKEN").unwrap_or_default();
        if telegram_bot_token.trim().is_empty() {
            return Err(Error::Config(
                "TELEGRAM_BOT_TOKEN environment variable is required".to_string(),
            ));
        }

        let telegram_api_id = match env_str("TELEGRAM_API_ID").and_then(non_empty) {
            Some(raw) => parse_api_id(&raw)?,
            None => {
                return Err(Error::Config(
                    "TELEGRAM_API_ID environment variable is required".to_string(),
                ))
            }
        };
        let telegram_api_hash = env_str("TELEGRAM_API_HASH")
            .and_then(non_empty)
            .ok_or_else(|| {
                Error::Config("TELEGRAM_API_HASH environment variable is required".to_string())
            })?;
        let telegram_session_file = env_str("TELEGRAM_SESSION_FILE")
            .and_then(non_empty)
            .unwrap_or_else(|| "tginfo.session".to_string());
        let retry_on_flood = env_bool("LOOKUP_RETRY_ON_FLOOD").unwrap_or(true);

        let host = env_str("HOST")
            .and_then(non_empty)
            .unwrap_or_else(|| "0.0.0.0".to_string());
        let port = match env_str("PORT") {
            Some(raw) => parse_port(&raw)?,
            None => 8000,
        };

        Ok(Self {
            telegram_api_id,
            telegram_api_hash,
            telegram_bot_token,
            telegram_session_file,
            retry_on_flood,
            host,
            port,
        })
    }

    /// `host:port` suitable for a TCP listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_port(raw: &str) -> Result<u16> {
    raw.trim()
        .parse::<u16>()
        .map_err(|_| Error::Config(format!("PORT must be a port number, got {raw:?}")))
}

fn parse_api_id(raw: &str) -> Result<i32> {
    match raw.trim().parse::<i32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(Error::Config(format!(
            "TELEGRAM_API_ID must be a positive integer, got {raw:?}"
        ))),
    }
}

fn env_str(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for (key, val) in contents.lines().filter_map(parse_dotenv_line) {
        if env::var_os(&key).is_some() {
            continue; // do not override existing env
        }
        env::set_var(key, val);
    }
}

fn parse_dotenv_line(raw: &str) -> Option<(String, String)> {
    let line = raw.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let (k, v) = line.split_once('=')?;
    let key = k.trim();
    if key.is_empty() {
        return None;
    }

    let mut val = v.trim();
    // Strip optional surrounding quotes.
    if val.len() >= 2
        && ((val.starts_with('"') && val.ends_with('"'))
            || (val.starts_with('\'') && val.ends_with('\'')))
    {
        val = &val[1..val.len() - 1];
    }

    Some((key.to_string(), val.to_string()))
}

fn env_bool(key: &str) -> Option<bool> {
    env_str(key).map(|s| {
        matches!(
            s.trim().to_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )
    })
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
