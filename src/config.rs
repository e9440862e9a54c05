use std::{env, fmt::Display, fs::read_to_string, str::FromStr, time::Duration};

use anyhow::{Context, Result, anyhow};
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum StoreBackend {
    Memory,
    MongoDb { uri: String, database: String },
    Supabase { url: String, anon_key: String },
}

impl StoreBackend {
    pub fn kind(&self) -> &'static str {
        match self {
            StoreBackend::Memory => "memory",
            StoreBackend::MongoDb { .. } => "mongodb",
            StoreBackend::Supabase { .. } => "supabase",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventDetails {
    pub name: String,
    pub date: String,
    pub start_time: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub store: StoreBackend,
    pub signups_open: bool,
    pub event: EventDetails,
    pub lockbox_unlock_delay: Duration,
    pub calculator_session_ttl: Duration,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok().or_else(|| read_secret(key)))
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let store = match try_load::<String, _>(&lookup, "SIGNUP_STORE", "memory")?
            .to_lowercase()
            .as_str()
        {
            "memory" => StoreBackend::Memory,
            "mongodb" | "mongo" => StoreBackend::MongoDb {
                uri: try_load(&lookup, "MONGODB_URI", "mongodb://localhost:27017")?,
                database: try_load(&lookup, "MONGODB_DATABASE", "rsvp")?,
            },
            "supabase" => StoreBackend::Supabase {
                url: required(&lookup, "SUPABASE_URL")?
                    .trim_end_matches('/')
                    .to_string(),
                anon_key: required(&lookup, "SUPABASE_ANON_KEY")?,
            },
            other => return Err(anyhow!("Unknown SIGNUP_STORE value: {other}")),
        };

        Ok(Self {
            host: try_load(&lookup, "HOST", "0.0.0.0")?,
            port: try_load(&lookup, "PORT", "80")?,
            store,
            signups_open: try_load(&lookup, "SIGNUPS_OPEN", "true")?,
            event: EventDetails {
                name: try_load(&lookup, "EVENT_NAME", "The Parable of the Mole")?,
                date: try_load(&lookup, "EVENT_DATE", "Saturday, January 17th, 2026")?,
                start_time: try_load(&lookup, "EVENT_START", "10:00 AM")?,
            },
            lockbox_unlock_delay: Duration::from_millis(try_load(
                &lookup,
                "LOCKBOX_UNLOCK_DELAY_MS",
                "2000",
            )?),
            calculator_session_ttl: Duration::from_secs(try_load(
                &lookup,
                "CALCULATOR_SESSION_TTL_SECS",
                "3600",
            )?),
        })
    }
}

fn try_load<T, F>(lookup: &F, key: &str, default: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .unwrap_or_else(|| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| anyhow!("Invalid {key} value: {e}"))
}

fn required<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|value| !value.trim().is_empty())
        .with_context(|| format!("{key} must be set"))
}

fn read_secret(secret_name: &str) -> Option<String> {
    let path = format!("/run/secrets/{secret_name}");

    read_to_string(&path)
        .map(|s| s.trim().to_string())
        .map_err(|e| {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!("Failed to read {secret_name} from file: {e}");
            }
        })
        .ok()
}
