use anyhow::{anyhow, Result};
use chrono_tz::Tz;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_ROSTER_PATH: &str = "users";
pub const DEFAULT_ADMIN: &str = "adventurer_v";
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Europe::Moscow;

#[derive(Debug, Clone)]
pub struct Config {
    pub telegram_bot_token: String,
    pub roster_path: PathBuf,
    pub admin_username: String,
    pub deadline_hour: u32,
    pub timezone: Tz,
    pub reminder_lead_minutes: i64,
    pub persist_on_stop: bool,
    pub http_port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let token = env::var("TELEGRAM_BOT_TOKEN")
            .map_err(|_| anyhow!("TELEGRAM_BOT_TOKEN must be set"))?;

        if token.trim().is_empty() {
            return Err(anyhow!("TELEGRAM_BOT_TOKEN must be set"));
        }

        let admin = non_empty_var("ADMIN_USERNAME").unwrap_or_else(|| DEFAULT_ADMIN.to_string());
        let admin_username = admin.trim().trim_start_matches('@').to_string();

        let deadline_hour: u32 = non_empty_var("DEADLINE_HOUR")
            .unwrap_or_else(|| "23".to_string())
            .trim()
            .parse()
            .map_err(|_| anyhow!("Invalid DEADLINE_HOUR"))?;
        if deadline_hour > 23 {
            return Err(anyhow!("Invalid DEADLINE_HOUR: must be between 0 and 23"));
        }

        let timezone = match non_empty_var("BOT_TIMEZONE") {
            Some(name) => name
                .trim()
                .parse::<Tz>()
                .map_err(|_| anyhow!("Invalid BOT_TIMEZONE: {}", name.trim()))?,
            None => DEFAULT_TIMEZONE,
        };

        let reminder_lead_minutes: i64 = non_empty_var("REMINDER_LEAD_MINUTES")
            .unwrap_or_else(|| "60".to_string())
            .trim()
            .parse()
            .map_err(|_| anyhow!("Invalid REMINDER_LEAD_MINUTES"))?;
        if reminder_lead_minutes <= 0 {
            return Err(anyhow!("Invalid REMINDER_LEAD_MINUTES: must be positive"));
        }

        let persist_on_stop = match non_empty_var("PERSIST_ON_STOP") {
            Some(value) => parse_flag(&value)
                .ok_or_else(|| anyhow!("Invalid PERSIST_ON_STOP"))?,
            None => false,
        };

        let port_str = env::var("HTTP_PORT")
            .unwrap_or_else(|_| "3000".to_string());
        let http_port = port_str.trim()
            .parse()
            .map_err(|_| anyhow!("Invalid HTTP_PORT"))?;

        Ok(Config {
            telegram_bot_token: token,
            roster_path: roster_path_from_env(),
            admin_username,
            deadline_hour,
            timezone,
            reminder_lead_minutes,
            persist_on_stop,
            http_port,
        })
    }

    pub fn reminder_lead(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.reminder_lead_minutes)
    }
}

/// Roster location on its own, for tools that do not talk to Telegram.
pub fn roster_path_from_env() -> PathBuf {
    non_empty_var("ROSTER_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_ROSTER_PATH))
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
