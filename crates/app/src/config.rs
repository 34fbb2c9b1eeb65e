//! Application configuration loaded from environment variables.

/// Process configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
/// - `EVENT_UPDATE_ROUTING_KEY` — routing key for event update messages (default: `"event-update"`)
/// - `NOTIFICATION_SENDER` — From address of invitation e-mails (default: `"no-reply@events.local"`)
/// - `NOTIFICATIONS_ENABLED` — e-mail invited users (default: `true`)
/// - `RUN_DEMO` — run a sample workflow on startup (default: `false`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub log_level: String,
    pub event_update_routing_key: String,
    pub notification_sender: String,
    pub notifications_enabled: bool,
    pub run_demo: bool,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            log_level: std::env::var("RUST_LOG").unwrap_or(defaults.log_level),
            event_update_routing_key: std::env::var("EVENT_UPDATE_ROUTING_KEY")
                .unwrap_or(defaults.event_update_routing_key),
            notification_sender: std::env::var("NOTIFICATION_SENDER")
                .unwrap_or(defaults.notification_sender),
            notifications_enabled: parse_flag("NOTIFICATIONS_ENABLED")
                .unwrap_or(defaults.notifications_enabled),
            run_demo: parse_flag("RUN_DEMO").unwrap_or(defaults.run_demo),
        }
    }
}

fn parse_flag(name: &str) -> Option<bool> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            event_update_routing_key: "event-update".to_string(),
            notification_sender: "no-reply@events.local".to_string(),
            notifications_enabled: true,
            run_demo: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.event_update_routing_key, "event-update");
        assert_eq!(config.notification_sender, "no-reply@events.local");
        assert!(config.notifications_enabled);
        assert!(!config.run_demo);
    }

    #[test]
    fn test_unparseable_flag_is_ignored() {
        // Variable names unique to this test so parallel tests do not race.
        unsafe { std::env::set_var("APP_TEST_FLAG_GARBAGE", "maybe") };
        assert_eq!(parse_flag("APP_TEST_FLAG_GARBAGE"), None);

        unsafe { std::env::set_var("APP_TEST_FLAG_FALSE", "false") };
        assert_eq!(parse_flag("APP_TEST_FLAG_FALSE"), Some(false));

        assert_eq!(parse_flag("APP_TEST_FLAG_UNSET"), None);
    }
}
