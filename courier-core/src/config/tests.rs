#[cfg(test)]
mod tests {
    use crate::config::loader::load_settings_from;
    use crate::config::model::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_load_settings_defaults() {
        let settings =
            load_settings_from(lookup(&[("BOT_TOKEN", "123:abc"), ("CHAT_ID", "-100500")])).unwrap();

        let relay = settings.relay.as_ref().unwrap();
        assert_eq!(relay.bot_token(), "123:abc");
        assert_eq!(relay.chat_id(), "-100500");
        assert!(settings.missing.is_empty());
        assert_eq!(settings.port, 3000);
        assert_eq!(settings.host, "0.0.0.0");
        assert_eq!(settings.bind_address(), "0.0.0.0:3000");
        assert_eq!(settings.missing_config_policy, MissingConfigPolicy::Abort);
        assert_eq!(settings.api_base_url, "https://api.telegram.org");
        assert_eq!(settings.connect_timeout_seconds, 30);
        assert!(settings.health_check_bot);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_load_settings_overrides() {
        let settings = load_settings_from(lookup(&[
            ("BOT_TOKEN", "123:abc"),
            ("CHAT_ID", "42"),
            ("PORT", "8080"),
            ("HOST", "127.0.0.1"),
            ("MISSING_CONFIG_POLICY", "Degrade"),
            ("TELEGRAM_API_URL", "http://localhost:8081/"),
            ("CONNECT_TIMEOUT_SECONDS", "5"),
            ("HEALTH_CHECK_BOT", "false"),
        ]))
        .unwrap();

        assert_eq!(settings.bind_address(), "127.0.0.1:8080");
        assert_eq!(settings.missing_config_policy, MissingConfigPolicy::Degrade);
        assert_eq!(settings.api_base_url, "http://localhost:8081");
        assert_eq!(settings.connect_timeout().as_secs(), 5);
        assert!(!settings.health_check_bot);
    }

    #[test]
    fn test_missing_chat_id() {
        let settings = load_settings_from(lookup(&[("BOT_TOKEN", "123:abc")])).unwrap();

        assert!(settings.relay.is_none());
        assert_eq!(settings.missing, vec!["CHAT_ID"]);
        assert!(!settings.is_configured());
    }

    #[test]
    fn test_blank_values_count_as_missing() {
        let settings =
            load_settings_from(lookup(&[("BOT_TOKEN", "   "), ("CHAT_ID", "")])).unwrap();

        assert!(settings.relay.is_none());
        assert_eq!(settings.missing, vec!["BOT_TOKEN", "CHAT_ID"]);
    }

    #[test]
    fn test_abort_policy_rejects_missing_config() {
        let settings = load_settings_from(lookup(&[("CHAT_ID", "42")])).unwrap();

        let result = settings.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("BOT_TOKEN"));
    }

    #[test]
    fn test_degrade_policy_accepts_missing_config() {
        let settings =
            load_settings_from(lookup(&[("MISSING_CONFIG_POLICY", "degrade")])).unwrap();

        assert!(settings.relay.is_none());
        assert!(settings.validate().is_ok());
        assert!(settings.require_relay().is_err());
    }

    #[test]
    fn test_invalid_port() {
        let result = load_settings_from(lookup(&[("PORT", "not-a-port")]));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("PORT"));
    }

    #[test]
    fn test_invalid_policy() {
        let result = load_settings_from(lookup(&[("MISSING_CONFIG_POLICY", "explode")]));
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("MISSING_CONFIG_POLICY"));
    }

    #[test]
    fn test_invalid_bool() {
        let result = load_settings_from(lookup(&[("HEALTH_CHECK_BOT", "maybe")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_timeout_is_invalid() {
        let settings = load_settings_from(lookup(&[
            ("BOT_TOKEN", "123:abc"),
            ("CHAT_ID", "42"),
            ("CONNECT_TIMEOUT_SECONDS", "0"),
        ]))
        .unwrap();

        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_relay_config_trims_and_rejects_empty() {
        let relay = RelayConfig::new(" token ", " 42 ").unwrap();
        assert_eq!(relay.bot_token(), "token");
        assert_eq!(relay.chat_id(), "42");

        assert_eq!(
            RelayConfig::new("", "42"),
            Err(ConfigError::MissingVariables(vec!["BOT_TOKEN"]))
        );
    }

    #[test]
    fn test_relay_config_debug_hides_token() {
        let relay = RelayConfig::new("123:secret", "42").unwrap();
        let debug = format!("{relay:?}");
        assert!(!debug.contains("secret"));
        assert!(debug.contains("42"));
    }
}
