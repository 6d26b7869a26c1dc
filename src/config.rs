//! Configuration loading

use config::{Config, ConfigError, Environment, File};

use crate::domain::subscription::SubscriptionPolicy;

/// Load the subscription policy
///
/// Reads the optional `config/subscription` file, then `LIBRARY_`-prefixed environment
/// variables such as `LIBRARY_BASIC_GRACE_DAYS`. Keys set nowhere keep their default value.
/// Grace periods outside `0..=MAX_GRACE_DAYS` and negative fines are rejected.
pub fn load_policy() -> Result<SubscriptionPolicy, ConfigError> {
    load_policy_from(Environment::with_prefix("LIBRARY"))
}

fn load_policy_from(environment: Environment) -> Result<SubscriptionPolicy, ConfigError> {
    let config = Config::builder()
        .add_source(File::with_name("config/subscription").required(false))
        .add_source(environment.try_parsing(true))
        .build()?;

    let policy: SubscriptionPolicy = config.try_deserialize()?;
    policy
        .validate()
        .map_err(|err| ConfigError::Message(err.to_string()))?;
    tracing::debug!(?policy, "loaded subscription policy");
    Ok(policy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::subscription::MAX_GRACE_DAYS;
    use rstest::*;
    use speculoos::prelude::*;

    fn environment(vars: &[(&str, &str)]) -> Environment {
        let source = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect::<config::Map<String, String>>();
        Environment::with_prefix("LIBRARY").source(Some(source))
    }

    #[test]
    fn test_load_policy_env_override() {
        // Only this test touches the process environment
        std::env::set_var("LIBRARY_EXPIRED_OVERDUE_FINE", "250");
        let res = load_policy();
        std::env::remove_var("LIBRARY_EXPIRED_OVERDUE_FINE");

        assert_that!(res).is_ok_containing(SubscriptionPolicy {
            expired_overdue_fine: 250,
            ..SubscriptionPolicy::default()
        });
    }

    #[test]
    fn test_partial_override() {
        let res = load_policy_from(environment(&[
            ("LIBRARY_OVERDUE_FINE", "150"),
            ("LIBRARY_BASIC_GRACE_DAYS", "30"),
            ("OTHER_OVERDUE_FINE", "1"),
        ]));

        assert_that!(res).is_ok_containing(SubscriptionPolicy {
            overdue_fine: 150,
            basic_grace_days: 30,
            ..SubscriptionPolicy::default()
        });
    }

    #[test]
    fn test_defaults() {
        let res = load_policy_from(environment(&[]));

        assert_that!(res).is_ok_containing(SubscriptionPolicy::default());
    }

    #[test]
    fn test_accepts_longest_grace_period() {
        let longest = MAX_GRACE_DAYS.to_string();
        let res = load_policy_from(environment(&[(
            "LIBRARY_PREMIUM_GRACE_DAYS",
            longest.as_str(),
        )]));

        assert_that!(res)
            .is_ok()
            .matches(|policy| policy.premium_grace_days == MAX_GRACE_DAYS);
    }

    #[rstest]
    #[case::negative_grace("LIBRARY_BASIC_GRACE_DAYS", "-500")]
    #[case::overflowing_grace("LIBRARY_PREMIUM_GRACE_DAYS", "9223372036854775807")]
    #[case::too_long_grace("LIBRARY_STANDARD_GRACE_DAYS", "36501")]
    #[case::negative_fine("LIBRARY_OVERDUE_FINE", "-5")]
    #[case::negative_expired_fine("LIBRARY_EXPIRED_OVERDUE_FINE", "-200")]
    fn test_rejects_invalid_value(#[case] key: &str, #[case] value: &str) {
        let res = load_policy_from(environment(&[(key, value)]));

        assert_that!(res).is_err();
    }
}
