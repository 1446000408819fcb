use super::*;

// =============================================================================
// parse_backend
// =============================================================================

#[test]
fn backend_defaults_to_postgres_with_url() {
    let backend = parse_backend(None, Some("postgres://localhost/chat".into())).unwrap();
    assert_eq!(backend, StoreBackend::Postgres { database_url: "postgres://localhost/chat".into() });
}

#[test]
fn backend_postgres_without_url_is_error() {
    assert_eq!(parse_backend(Some("postgres"), None), Err(ConfigError::MissingDatabaseUrl));
    assert_eq!(parse_backend(None, Some("  ".into())), Err(ConfigError::MissingDatabaseUrl));
}

#[test]
fn backend_memory_ignores_url() {
    assert_eq!(parse_backend(Some("memory"), None), Ok(StoreBackend::Memory));
    assert_eq!(parse_backend(Some(" MEMORY "), Some("postgres://x".into())), Ok(StoreBackend::Memory));
}

#[test]
fn backend_unknown_is_error() {
    assert_eq!(
        parse_backend(Some("mongo"), None),
        Err(ConfigError::UnknownBackend("mongo".into()))
    );
}

// =============================================================================
// parse_sweep_interval
// =============================================================================

#[test]
fn sweep_interval_zero_is_rejected() {
    assert_eq!(parse_sweep_interval(0), Err(ConfigError::ZeroSweepInterval));
}

#[test]
fn sweep_interval_positive_is_seconds() {
    assert_eq!(parse_sweep_interval(1), Ok(Duration::from_secs(1)));
    assert_eq!(parse_sweep_interval(15), Ok(Duration::from_secs(15)));
}

// =============================================================================
// env helpers
// =============================================================================

#[test]
fn env_parse_missing_returns_default() {
    let val: u64 = env_parse("__TEST_PARLOR_MISSING_KEY__", 42);
    assert_eq!(val, 42);
}

#[test]
fn env_parse_present_invalid_returns_default() {
    unsafe { std::env::set_var("__TEST_PARLOR_INVALID__", "soon") };
    let val: u64 = env_parse("__TEST_PARLOR_INVALID__", 7);
    assert_eq!(val, 7);
    unsafe { std::env::remove_var("__TEST_PARLOR_INVALID__") };
}

#[test]
fn env_bool_accepts_common_spellings() {
    unsafe { std::env::set_var("__TEST_PARLOR_BOOL_ON__", "Yes") };
    unsafe { std::env::set_var("__TEST_PARLOR_BOOL_OFF__", "0") };
    unsafe { std::env::set_var("__TEST_PARLOR_BOOL_BAD__", "maybe") };
    assert_eq!(env_bool("__TEST_PARLOR_BOOL_ON__"), Some(true));
    assert_eq!(env_bool("__TEST_PARLOR_BOOL_OFF__"), Some(false));
    assert_eq!(env_bool("__TEST_PARLOR_BOOL_BAD__"), None);
    unsafe {
        std::env::remove_var("__TEST_PARLOR_BOOL_ON__");
        std::env::remove_var("__TEST_PARLOR_BOOL_OFF__");
        std::env::remove_var("__TEST_PARLOR_BOOL_BAD__");
    }
}

#[test]
fn default_config_matches_constants() {
    let config = ChatConfig::default();
    assert_eq!(config.port, DEFAULT_PORT);
    assert_eq!(config.sweep_interval, Duration::from_secs(15));
    assert_eq!(config.idle_threshold, Duration::from_secs(10));
    assert!(!config.announce_presence);
}
