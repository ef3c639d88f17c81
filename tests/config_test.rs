use course_catalog::config::{Config, DEFAULT_BIND_ADDR, MEMORY_STORE};
use course_catalog::error::AppError;

#[test]
fn test_trailing_slash_is_stripped() {
    let config = Config::new("https://catalog-demo.example.com/ ", DEFAULT_BIND_ADDR).unwrap();
    assert_eq!(config.database_url, "https://catalog-demo.example.com");
    assert_eq!(config.bind_addr.port(), 3000);
    assert!(!config.uses_memory_store());
}

#[test]
fn test_memory_store_selector() {
    let config = Config::new(MEMORY_STORE, "0.0.0.0:8080").unwrap();
    assert!(config.uses_memory_store());
    assert_eq!(config.bind_addr.port(), 8080);
}

#[test]
fn test_invalid_values_are_config_errors() {
    assert!(matches!(Config::new("", DEFAULT_BIND_ADDR), Err(AppError::Config(_))));
    assert!(matches!(Config::new("http://x", "not-an-addr"), Err(AppError::Config(_))));
}
