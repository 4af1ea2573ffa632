use printing_system::config::{ConfigLoader, PageRange};
use printing_system::error::SystemError;
use std::io::Write;

#[test]
fn test_defaults_load_without_sources() {
    let config = ConfigLoader::new()
        .with_env_prefix("PRINTSIM_TEST_DEFAULTS_")
        .load()
        .unwrap();
    assert_eq!(config.students, 4);
    assert_eq!(config.documents_per_student, 5);
    assert_eq!(config.printer.paper_capacity, 250);
    assert_eq!(config.technicians.attempts, 3);
    assert_eq!(config.seed, None);
}

#[test]
fn test_toml_file_overrides_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
students = 6
seed = 42

[printer]
initial_paper = 100
refill_wait_ms = 250

[pages]
min = 2
max = 8
"#
    )
    .unwrap();

    let config = ConfigLoader::new()
        .with_config_path(file.path())
        .with_env_prefix("PRINTSIM_TEST_TOML_")
        .load()
        .unwrap();

    assert_eq!(config.students, 6);
    assert_eq!(config.seed, Some(42));
    assert_eq!(config.printer.initial_paper, 100);
    assert_eq!(config.printer.refill_wait_ms, 250);
    // Untouched fields keep their defaults.
    assert_eq!(config.printer.toner_full_level, 500);
    assert_eq!(config.pages, PageRange { min: 2, max: 8 });
}

#[test]
fn test_environment_overrides_nested_keys() {
    std::env::set_var("PRINTSIM_TEST_ENV_STUDENTS", "9");
    std::env::set_var("PRINTSIM_TEST_ENV_PRINTER__INITIAL_TONER", "300");

    let config = ConfigLoader::new()
        .with_env_prefix("PRINTSIM_TEST_ENV_")
        .load()
        .unwrap();

    assert_eq!(config.students, 9);
    assert_eq!(config.printer.initial_toner, 300);

    std::env::remove_var("PRINTSIM_TEST_ENV_STUDENTS");
    std::env::remove_var("PRINTSIM_TEST_ENV_PRINTER__INITIAL_TONER");
}

#[test]
fn test_deadlock_prone_file_is_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[pages]\nmin = 1\nmax = 50").unwrap();

    let result = ConfigLoader::new()
        .with_config_path(file.path())
        .with_env_prefix("PRINTSIM_TEST_DEADLOCK_")
        .load();

    assert!(matches!(result, Err(SystemError::InvalidSettings(_))));
}

#[test]
fn test_missing_file_is_an_error() {
    let result = ConfigLoader::new()
        .with_config_path("/nonexistent/printsim.toml")
        .with_env_prefix("PRINTSIM_TEST_MISSING_")
        .load();
    assert!(matches!(result, Err(SystemError::InvalidSettings(msg)) if msg.contains("does not exist")));
}

#[test]
fn test_malformed_value_is_a_config_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "students = \"many\"").unwrap();

    let result = ConfigLoader::new()
        .with_config_path(file.path())
        .with_env_prefix("PRINTSIM_TEST_MALFORMED_")
        .load();
    assert!(matches!(result, Err(SystemError::Config(_))));
}
