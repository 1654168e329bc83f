use super::*;

#[test]
fn log_level_follows_verbosity() {
    assert_eq!(log_level(0, false), "warn");
    assert_eq!(log_level(1, false), "info");
    assert_eq!(log_level(2, false), "debug");
    assert_eq!(log_level(5, false), "debug");
}

#[test]
fn quiet_only_logs_errors() {
    assert_eq!(log_level(2, true), "error");
}
