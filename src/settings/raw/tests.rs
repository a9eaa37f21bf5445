use std::path::PathBuf;

use clap::Parser;

use super::RawConfig;
use crate::cli::CliArgs;

#[test]
fn cli_overrides_take_precedence() {
    let mut cli = CliArgs::parse_from(["histmerge", "--limit", "9"]);
    cli.snapshot = Some(PathBuf::from("/tmp/history.json"));
    cli.host_filter = Some("https://example.com".into());
    cli.header = Some("header".into());
    cli.editable = Some(false);

    let mut config = RawConfig::default();
    config.suggestions.limit = Some(2);
    config.suggestions.editable = Some(true);
    config.apply_cli_overrides(&cli);

    assert_eq!(config.suggestions.limit, Some(9));
    assert_eq!(config.suggestions.host_filter, cli.host_filter);
    assert_eq!(config.suggestions.header, cli.header);
    assert_eq!(config.suggestions.editable, Some(false));
    assert_eq!(config.data.snapshot, cli.snapshot);
}

#[test]
fn resolve_fills_defaults() {
    let cli = CliArgs::parse_from(["histmerge", "--snapshot", "/tmp/history.json"]);
    let mut raw = RawConfig::default();
    raw.apply_cli_overrides(&cli);

    let config = raw.resolve(&cli).unwrap();

    assert_eq!(config.limit, 5);
    assert!(config.editable);
    assert_eq!(config.host_filter, None);
    assert_eq!(config.snapshot, PathBuf::from("/tmp/history.json"));
}

#[test]
fn resolve_rejects_zero_limit_from_cli() {
    let cli = CliArgs::parse_from(["histmerge", "--snapshot", "/tmp/h.json", "--limit", "0"]);
    let mut raw = RawConfig::default();
    raw.apply_cli_overrides(&cli);

    let message = raw.resolve(&cli).unwrap_err().to_string();

    assert!(message.contains("suggestions.limit"));
    assert!(message.contains("CLI flag `--limit`"));
}

#[test]
fn resolve_rejects_unparseable_host_filter_from_config() {
    let cli = CliArgs::parse_from(["histmerge", "--snapshot", "/tmp/h.json"]);
    let mut raw = RawConfig::default();
    raw.suggestions.host_filter = Some("example.com".into());
    raw.apply_cli_overrides(&cli);

    let message = raw.resolve(&cli).unwrap_err().to_string();

    assert!(message.contains("suggestions.host_filter"));
    assert!(message.contains("configuration key"));
}

#[test]
fn blank_header_is_dropped() {
    let cli = CliArgs::parse_from(["histmerge", "--snapshot", "/tmp/h.json", "--header", "  "]);
    let mut raw = RawConfig::default();
    raw.apply_cli_overrides(&cli);

    assert_eq!(raw.resolve(&cli).unwrap().header, None);
}
