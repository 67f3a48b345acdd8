use markpane::config::{load_config_flags, parse_flag_tokens, ThemeMode};

#[test]
fn test_config_file_parsing_ignores_comments_and_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".markpanerc");
    let content = r"
# comment
--theme light

--wrap=72

";
    std::fs::write(&path, content).unwrap();

    let flags = load_config_flags(&path).unwrap();
    assert_eq!(flags.theme, Some(ThemeMode::Light));
    assert_eq!(flags.wrap, Some(72));
}

#[test]
fn test_cli_flags_override_file_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".markpanerc");
    let content = "--theme light\n--wrap 100\n";
    std::fs::write(&path, content).unwrap();

    let file_flags = load_config_flags(&path).unwrap();
    let cli_args = vec![
        "markpane".to_string(),
        "--theme".to_string(),
        "dark".to_string(),
    ];
    let cli_flags = parse_flag_tokens(&cli_args);

    let effective = file_flags.union(&cli_flags);
    assert_eq!(
        effective.theme,
        Some(ThemeMode::Dark),
        "cli should override theme"
    );
    assert_eq!(
        effective.wrap,
        Some(100),
        "file config should be preserved when CLI does not override"
    );
}

#[test]
fn test_parse_flag_tokens_handles_equals_syntax() {
    let args = vec!["markpane".to_string(), "--theme=dark".to_string()];
    let flags = parse_flag_tokens(&args);
    assert_eq!(flags.theme, Some(ThemeMode::Dark));
}

#[test]
fn test_local_override_wins_over_global() {
    let dir = tempfile::tempdir().unwrap();
    let global = dir.path().join("config");
    let local = dir.path().join(".markpanerc");
    std::fs::write(&global, "--theme dark\n--wrap 120\n").unwrap();
    std::fs::write(&local, "--theme light\n").unwrap();

    let merged = load_config_flags(&global)
        .unwrap()
        .union(&load_config_flags(&local).unwrap());
    assert_eq!(merged.theme, Some(ThemeMode::Light));
    assert_eq!(merged.wrap, Some(120));
}
