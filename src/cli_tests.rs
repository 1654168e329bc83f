use std::path::PathBuf;

use super::*;

#[test]
fn cli_validate_defaults() {
    let cli = Cli::parse_from(["aocs", "validate"]);
    match cli.command {
        Commands::Validate(args) => {
            assert_eq!(args.path, PathBuf::from("."));
            assert_eq!(args.format, OutputFormat::Text);
            assert!(args.exclude.is_empty());
            assert!(!args.fix);
        }
        Commands::Init(_) => panic!("Expected Validate command"),
    }
}

#[test]
fn cli_validate_with_options() {
    let cli = Cli::parse_from([
        "aocs", "validate", "proj", "--format", "json", "-x", "vendor/**", "--exclude", "gen/**",
        "--fix",
    ]);
    match cli.command {
        Commands::Validate(args) => {
            assert_eq!(args.path, PathBuf::from("proj"));
            assert_eq!(args.format, OutputFormat::Json);
            assert_eq!(args.exclude, vec!["vendor/**", "gen/**"]);
            assert!(args.fix);
        }
        Commands::Init(_) => panic!("Expected Validate command"),
    }
}

#[test]
fn cli_validate_rejects_unknown_format() {
    assert!(Cli::try_parse_from(["aocs", "validate", "--format", "xml"]).is_err());
}

#[test]
fn cli_init_defaults() {
    let cli = Cli::parse_from(["aocs", "init"]);
    match cli.command {
        Commands::Init(args) => {
            assert_eq!(args.path, PathBuf::from("."));
            assert!(args.languages.is_empty());
            assert_eq!(args.mode, None);
            assert!(!args.yes);
            assert!(!args.force);
        }
        Commands::Validate(_) => panic!("Expected Init command"),
    }
}

#[test]
fn cli_init_with_languages_and_mode() {
    let cli = Cli::parse_from([
        "aocs", "init", "app", "--language", "python", "-l", "go", "--mode", "lite", "--yes",
        "--force",
    ]);
    match cli.command {
        Commands::Init(args) => {
            assert_eq!(args.path, PathBuf::from("app"));
            assert_eq!(args.languages, vec!["python", "go"]);
            assert_eq!(args.mode, Some(Mode::Lite));
            assert!(args.yes);
            assert!(args.force);
        }
        Commands::Validate(_) => panic!("Expected Init command"),
    }
}

#[test]
fn cli_init_rejects_unknown_mode() {
    assert!(Cli::try_parse_from(["aocs", "init", "--mode", "loose"]).is_err());
}

#[test]
fn cli_global_flags() {
    let cli = Cli::parse_from(["aocs", "validate", "-vv", "--quiet", "--color", "never"]);
    assert_eq!(cli.verbose, 2);
    assert!(cli.quiet);
    assert_eq!(cli.color, ColorChoice::Never);
}

#[test]
fn color_choice_maps_to_mode() {
    assert_eq!(ColorMode::from(ColorChoice::Always), ColorMode::Always);
    assert_eq!(ColorMode::from(ColorChoice::Auto), ColorMode::Auto);
}
