//! Unit tests for the demo command line

use super::*;
use clap::CommandFactory;
use heartcare_scene::heartcare::Error;

#[test]
fn test_cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn test_cli_defaults() {
    let cli = Cli::try_parse_from(["heartcare_demo"]).unwrap();
    assert!(cli.config.is_none());
    assert_eq!(cli.frames, DEFAULT_FRAMES);
    assert!(cli.seed.is_none());
    assert!(!cli.dump_config);
}

#[test]
fn test_cli_flags() {
    let cli = Cli::try_parse_from([
        "heartcare_demo", "scene.toml", "--frames", "30", "--seed", "7", "--dump-config",
    ])
    .unwrap();
    assert_eq!(cli.config, Some(PathBuf::from("scene.toml")));
    assert_eq!(cli.frames, 30);
    assert_eq!(cli.seed, Some(7));
    assert!(cli.dump_config);
}

#[test]
fn test_cli_rejects_bad_frame_count() {
    assert!(Cli::try_parse_from(["heartcare_demo", "--frames", "many"]).is_err());
}

#[test]
fn test_missing_config_file_is_invalid_config() {
    let result = load_config(Some(Path::new("/nonexistent/heartcare/scene.toml")));
    assert!(matches!(result, Err(Error::InvalidConfig(_))));
}

#[test]
fn test_run_short_session_is_balanced() {
    let cli = Cli::try_parse_from(["heartcare_demo", "--frames", "12", "--seed", "3"]).unwrap();
    assert!(run(&cli).is_ok());
}
