use std::path::PathBuf;

use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["grogdb-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_run_without_flags() {
    let cli = Cli::try_parse_from(["grogdb-cli", "run"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Run {
            input: None,
            corrections: None,
            output: None,
            dry_run: false
        })
    ));
}

#[test]
fn parses_run_dry_run() {
    let cli =
        Cli::try_parse_from(["grogdb-cli", "run", "--dry-run"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Run { dry_run: true, .. })
    ));
}

#[test]
fn parses_run_path_overrides() {
    let cli = Cli::try_parse_from([
        "grogdb-cli",
        "run",
        "--input",
        "raw.json",
        "--corrections",
        "fixes.json",
        "--output",
        "out.json",
    ])
    .expect("expected valid cli args");

    match cli.command {
        Some(Commands::Run {
            input,
            corrections,
            output,
            dry_run,
        }) => {
            assert_eq!(input, Some(PathBuf::from("raw.json")));
            assert_eq!(corrections, Some(PathBuf::from("fixes.json")));
            assert_eq!(output, Some(PathBuf::from("out.json")));
            assert!(!dry_run);
        }
        other => panic!("expected run command, got {other:?}"),
    }
}

#[test]
fn parses_inspect_stockcode() {
    let cli =
        Cli::try_parse_from(["grogdb-cli", "inspect", "912345"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Inspect {
            ref stockcode,
            input: None,
            corrections: None,
        }) if stockcode == "912345"
    ));
}

#[test]
fn inspect_requires_stockcode() {
    assert!(Cli::try_parse_from(["grogdb-cli", "inspect"]).is_err());
}

#[test]
fn unknown_subcommand_is_rejected() {
    assert!(Cli::try_parse_from(["grogdb-cli", "collect"]).is_err());
}
