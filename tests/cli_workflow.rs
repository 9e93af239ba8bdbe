//! Cross-crate workflow: a configuration file and a CSV on disk, driven
//! through the command router as the binary would.

use std::io::Write;
use std::path::Path;

use clap::Parser;
use tabsight_cli::output::OutputStyle;
use tabsight_cli::{Cli, CommandRouter, Context};
use tempfile::TempDir;

fn write_fixture(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("people.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "Full Name,Birth Year,Team,Salary USD").unwrap();
    writeln!(file, "Ann,1990,Red,52000").unwrap();
    writeln!(file, "Bob,1985,Blue,61000").unwrap();
    writeln!(file, "Cy,2000,Green,39000").unwrap();
    writeln!(file, "Dee,1995,Red,").unwrap();
    path
}

fn run(args: &[&str]) -> String {
    let cli = Cli::try_parse_from(args.iter().copied()).unwrap();
    let config = CommandRouter::resolve_config(&cli).unwrap();
    let ctx = Context::new(config, OutputStyle::plain());
    let mut out = Vec::new();
    CommandRouter::route(&cli.command, &ctx, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

#[test]
fn ask_uses_sanitized_and_derived_columns() {
    let dir = tempfile::tempdir().unwrap();
    let data = path_arg(&write_fixture(&dir));
    let config = path_arg(&dir.path().join("absent.toml"));

    let answer = run(&[
        "tabsight",
        "--config",
        config.as_str(),
        "ask",
        data.as_str(),
        "what",
        "is",
        "the",
        "total",
        "salary",
    ]);
    assert_eq!(answer, "The total sum of 'salary_usd' is 152000\n");

    let profile = run(&[
        "tabsight",
        "--config",
        config.as_str(),
        "--json",
        "profile",
        data.as_str(),
    ]);
    let parsed: serde_json::Value = serde_json::from_str(&profile).unwrap();
    let names: Vec<&str> = parsed["column_types"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry[0].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["full_name", "birth_year", "team", "salary_usd", "age"]);
}

#[test]
fn config_file_changes_histogram_bins() {
    let dir = tempfile::tempdir().unwrap();
    let data = path_arg(&write_fixture(&dir));
    let config_path = dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        "[analysis]\nhistogram_bins = 4\n\n[output]\nformat = \"json\"\n",
    )
    .unwrap();
    let config = path_arg(&config_path);

    let rendered = run(&[
        "tabsight",
        "--config",
        config.as_str(),
        "ask",
        data.as_str(),
        "histogram",
        "of",
        "salary",
    ]);
    let parsed: serde_json::Value = serde_json::from_str(&rendered).unwrap();
    assert_eq!(parsed["chart"]["kind"], "histogram");
    assert_eq!(parsed["chart"]["data"]["bins"].as_array().unwrap().len(), 4);
}

#[test]
fn run_executes_serialized_intent() {
    let dir = tempfile::tempdir().unwrap();
    let data = path_arg(&write_fixture(&dir));
    let config = path_arg(&dir.path().join("absent.toml"));

    let rendered = run(&[
        "tabsight",
        "--config",
        config.as_str(),
        "run",
        data.as_str(),
        r#"{"action":"group_analyze","group_column":"team","value_column":null}"#,
    ]);
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines[0], "Count breakdown by 'team':");
    assert_eq!(lines[1].split_whitespace().collect::<Vec<_>>(), vec!["team", "count"]);
    assert_eq!(lines[3].split_whitespace().collect::<Vec<_>>(), vec!["Red", "2"]);
}

#[test]
fn spreadsheets_are_rejected_with_guidance() {
    let dir = tempfile::tempdir().unwrap();
    let config = path_arg(&dir.path().join("absent.toml"));
    let cli =
        Cli::try_parse_from(["tabsight", "--config", config.as_str(), "profile", "book.xlsx"])
            .unwrap();
    let ctx = Context::new(CommandRouter::resolve_config(&cli).unwrap(), OutputStyle::plain());

    let err = CommandRouter::route(&cli.command, &ctx, &mut Vec::new()).unwrap_err();
    assert!(err.user_message().contains("Unsupported file format 'xlsx'"));
}
