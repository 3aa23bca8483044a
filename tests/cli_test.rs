use assert_cmd::Command;
use indoc::indoc;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

const PLAYERS: &str = indoc! {"
    name,team,position,season,goals,assists,appearances,market_value
    Kane,Bayern,Forward,2023/24,36,8,32,110
    Guirassy,Stuttgart,Forward,2023/24,28,2,28,40
    Openda,Leipzig,Forward,2023/24,24,7,34,45
    Undav,Stuttgart,Forward,2023/24,18,10,30,25
    Neuer,Bayern,Goalkeeper,2023/24,,,29,4
"};

fn setup() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("players.csv"), PLAYERS).unwrap();
    dir
}

fn tiermap(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tiermap").unwrap();
    cmd.current_dir(dir.path()).env_remove("RUST_LOG");
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output).unwrap()
}

#[test]
fn test_rank_csv_output() {
    let dir = setup();
    let stdout = stdout_of(tiermap(&dir).args(["rank", "players.csv", "--format", "csv"]));
    let lines: Vec<&str> = stdout.lines().collect();

    assert_eq!(
        lines[0],
        "name,team,position_group,season,composite_score,tier,group_rank,global_rank"
    );
    assert!(lines[1].starts_with("Kane,Bayern,Forward,2023/24,"));
    assert!(lines[1].ends_with(",Elite,1,1"));
    // The lone goalkeeper is skipped, not ranked.
    assert_eq!(lines.len(), 5);
}

#[test]
fn test_rank_json_output_reports_skipped_groups() {
    let dir = setup();
    let stdout = stdout_of(tiermap(&dir).args(["rank", "players.csv", "-f", "json", "--summary"]));
    let json: Value = serde_json::from_str(&stdout).unwrap();

    let records = json["records"].as_array().unwrap();
    assert_eq!(records.len(), 4);
    assert_eq!(records[0]["name"], "Kane");
    assert_eq!(records[0]["group_rank"], 1);
    assert!(records[0]["breakdown"].as_array().unwrap().len() == 4);

    let failures = json["failures"].as_array().unwrap();
    assert_eq!(failures[0]["group"], "Goalkeeper");
    assert_eq!(failures[0]["kind"], "insufficient_data");

    assert!(json["summary"].as_array().is_some());
}

#[test]
fn test_rank_terminal_output() {
    let dir = setup();
    let stdout = stdout_of(tiermap(&dir).args(["rank", "players.csv"]));

    assert!(stdout.contains("Forward (4 players)"), "{stdout}");
    assert!(stdout.contains("Kane"));
    assert!(stdout.contains("Skipped Goalkeeper"));
}

#[test]
fn test_rank_group_and_top_filters() {
    let dir = setup();
    let stdout = stdout_of(tiermap(&dir).args([
        "rank",
        "players.csv",
        "--format",
        "csv",
        "--group",
        "Forward",
        "--top",
        "2",
        "--no-parallel",
    ]));

    assert_eq!(stdout.lines().count(), 3);
}

#[test]
fn test_rank_writes_output_file() {
    let dir = setup();
    tiermap(&dir)
        .args(["rank", "players.csv", "-f", "json", "-o", "ranked.json", "-j", "2"])
        .assert()
        .success();

    let written = fs::read_to_string(dir.path().join("ranked.json")).unwrap();
    let json: Value = serde_json::from_str(&written).unwrap();
    assert_eq!(json["records"].as_array().unwrap().len(), 4);
}

#[test]
fn test_rank_missing_input_fails() {
    let dir = setup();
    tiermap(&dir).args(["rank", "absent.csv"]).assert().failure();
}

#[test]
fn test_rank_with_invalid_config_fails() {
    let dir = setup();
    fs::write(
        dir.path().join("tiermap.toml"),
        indoc! {r#"
            [profiles.Forward]
            metrics = [{ name = "goals", weight = 0.5 }]
        "#},
    )
    .unwrap();

    tiermap(&dir).args(["rank", "players.csv"]).assert().failure();
}

#[test]
fn test_init_then_validate() {
    let dir = TempDir::new().unwrap();
    tiermap(&dir).arg("init").assert().success();
    assert!(dir.path().join("tiermap.toml").is_file());

    // A second init refuses to overwrite without --force.
    tiermap(&dir).arg("init").assert().failure();
    tiermap(&dir).args(["init", "--force"]).assert().success();

    let stdout = stdout_of(tiermap(&dir).arg("validate"));
    assert!(stdout.contains("is valid (4 position profiles"), "{stdout}");
}

#[test]
fn test_validate_lists_problems() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("bad.toml"),
        indoc! {r#"
            min_cohort_size = 0

            [profiles.Forward]
            metrics = [{ name = "goals", weight = 0.5 }]
        "#},
    )
    .unwrap();

    let output = tiermap(&dir)
        .args(["validate", "--config", "bad.toml"])
        .assert()
        .failure()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).unwrap();
    assert!(stdout.contains("has 2 problem(s)"), "{stdout}");
}

#[test]
fn test_compare_players() {
    let dir = setup();
    let stdout = stdout_of(tiermap(&dir).args(["compare", "players.csv", "Openda", "Kane"]));

    assert!(stdout.starts_with("Forward comparison"));
    assert!(stdout.contains("Winner: Kane"), "{stdout}");
    assert!(stdout.contains("goals"));
}

#[test]
fn test_compare_across_groups_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("players.csv"),
        indoc! {"
            name,team,position,goals,assists,appearances,market_value,clean_sheets
            A,X,Forward,1,1,1,1,
            B,X,Forward,2,2,2,2,
            C,X,Forward,3,3,3,3,
            D,X,Defender,1,1,1,1,1
            E,X,Defender,2,2,2,2,2
            F,X,Defender,3,3,3,3,3
        "},
    )
    .unwrap();

    tiermap(&dir)
        .args(["compare", "players.csv", "A", "D"])
        .assert()
        .failure();
}

#[test]
fn test_squad_breakdown() {
    let dir = setup();
    let stdout = stdout_of(tiermap(&dir).args(["squad", "players.csv", "Stuttgart"]));

    assert!(stdout.starts_with("Stuttgart squad (2 ranked players)"), "{stdout}");
    assert!(stdout.contains("Forward (2)"));
    assert!(stdout.contains("Top: Undav"), "{stdout}");
}

#[test]
fn test_squad_json_and_unknown_team() {
    let dir = setup();
    let stdout = stdout_of(tiermap(&dir).args(["squad", "players.csv", "Bayern", "--json"]));
    let json: Value = serde_json::from_str(&stdout).unwrap();

    // Neuer's goalkeeper group is skipped, so only Kane is ranked.
    assert_eq!(json["squad_size"], 1);
    assert_eq!(json["positions"][0]["top_performer"]["name"], "Kane");
    assert_eq!(json["positions"][0]["metric_totals"]["goals"], 36.0);

    tiermap(&dir)
        .args(["squad", "players.csv", "Dortmund"])
        .assert()
        .failure();
}
