use chrono::Utc;
use propsim_core::{run_simulation, ScriptedOutcomes, SimulationParameters, SimulationResult};
use propsim_runner::reporting::reports::MarkdownReportGenerator;
use propsim_runner::reporting::{export_batch_with_report, export_run_with_report, ArtifactManager};
use propsim_runner::{run_batch, RunConfig, SimulationRun, SCHEMA_VERSION};

fn make_run(run_id: &str, result: SimulationResult) -> SimulationRun {
    SimulationRun {
        schema_version: SCHEMA_VERSION,
        run_id: run_id.to_string(),
        seed: 42,
        timestamp: Utc::now(),
        duration_secs: 0.01,
        result,
    }
}

fn all_win_result(accounts: usize) -> SimulationResult {
    let params = SimulationParameters {
        win_rate: 1.0,
        accounts,
        ..Default::default()
    };
    run_simulation(&params, &mut ScriptedOutcomes::from_wins(&[true])).unwrap()
}

/// Account 1 switches out after two losses, account 2 wins once, then the
/// budget runs out: series of length 2 and 1.
fn uneven_result() -> SimulationResult {
    let params = SimulationParameters {
        win_rate: 0.5,
        accounts: 2,
        max_trades: 3,
        ..Default::default()
    };
    run_simulation(
        &params,
        &mut ScriptedOutcomes::from_wins(&[false, false, true]),
    )
    .unwrap()
}

#[test]
fn test_artifact_manager_exports() {
    let temp_dir = tempfile::tempdir().unwrap();
    let manager = ArtifactManager::new(temp_dir.path()).unwrap();
    let run = make_run("artifact_test_run", all_win_result(2));

    let paths = manager.save_run(&run).unwrap();
    assert!(paths.manifest.exists());
    assert!(paths.result_json.exists());
    assert!(paths.trades_csv.exists());
    assert!(paths.cumulative_profit_csv.exists());
    assert!(paths.report_markdown.is_none());
    assert_eq!(
        paths.manifest.parent().unwrap(),
        temp_dir.path().join("artifact_test_run")
    );
}

#[test]
fn test_trades_csv_contents() {
    let temp_dir = tempfile::tempdir().unwrap();
    let manager = ArtifactManager::new(temp_dir.path()).unwrap();
    let run = make_run("trades_csv", all_win_result(2));

    let paths = manager.save_run(&run).unwrap();
    let text = std::fs::read_to_string(&paths.trades_csv).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "account,trade,balance,result,risk,cumulative_profit");
    assert_eq!(lines.len(), 1 + run.result.trades.len());
    assert_eq!(lines[1], "1,1,25500.00,Win,1.00%,2.00%");
    // Second account starts its own numbering at 1.
    assert!(lines[6].starts_with("2,1,"));
}

#[test]
fn test_cumulative_profit_csv_is_padded() {
    let temp_dir = tempfile::tempdir().unwrap();
    let manager = ArtifactManager::new(temp_dir.path()).unwrap();
    let run = make_run("profit_csv", uneven_result());

    let paths = manager.save_run(&run).unwrap();
    let text = std::fs::read_to_string(&paths.cumulative_profit_csv).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "trade,account_1,account_2");
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("1,-1.0000,"));
    assert!(lines[2].ends_with(','), "padding cell should be empty: {}", lines[2]);
}

#[test]
fn test_result_json_loads_back() {
    let temp_dir = tempfile::tempdir().unwrap();
    let manager = ArtifactManager::new(temp_dir.path()).unwrap();
    let run = make_run("json_roundtrip", uneven_result());

    let paths = manager.save_run(&run).unwrap();
    let json = std::fs::read_to_string(&paths.result_json).unwrap();
    let back: SimulationRun = serde_json::from_str(&json).unwrap();

    assert_eq!(back.run_id, "json_roundtrip");
    assert_eq!(back.result.trades, run.result.trades);
    assert_eq!(back.result.status, run.result.status);

    let manifest: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&paths.manifest).unwrap()).unwrap();
    assert_eq!(manifest["seed"], 42);
    assert_eq!(manifest["total_trades"], 3);
    assert_eq!(manifest["status"]["status"], "budget_exhausted");
}

#[test]
fn test_export_with_markdown_report() {
    let temp_dir = tempfile::tempdir().unwrap();
    let run = make_run("report_test_run", all_win_result(3));

    let paths = export_run_with_report(temp_dir.path(), &run, true).unwrap();
    let report_path = paths.report_markdown.expect("report path");
    let report = std::fs::read_to_string(report_path).unwrap();

    assert!(report.contains("# Propsim Run Report"));
    assert!(report.contains("report_test_run"));
    assert!(report.contains("- Status: converged"));
    assert!(report.contains("| Account | Final Balance |"));
    assert_eq!(report.matches("\n| ").count(), 1 + 3);
}

#[test]
fn test_markdown_report_for_budget_exhausted_run() {
    let run = make_run("capped", uneven_result());
    let report = MarkdownReportGenerator.generate(&run);
    assert!(report.contains("budget exhausted (0 accounts complete)"));
    assert!(!report.contains("Mean Trades to Target"));
}

#[test]
fn test_batch_export() {
    let temp_dir = tempfile::tempdir().unwrap();
    let mut config = RunConfig::default();
    config.run.seed = Some(8);
    config.simulation.accounts = 2;

    let batch = run_batch(&config, 5).unwrap();
    let paths = export_batch_with_report(temp_dir.path(), &batch, true).unwrap();

    assert!(paths.batch_json.exists());
    assert!(paths
        .batch_json
        .parent()
        .unwrap()
        .ends_with(format!("batch-{}", batch.run_id)));

    let report = std::fs::read_to_string(paths.report_markdown.unwrap()).unwrap();
    assert!(report.contains("# Propsim Batch Report"));
    assert!(report.contains("- Runs: 5"));

    let json = std::fs::read_to_string(&paths.batch_json).unwrap();
    let back: propsim_runner::BatchResult = serde_json::from_str(&json).unwrap();
    assert_eq!(back.runs, batch.runs);
}
