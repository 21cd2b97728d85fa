use calamine::Data;

use je_analyzer::analysis::analyze_workbook;
use je_analyzer::config::AnalyzerConfig;
use je_analyzer::excel::loader::build_sheet;
use je_analyzer::excel::Workbook;
use je_analyzer::report::write_reports;

fn header(cells: &[&str]) -> Vec<Data> {
    cells.iter().map(|c| Data::String((*c).to_string())).collect()
}

/// A workbook with one Benford-eligible amount column, one numeric column
/// below the eligibility threshold, a date column, and a text column.
fn sample_workbook() -> Workbook {
    let mut rows = vec![header(&["Amount", "Batch", "Posted", "Account"])];
    for i in 0..20i64 {
        rows.push(vec![
            Data::Float((100 + i * 37) as f64),
            if i < 3 { Data::Int(i + 1) } else { Data::Empty },
            Data::String(format!("2024-01-{:02}", i + 1)),
            Data::String(if i % 2 == 0 { "cash" } else { "revenue" }.to_string()),
        ]);
    }
    let entries = build_sheet("Entries", &rows).unwrap();

    let totals = build_sheet(
        "Totals",
        &[
            header(&["Net"]),
            vec![Data::Float(512.0)],
            vec![Data::Float(-64.0)],
        ],
    )
    .unwrap();

    Workbook {
        file_name: "je_samples.xlsx".to_string(),
        sheets: vec![entries, totals],
    }
}

#[test]
fn end_to_end_report_files_and_contents() {
    let workbook = sample_workbook();
    let report = analyze_workbook(&workbook, &AnalyzerConfig::default());
    let dir = tempfile::tempdir().unwrap();
    write_reports(dir.path(), &report).unwrap();

    for name in [
        "summary.json",
        "summary.md",
        "column_stats.csv",
        "describe_entries.csv",
        "describe_totals.csv",
        "benford_summary.csv",
        "index.md",
    ] {
        assert!(dir.path().join(name).exists(), "missing {}", name);
    }

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("summary.json")).unwrap())
            .unwrap();
    let entries = &json["Entries"];
    assert_eq!(entries["row_count"], 20);
    assert_eq!(entries["column_count"], 4);
    assert_eq!(entries["column_stats"].as_array().unwrap().len(), 4);

    // batch: 3 values out of 20 rows.
    let batch = &entries["column_stats"][1];
    assert_eq!(batch["count"], 3);
    assert_eq!(batch["null_count"], 17);

    let posted = &entries["column_stats"][2];
    assert_eq!(posted["date_range"]["min"], "2024-01-01T00:00:00");
    assert_eq!(posted["date_range"]["max"], "2024-01-20T00:00:00");

    // column_stats.csv covers every (sheet, column) pair exactly once.
    let stats_csv = std::fs::read_to_string(dir.path().join("column_stats.csv")).unwrap();
    assert_eq!(stats_csv.lines().count(), 1 + 4 + 1);

    // Only the eligible amount column appears in benford_summary.csv:
    // "batch" has 3 eligible values and "net" only 2.
    let benford_csv = std::fs::read_to_string(dir.path().join("benford_summary.csv")).unwrap();
    let lines: Vec<&str> = benford_csv.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("sheet,column,total_values,chi_square,digit_1"));
    assert!(lines[1].starts_with("Entries,amount,20,"));
}

#[test]
fn observed_digit_counts_reach_the_csv() {
    let sheet = build_sheet(
        "s",
        &[
            header(&["v"]),
            vec![Data::Float(123.0)],
            vec![Data::Float(456.0)],
            vec![Data::Float(789.0)],
        ],
    )
    .unwrap();
    let workbook = Workbook {
        file_name: "t.xlsx".to_string(),
        sheets: vec![sheet],
    };
    let config = AnalyzerConfig {
        benford_min_samples: 3,
    };
    let report = analyze_workbook(&workbook, &config);

    assert_eq!(report.benford.len(), 1);
    let result = &report.benford[0];
    assert_eq!(result.observed, [1, 0, 0, 1, 0, 0, 1, 0, 0]);

    let dir = tempfile::tempdir().unwrap();
    write_reports(dir.path(), &report).unwrap();
    let csv = std::fs::read_to_string(dir.path().join("benford_summary.csv")).unwrap();
    let row = csv.lines().nth(1).unwrap();
    assert!(row.ends_with("1,0,0,1,0,0,1,0,0"), "row = {}", row);
}

#[test]
fn reruns_produce_byte_identical_reports() {
    let workbook = sample_workbook();
    let config = AnalyzerConfig::default();

    let first = tempfile::tempdir().unwrap();
    write_reports(first.path(), &analyze_workbook(&workbook, &config)).unwrap();
    let second = tempfile::tempdir().unwrap();
    write_reports(second.path(), &analyze_workbook(&workbook, &config)).unwrap();

    for name in ["summary.json", "benford_summary.csv", "column_stats.csv"] {
        let a = std::fs::read(first.path().join(name)).unwrap();
        let b = std::fs::read(second.path().join(name)).unwrap();
        assert_eq!(a, b, "{} differs between runs", name);
    }
}

#[test]
fn output_directory_is_regenerated_not_merged() {
    let workbook = sample_workbook();
    let report = analyze_workbook(&workbook, &AnalyzerConfig::default());

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("reports");
    std::fs::create_dir_all(&out).unwrap();
    std::fs::write(out.join("stale.txt"), "leftover").unwrap();

    write_reports(&out, &report).unwrap();
    assert!(!out.join("stale.txt").exists());
    assert!(out.join("summary.json").exists());
}

#[test]
fn no_eligible_columns_still_writes_an_empty_benford_table() {
    let sheet = build_sheet(
        "s",
        &[header(&["note"]), vec![Data::String("only text".into())]],
    )
    .unwrap();
    let workbook = Workbook {
        file_name: "t.xlsx".to_string(),
        sheets: vec![sheet],
    };
    let report = analyze_workbook(&workbook, &AnalyzerConfig::default());
    assert!(report.benford.is_empty());

    let dir = tempfile::tempdir().unwrap();
    write_reports(dir.path(), &report).unwrap();
    let csv = std::fs::read_to_string(dir.path().join("benford_summary.csv")).unwrap();
    assert_eq!(csv.lines().count(), 1);
}
