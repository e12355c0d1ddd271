use chrono::{Datelike, Local};
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{obl, setup_test_db, sheet, temp_out, write_sheet};

fn year() -> String {
    Local::now().year().to_string()
}

/// Init a DB and import one week (KW05) with two workers
fn init_with_week(name: &str) -> String {
    let db_path = setup_test_db(name);

    obl()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    let file = write_sheet(
        name,
        &sheet(
            5,
            &[
                "1. Ana;A1;A1;A1;A1;;;;;;;;;500;50;550;puntual",
                "2. Luis;B2;B2;;;;;;;;;;;400;;400;",
            ],
        ),
    );
    obl()
        .args(["--db", &db_path, "import", &file])
        .assert()
        .success()
        .stdout(contains(format!("Imported week {}-W05", year())))
        .stdout(contains("2 workers, 6 half-days"));

    db_path
}

#[test]
fn test_init_creates_database() {
    let db_path = setup_test_db("cli_init");

    obl()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("obralog initialization completed"));

    assert!(fs::metadata(&db_path).is_ok());
}

#[test]
fn test_reimport_asks_for_confirmation() {
    let db_path = init_with_week("cli_reimport_confirm");
    let file = write_sheet(
        "cli_reimport_confirm_v2",
        &sheet(5, &["1. Ana;C3;;;;;;;;;;;;700;;700;"]),
    );

    obl()
        .args(["--db", &db_path, "import", &file])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("already imported"))
        .stdout(contains("Import cancelled"));

    // the week still has its original content
    obl()
        .args(["--db", &db_path, "week", &year(), "5"])
        .assert()
        .success()
        .stdout(contains("Luis"));

    obl()
        .args(["--db", &db_path, "import", &file])
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(contains(format!("Replaced week {}-W05", year())));

    obl()
        .args(["--db", &db_path, "week", &year(), "5"])
        .assert()
        .success()
        .stdout(contains("C3").and(contains("B2").not()))
        // Luis is no longer on the sheet but stays listed with blank cells
        .stdout(contains("Luis"));
}

#[test]
fn test_force_reimport_skips_prompt() {
    let db_path = init_with_week("cli_force");
    let file = write_sheet("cli_force_v2", &sheet(5, &["1. Ana;A1;;;;;;;;;;;;;;;"]));

    obl()
        .args(["--db", &db_path, "import", &file, "--force"])
        .assert()
        .success()
        .stdout(contains("Replaced").and(contains("Confirm").not()));
}

#[test]
fn test_import_malformed_sheet_fails() {
    let db_path = init_with_week("cli_malformed");
    let file = write_sheet("cli_malformed_bad", ";semana\nnombre;a\n1. Ana;A1\n");

    obl()
        .args(["--db", &db_path, "import", &file])
        .assert()
        .failure()
        .stderr(contains("Malformed header"));
}

#[test]
fn test_weeks_and_week_view() {
    let db_path = init_with_week("cli_weeks");

    obl()
        .args(["--db", &db_path, "weeks"])
        .assert()
        .success()
        .stdout(contains(year()).and(contains("KW05")));

    obl()
        .args(["--db", &db_path, "week", &year(), "5"])
        .assert()
        .success()
        .stdout(contains("Ana"))
        .stdout(contains("A1"))
        .stdout(contains("puntual"))
        .stdout(contains("2 worker(s)"));

    obl()
        .args(["--db", &db_path, "week", &year(), "9"])
        .assert()
        .failure()
        .stderr(contains("Not found"));
}

#[test]
fn test_workers_and_worker_profile() {
    let db_path = init_with_week("cli_workers");

    obl()
        .args(["--db", &db_path, "workers"])
        .assert()
        .success()
        .stdout(contains("Ana").and(contains("Luis")));

    obl()
        .args(["--db", &db_path, "worker", "1", "--charts"])
        .assert()
        .success()
        .stdout(contains("Reliability"))
        .stdout(contains("Bonus chance"))
        .stdout(contains("Top sites"));

    obl()
        .args(["--db", &db_path, "worker", "42"])
        .assert()
        .failure()
        .stderr(contains("Not found"));
}

#[test]
fn test_settings_edits_and_duplicates() {
    let db_path = init_with_week("cli_settings");

    obl()
        .args(["--db", &db_path, "settings", "--cedula", "1=8-123-456"])
        .assert()
        .success()
        .stdout(contains("1 change(s) saved"));

    obl()
        .args([
            "--db",
            &db_path,
            "settings",
            "--cedula",
            "2=8-123-456",
            "--site-name",
            "1=Torre Norte",
        ])
        .assert()
        .failure()
        .stdout(contains("1 change(s) saved"))
        .stderr(contains("Duplicate value"));

    obl()
        .args(["--db", &db_path, "settings"])
        .assert()
        .success()
        .stdout(contains("8-123-456"))
        .stdout(contains("Torre Norte"));

    obl()
        .args(["--db", &db_path, "settings", "--cedula", "uno"])
        .assert()
        .failure()
        .stderr(contains("Invalid argument"));
}

#[test]
fn test_export_csv_json_xlsx() {
    let db_path = init_with_week("cli_export");

    let csv_out = temp_out("cli_export", "csv");
    obl()
        .args([
            "--db", &db_path, "export", "--year", &year(), "--kw", "5", "--format", "csv",
            "--file", &csv_out,
        ])
        .assert()
        .success()
        .stdout(contains("CSV export completed"));

    let content = fs::read_to_string(&csv_out).unwrap();
    assert!(content.starts_with("nombre,lunes_am,lunes_pm,martes_am"));
    assert!(content.contains("Ana,A1,A1,A1,A1"));
    assert!(content.contains("500,50,550,puntual"));

    let json_out = temp_out("cli_export", "json");
    obl()
        .args([
            "--db", &db_path, "export", "--year", &year(), "--kw", "5", "--format", "json",
            "--file", &json_out,
        ])
        .assert()
        .success();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_out).unwrap()).unwrap();
    assert_eq!(json["week_number"], 5);
    assert_eq!(json["workers"][0]["name"], "Ana");
    assert_eq!(json["workers"][1]["salario"], "400");

    let xlsx_out = temp_out("cli_export", "xlsx");
    obl()
        .args([
            "--db", &db_path, "export", "--year", &year(), "--kw", "5", "--format", "xlsx",
            "--file", &xlsx_out,
        ])
        .assert()
        .success();
    assert!(fs::metadata(&xlsx_out).unwrap().len() > 0);

    // existing file without --force asks; "n" keeps it
    obl()
        .args([
            "--db", &db_path, "export", "--year", &year(), "--kw", "5", "--format", "csv",
            "--file", &csv_out,
        ])
        .write_stdin("n\n")
        .assert()
        .failure()
        .stderr(contains("export cancelled"));
}

#[test]
fn test_log_and_db_info() {
    let db_path = init_with_week("cli_log");

    obl()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("import").and(contains("migration_applied")));

    obl()
        .args(["--db", &db_path, "db", "--info", "--check"])
        .assert()
        .success()
        .stdout(contains("Weeks"))
        .stdout(contains(format!("first: {}-W05", year())))
        .stdout(contains("Integrity check passed"));

    obl()
        .args(["--db", &db_path, "db", "--migrate", "--vacuum"])
        .assert()
        .success()
        .stdout(contains("Schema is up to date"))
        .stdout(contains("Database compacted"));
}
