use obralog::core::import::ImportLogic;
use obralog::core::stats::{StatsLogic, score_window};
use obralog::core::weeks::WeekLogic;
use obralog::core::workers::WorkerLogic;
use obralog::db::queries;
use obralog::errors::AppError;
use obralog::models::week::YearWeeks;
use obralog::models::worker_stats::WeekSample;

mod common;
use common::{import, open_db, sheet};

const FULL_WEEK_ANA: &str = "1. Ana;A1;A1;A1;A1;A1;A1;A1;A1;A1;A1;A1;A1;1000;250;1250;";
const FULL_WEEK_ANA_NO_BONUS: &str = "1. Ana;A1;A1;A1;A1;A1;A1;A1;A1;A1;A1;A1;A1;1000;;1000;";

fn sample(days: f64, salario: i64, bonus: i64) -> WeekSample {
    WeekSample {
        days,
        salario,
        bonus,
    }
}

#[test]
fn test_score_window_values() {
    assert_eq!(score_window(&[]), (1, 0));
    assert_eq!(score_window(&[sample(0.0, 0, 0)]), (1, 0));
    assert_eq!(score_window(&[sample(6.0, 1000, 1000)]), (5, 100));
    assert_eq!(score_window(&[sample(3.0, 1000, 0)]), (2, 0));
    assert_eq!(
        score_window(&[sample(6.0, 1000, 250), sample(6.0, 1000, 0)]),
        (4, 35)
    );
    // bonus ratio is capped at 1
    assert_eq!(score_window(&[sample(6.0, 100, 5000)]), (5, 100));
}

#[test]
fn test_overview_groups_weeks_by_year() {
    let mut conn = open_db("read_overview");
    let row = "1. Ana;A1;;;;;;;;;;;;;;;";
    import(&mut conn, &sheet(3, &[row]));
    import(&mut conn, &sheet(1, &[row]));
    let next_year = chrono::NaiveDate::from_ymd_opt(2026, 1, 12).unwrap();
    ImportLogic::import_week_at(&mut conn, sheet(2, &[row]).as_bytes(), next_year).unwrap();

    assert_eq!(
        WeekLogic::overview(&conn).unwrap(),
        vec![
            YearWeeks {
                year: 2025,
                weeks: vec![1, 3]
            },
            YearWeeks {
                year: 2026,
                weeks: vec![2]
            },
        ]
    );
    assert_eq!(WeekLogic::existing_years(&conn).unwrap(), vec![2025, 2026]);
    assert_eq!(
        WeekLogic::existing_weeks_for_year(&conn, 2025).unwrap(),
        vec![1, 3]
    );
    assert!(WeekLogic::existing_weeks_for_year(&conn, 2024)
        .unwrap()
        .is_empty());
}

#[test]
fn test_week_view_rows_and_display_priority() {
    let mut conn = open_db("read_week_view");
    import(
        &mut conn,
        &sheet(
            5,
            &[
                "1. Zoe;;;;;;;;;;;;;300;;300;solo nómina",
                "2. Ana;a1;B2;;;;;;;;;;C3;500;50;550;",
            ],
        ),
    );
    conn.execute(
        "UPDATE construction_sites SET name = 'Obra Centro' WHERE code = 'B2'",
        [],
    )
    .unwrap();

    let view = WeekLogic::view(&conn, 2025, 5).unwrap();
    assert_eq!((view.year, view.week_number), (2025, 5));
    assert_eq!(view.day_names[0], "Lunes");

    let names: Vec<&str> = view.workers.iter().map(|w| w.name.as_str()).collect();
    // workers without attendance come last
    assert_eq!(names, vec!["Ana", "Zoe"]);

    let ana = &view.workers[0];
    assert_eq!(ana.slots[0], ["A1".to_string(), "Obra Centro".to_string()]);
    assert_eq!(ana.slots[5], [String::new(), "C3".to_string()]);
    assert_eq!(ana.slots[1], [String::new(), String::new()]);
    assert_eq!(ana.halves_worked(), 3);
    assert_eq!(
        (ana.salario.as_str(), ana.bonus.as_str(), ana.total.as_str()),
        ("500", "50", "550")
    );
    assert_eq!(ana.comment, "");

    let zoe = &view.workers[1];
    assert_eq!(zoe.halves_worked(), 0);
    assert_eq!(zoe.salario, "300");
    assert_eq!(zoe.bonus, "");
    assert_eq!(zoe.comment, "solo nómina");
}

#[test]
fn test_week_view_lists_workers_of_other_weeks_blank() {
    let mut conn = open_db("read_week_view_all_workers");
    import(&mut conn, &sheet(5, &["1. Ana;A1;A1;;;;;;;;;;;500;;500;"]));
    import(&mut conn, &sheet(6, &["1. Luis;B2;;;;;;;;;;;;400;;400;"]));

    let view = WeekLogic::view(&conn, 2025, 6).unwrap();
    let names: Vec<&str> = view.workers.iter().map(|w| w.name.as_str()).collect();
    assert_eq!(names, vec!["Luis", "Ana"]);

    let ana = &view.workers[1];
    assert_eq!(ana.halves_worked(), 0);
    assert!(ana.slots.iter().flatten().all(String::is_empty));
    assert_eq!((ana.salario.as_str(), ana.comment.as_str()), ("", ""));

    let view = WeekLogic::view(&conn, 2025, 5).unwrap();
    let names: Vec<&str> = view.workers.iter().map(|w| w.name.as_str()).collect();
    assert_eq!(names, vec!["Ana", "Luis"]);
}

#[test]
fn test_week_labels_are_zero_padded_and_ordered() {
    let mut conn = open_db("read_week_labels");
    import(&mut conn, &sheet(12, &["1. Ana;A1;;;;;;;;;;;;;;;"]));
    import(&mut conn, &sheet(3, &["1. Ana;A1;;;;;;;;;;;;;;;"]));

    let labels: Vec<String> = queries::list_weeks(&conn)
        .unwrap()
        .iter()
        .map(|w| w.label())
        .collect();
    assert_eq!(labels, vec!["2025-W03", "2025-W12"]);
}

#[test]
fn test_week_view_of_missing_week_is_not_found() {
    let conn = open_db("read_week_missing");
    let err = WeekLogic::view(&conn, 2025, 42).unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[test]
fn test_worker_profile_totals_and_scores() {
    let mut conn = open_db("read_profile");
    import(&mut conn, &sheet(1, &[FULL_WEEK_ANA]));
    import(&mut conn, &sheet(2, &[FULL_WEEK_ANA_NO_BONUS]));

    let id: i64 = conn
        .query_row("SELECT id FROM workers", [], |r| r.get(0))
        .unwrap();
    let p = StatsLogic::profile(&conn, id, 4).unwrap();

    assert_eq!(p.display_name, "Ana");
    assert_eq!(p.cedula, None);
    assert!(p.active);
    assert_eq!(p.total_halves, 24);
    assert_eq!(p.total_days, 12.0);
    assert_eq!(p.total_salary, 2000);
    assert_eq!(p.total_bonus, 250);
    assert_eq!(p.first_week.as_deref(), Some("2025-W01"));
    assert_eq!(p.total_weeks, 2);
    assert_eq!(p.window_weeks, 2);
    assert_eq!((p.stars, p.bonus_likelihood), (4, 35));

    // a window of one only sees the latest week
    let p = StatsLogic::profile(&conn, id, 1).unwrap();
    assert_eq!(p.window_weeks, 1);
    assert_eq!((p.stars, p.bonus_likelihood), (3, 0));
}

#[test]
fn test_worker_without_attendance_scores_one_star() {
    let mut conn = open_db("read_profile_empty");
    import(&mut conn, &sheet(4, &["1. Zoe;;;;;;;;;;;;;300;;300;"]));

    let id: i64 = conn
        .query_row("SELECT id FROM workers", [], |r| r.get(0))
        .unwrap();
    let p = StatsLogic::profile(&conn, id, 4).unwrap();

    assert_eq!(p.total_halves, 0);
    assert_eq!(p.total_weeks, 0);
    assert_eq!(p.first_week.as_deref(), Some("2025-W04"));
    assert_eq!((p.stars, p.bonus_likelihood), (1, 0));
}

#[test]
fn test_worker_charts_series_and_top_sites() {
    let mut conn = open_db("read_charts");
    import(&mut conn, &sheet(1, &[FULL_WEEK_ANA]));
    import(&mut conn, &sheet(2, &[FULL_WEEK_ANA_NO_BONUS]));
    // half a day on another site does not make the top list
    import(&mut conn, &sheet(3, &["1. Ana;b7;;;;;;;;;;;;;;;"]));

    let id: i64 = conn
        .query_row("SELECT id FROM workers", [], |r| r.get(0))
        .unwrap();
    let charts = StatsLogic::charts(&conn, id, 12).unwrap();

    let days: Vec<(&str, f64)> = charts
        .weekly_days
        .iter()
        .map(|p| (p.label.as_str(), p.value))
        .collect();
    assert_eq!(
        days,
        vec![("2025-W01", 6.0), ("2025-W02", 6.0), ("2025-W03", 0.5)]
    );

    let bonus: Vec<f64> = charts.weekly_bonus.iter().map(|p| p.value).collect();
    assert_eq!(bonus, vec![250.0, 0.0, 0.0]);

    assert_eq!(charts.sites.len(), 1);
    assert_eq!(charts.sites[0].label, "A1");
    assert_eq!(charts.sites[0].value, 12.0);

    let last_two = StatsLogic::charts(&conn, id, 2).unwrap();
    assert_eq!(last_two.weekly_days[0].label, "2025-W02");
}

#[test]
fn test_stats_for_missing_worker_are_not_found() {
    let conn = open_db("read_stats_missing");
    assert!(matches!(
        StatsLogic::profile(&conn, 99, 4).unwrap_err(),
        AppError::NotFound(_)
    ));
    assert!(matches!(
        StatsLogic::charts(&conn, 99, 12).unwrap_err(),
        AppError::NotFound(_)
    ));
}

#[test]
fn test_worker_list_by_id_and_inactive_filter() {
    let mut conn = open_db("read_worker_list");
    import(
        &mut conn,
        &sheet(1, &["1. Zoe;A1;;;;;;;;;;;;;;;", "2. Ana;A1;;;;;;;;;;;;;;;"]),
    );
    conn.execute("UPDATE workers SET active = 0 WHERE normalized_name = 'ANA'", [])
        .unwrap();

    let active: Vec<String> = WorkerLogic::list(&conn, false)
        .unwrap()
        .into_iter()
        .map(|w| w.display_name)
        .collect();
    assert_eq!(active, vec!["Zoe"]);

    let all: Vec<String> = WorkerLogic::list(&conn, true)
        .unwrap()
        .into_iter()
        .map(|w| w.display_name)
        .collect();
    assert_eq!(all, vec!["Zoe", "Ana"]);
}
