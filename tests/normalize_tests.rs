use chrono::NaiveDate;
use obralog::core::layout::{detect_columns, extract_week_identifier, read_rows};
use obralog::core::normalize::{is_worker_row_name, normalize_worker_name, parse_money, strip_ordinal};
use obralog::errors::AppError;
use obralog::models::attendance::HalfDay;
use obralog::models::site::site_label;

fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|c| c.to_string()).collect()
}

#[test]
fn test_normalize_worker_name_variants() {
    assert_eq!(normalize_worker_name("3. John Doe"), "JOHN DOE");
    assert_eq!(normalize_worker_name(" john doe "), "JOHN DOE");
    assert_eq!(normalize_worker_name("JOHN DOE"), "JOHN DOE");
    assert_eq!(normalize_worker_name("12 - María"), "MARÍA");
    assert_eq!(normalize_worker_name(""), "");
    assert_eq!(normalize_worker_name("7"), "");
}

#[test]
fn test_strip_ordinal_keeps_casing() {
    assert_eq!(strip_ordinal("3. Juan Pérez "), "Juan Pérez");
    assert_eq!(strip_ordinal("Juan 2"), "Juan 2");
    assert!(is_worker_row_name("Juan"));
    assert!(!is_worker_row_name(""));
    assert!(!is_worker_row_name("- 12"));
}

#[test]
fn test_parse_money_extracts_digits() {
    assert_eq!(parse_money(Some("$1.234,56")), Some(123456));
    assert_eq!(parse_money(Some("")), None);
    assert_eq!(parse_money(Some("n/a")), None);
    assert_eq!(parse_money(None), None);
    assert_eq!(parse_money(Some(" 500 ")), Some(500));
    assert_eq!(parse_money(Some("1 200 (adelanto 300)")), Some(1200300));
    assert_eq!(parse_money(Some("99999999999999999999")), None);
}

#[test]
fn test_read_rows_splits_lines_and_quotes() {
    let rows = read_rows(b";5\r\n\r\nnombre;\"a;b\";c\n").unwrap();
    assert_eq!(
        rows,
        vec![row(&["", "5"]), Vec::<String>::new(), row(&["nombre", "a;b", "c"])]
    );
}

#[test]
fn test_read_rows_keeps_line_breaks_inside_quoted_cells() {
    let rows = read_rows(b";5\nnombre;x\n1. Ana;\"uno\r\ndos\"\n\n2. Bo;\"di \"\"jefe\"\"\"\n").unwrap();
    assert_eq!(
        rows,
        vec![
            row(&["", "5"]),
            row(&["nombre", "x"]),
            row(&["1. Ana", "uno\ndos"]),
            Vec::<String>::new(),
            row(&["2. Bo", "di \"jefe\""]),
        ]
    );
}

#[test]
fn test_extract_week_identifier_uses_today_year() {
    let today = NaiveDate::from_ymd_opt(2024, 12, 30).unwrap();
    let rows = vec![row(&["KW", " 52 "]), row(&["nombre"])];
    assert_eq!(extract_week_identifier(&rows, today).unwrap(), (52, 2024));

    let rows = vec![row(&["KW", "-"]), row(&["nombre"])];
    assert!(matches!(
        extract_week_identifier(&rows, today).unwrap_err(),
        AppError::MalformedHeader(_)
    ));

    let rows = vec![row(&["KW"])];
    assert!(matches!(
        extract_week_identifier(&rows, today).unwrap_err(),
        AppError::MalformedHeader(_)
    ));
}

#[test]
fn test_detect_columns_fixed_days_and_named_payroll() {
    let header = row(&[
        "nombre", "a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l", " Salario ", "BONUS",
    ]);
    let layout = detect_columns(&header);

    assert_eq!(layout.column_for(0, HalfDay::Morning), Some(1));
    assert_eq!(layout.column_for(0, HalfDay::Afternoon), Some(2));
    assert_eq!(layout.column_for(5, HalfDay::Afternoon), Some(12));
    assert_eq!(layout.payroll.salario, Some(13));
    assert_eq!(layout.payroll.bonus, Some(14));
    assert_eq!(layout.payroll.total, None);
    assert_eq!(layout.payroll.comment, None);
}

#[test]
fn test_payroll_header_on_day_column_is_not_attendance() {
    let layout = detect_columns(&row(&["nombre", "lunes_am", "lunes_pm", "salario"]));
    assert_eq!(layout.payroll.salario, Some(3));
    assert_eq!(layout.column_for(1, HalfDay::Morning), None);
    assert_eq!(layout.column_for(1, HalfDay::Afternoon), Some(4));
}

#[test]
fn test_site_label_priority() {
    assert_eq!(site_label(Some("Torre"), Some("t1"), Some(3)), "Torre");
    assert_eq!(site_label(None, Some("t1"), Some(3)), "T1");
    assert_eq!(site_label(Some(""), None, Some(3)), "3");
    assert_eq!(site_label(None, None, None), "");
}
