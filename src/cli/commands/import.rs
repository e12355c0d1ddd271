use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::import::ImportLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::week::week_label;
use crate::ui::messages::{info, success, warning};
use chrono::Local;
use std::fs;
use std::io::{self, Write};

/// Ask a yes/no confirmation from the user
fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Import { file, force } = cmd {
        let raw = fs::read(file)?;
        let today = Local::now().date_naive();

        let mut pool = DbPool::open_initialized(&cfg.database)?;

        let (week_number, year) = ImportLogic::peek_week(&raw, today)?;
        let label = week_label(year, week_number);

        if !*force && ImportLogic::week_exists(&pool.conn, year, week_number)? {
            let prompt = format!(
                "Week {} is already imported. Its attendance and payroll will be replaced.",
                label
            );
            if !ask_confirmation(&prompt) {
                info("Import cancelled.");
                return Ok(());
            }
        }

        let outcome = ImportLogic::import_week_at(&mut pool.conn, &raw, today)?;

        success(format!(
            "{} week {}: {} workers, {} half-days",
            if outcome.pre_existed { "Replaced" } else { "Imported" },
            label,
            outcome.workers,
            outcome.attendance_rows
        ));
        if outcome.skipped_rows > 0 {
            warning(format!(
                "{} row(s) skipped: name cell without letters",
                outcome.skipped_rows
            ));
        }
    }
    Ok(())
}
