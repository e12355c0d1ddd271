use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::settings::{SettingsEdit, SettingsLogic};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{error, header, info, success};
use crate::utils::table::{Column, Table};

/// Split an `ID=VALUE` argument. The value may be empty.
fn parse_assignment(arg: &str) -> AppResult<(i64, String)> {
    let (id, value) = arg
        .split_once('=')
        .ok_or_else(|| AppError::InvalidArgument(format!("expected ID=VALUE, got '{}'", arg)))?;

    let id = id
        .trim()
        .parse::<i64>()
        .map_err(|_| AppError::InvalidArgument(format!("invalid id in '{}'", arg)))?;

    Ok((id, value.to_string()))
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Settings {
        cedula,
        site_name,
        activate_worker,
        deactivate_worker,
        activate_site,
        deactivate_site,
    } = cmd
    {
        let mut edits = Vec::new();

        for arg in cedula {
            let (worker_id, cedula) = parse_assignment(arg)?;
            edits.push(SettingsEdit::WorkerCedula { worker_id, cedula });
        }
        for arg in site_name {
            let (site_id, name) = parse_assignment(arg)?;
            edits.push(SettingsEdit::SiteName { site_id, name });
        }
        edits.extend(activate_worker.iter().map(|&worker_id| SettingsEdit::WorkerActive {
            worker_id,
            active: true,
        }));
        edits.extend(deactivate_worker.iter().map(|&worker_id| SettingsEdit::WorkerActive {
            worker_id,
            active: false,
        }));
        edits.extend(activate_site.iter().map(|&site_id| SettingsEdit::SiteActive {
            site_id,
            active: true,
        }));
        edits.extend(deactivate_site.iter().map(|&site_id| SettingsEdit::SiteActive {
            site_id,
            active: false,
        }));

        let mut pool = DbPool::open_initialized(&cfg.database)?;

        if edits.is_empty() {
            return print_listing(&pool, cfg);
        }

        let report = SettingsLogic::apply(&mut pool.conn, &edits)?;

        if report.applied > 0 {
            success(format!("{} change(s) saved.", report.applied));
        }
        for e in &report.errors {
            error(e);
        }
        if !report.is_clean() {
            return Err(AppError::InvalidArgument(format!(
                "{} change(s) rejected",
                report.errors.len()
            )));
        }
    }
    Ok(())
}

fn print_listing(pool: &DbPool, cfg: &Config) -> AppResult<()> {
    let listing = SettingsLogic::listing(&pool.conn)?;

    header("Workers");
    if listing.workers.is_empty() {
        info("No active workers.");
    } else {
        let mut table = Table::new(vec![
            Column::numeric("ID"),
            Column::text("Nombre"),
            Column::text("Cedula"),
        ]);
        for w in listing.workers {
            table.add_row(vec![
                w.id.to_string(),
                w.display_name,
                w.cedula.unwrap_or_default(),
            ]);
        }
        print!("{}", table.render(&cfg.separator_char));
    }

    println!();
    header("Construction sites");
    if listing.sites.is_empty() {
        info("No active sites.");
    } else {
        let mut table = Table::new(vec![
            Column::numeric("ID"),
            Column::text("Code"),
            Column::text("Name"),
        ]);
        for s in listing.sites {
            table.add_row(vec![
                s.id.to_string(),
                s.code.to_uppercase(),
                s.name.unwrap_or_default(),
            ]);
        }
        print!("{}", table.render(&cfg.separator_char));
    }
    Ok(())
}
