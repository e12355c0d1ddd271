use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::migrate::run_pending_migrations;
use crate::db::pool::DbPool;
use crate::db::stats;
use crate::errors::AppResult;
use crate::ui::messages::{error, info, success};

/// Maintenance of the attendance store: schema upgrades, a summary of what
/// has been imported, integrity check and compaction.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        migrate,
        check,
        vacuum,
        info: show_info,
    } = cmd
    {
        // Migrations run explicitly here, so open without init
        let pool = DbPool::new(&cfg.database)?;

        if *migrate {
            info(format!("Upgrading attendance schema in {}", cfg.database));
            run_pending_migrations(&pool.conn)?;
            success("Schema is up to date.");
        }

        if *show_info {
            stats::print_db_info(&pool.conn, &cfg.database)?;
        }

        if *check {
            info("Checking database integrity…");
            let problems = stats::integrity_problems(&pool.conn)?;
            if problems.is_empty() {
                success("Integrity check passed.");
            } else {
                error(format!("Integrity check failed ({} problem(s)):", problems.len()));
                for p in &problems {
                    error(p);
                }
            }
        }

        if *vacuum {
            info("Compacting the database file…");
            pool.conn.execute_batch("VACUUM;")?;
            success("Database compacted.");
        }
    }

    Ok(())
}
