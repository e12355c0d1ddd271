use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::workers::WorkerLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Workers { all } = cmd {
        let pool = DbPool::open_initialized(&cfg.database)?;
        let workers = WorkerLogic::list(&pool.conn, *all)?;

        if workers.is_empty() {
            info("No workers found.");
            return Ok(());
        }

        let mut table = Table::new(vec![
            Column::numeric("ID"),
            Column::text("Nombre"),
            Column::text("Cedula"),
            Column::text("Active"),
        ]);
        for w in workers {
            table.add_row(vec![
                w.id.to_string(),
                w.display_name,
                w.cedula.unwrap_or_default(),
                if w.active { "yes" } else { "no" }.to_string(),
            ]);
        }
        print!("{}", table.render(&cfg.separator_char));
    }
    Ok(())
}
