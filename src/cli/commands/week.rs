use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::weeks::WeekLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::attendance::HalfDay;
use crate::models::week::week_label;
use crate::ui::messages::{header, info};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Week { year, kw } = cmd {
        let pool = DbPool::open_initialized(&cfg.database)?;
        let view = WeekLogic::view(&pool.conn, *year, *kw)?;

        header(format!("Week {}", week_label(view.year, view.week_number)));

        if view.workers.is_empty() {
            info("No workers recorded for this week.");
            return Ok(());
        }

        let mut columns = vec![Column::text("Nombre")];
        for day in view.day_names {
            for half in HalfDay::BOTH {
                let abbrev: String = day.chars().take(3).collect();
                columns.push(Column::text(format!("{} {}", abbrev, half.short())));
            }
        }
        columns.push(Column::numeric("Salario"));
        columns.push(Column::numeric("Bonus"));
        columns.push(Column::numeric("Total"));
        columns.push(Column::text("Comentario"));

        let mut table = Table::new(columns);
        for row in &view.workers {
            let mut cells = vec![row.name.clone()];
            cells.extend(row.slots.iter().flat_map(|d| d.iter().cloned()));
            cells.push(row.salario.clone());
            cells.push(row.bonus.clone());
            cells.push(row.total.clone());
            cells.push(row.comment.clone());
            table.add_row(cells);
        }

        print!("{}", table.render(&cfg.separator_char));
        println!("\n{} worker(s)", view.workers.len());
    }
    Ok(())
}
