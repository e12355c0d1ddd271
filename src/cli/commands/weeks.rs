use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::weeks::WeekLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{header, info};
use crate::utils::colors::{CYAN, RESET};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Weeks { year } = cmd {
        let pool = DbPool::open_initialized(&cfg.database)?;

        let overview: Vec<_> = WeekLogic::overview(&pool.conn)?
            .into_iter()
            .filter(|y| year.is_none_or(|wanted| y.year == wanted))
            .collect();

        if overview.is_empty() {
            info("No weeks imported yet.");
            return Ok(());
        }

        header("Imported weeks");
        for y in overview {
            let weeks: Vec<String> = y.weeks.iter().map(|w| format!("KW{:02}", w)).collect();
            println!("{}{}{}  {}", CYAN, y.year, RESET, weeks.join(" "));
        }
    }
    Ok(())
}
