use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::export::ExportLogic;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        year,
        kw,
        format,
        file,
        force,
    } = cmd
    {
        let pool = DbPool::open_initialized(&cfg.database)?;
        ExportLogic::export_week(&pool.conn, *year, *kw, *format, file, *force)?;
    }
    Ok(())
}
