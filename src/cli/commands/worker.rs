use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::stats::StatsLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::payroll::PayrollEntry;
use crate::models::worker_stats::ChartPoint;
use crate::ui::messages::header;
use crate::utils::colors::{CYAN, GREY, RESET, colorize_active, color_for_optional_field, stars};

/// Width of the longest bar in chart output.
const BAR_WIDTH: f64 = 30.0;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Worker { id, charts } = cmd {
        let pool = DbPool::open_initialized(&cfg.database)?;
        let p = StatsLogic::profile(&pool.conn, *id, cfg.stats_window_weeks)?;

        header(format!("Worker #{} {}", p.id, p.display_name));

        let cedula = p.cedula.as_deref().unwrap_or("--");
        println!(
            "{}Cedula:{}        {}{}{}",
            CYAN,
            RESET,
            color_for_optional_field(p.cedula.as_deref()),
            cedula,
            RESET
        );
        println!("{}Active:{}        {}", CYAN, RESET, colorize_active(p.active));
        println!(
            "{}First week:{}    {}",
            CYAN,
            RESET,
            p.first_week.as_deref().unwrap_or("--")
        );
        println!("{}Weeks worked:{}  {}", CYAN, RESET, p.total_weeks);
        println!(
            "{}Days worked:{}   {} ({} half-days)",
            CYAN, RESET, p.total_days, p.total_halves
        );
        println!(
            "{}Total salary:{}  {}",
            CYAN,
            RESET,
            PayrollEntry::display(Some(p.total_salary))
        );
        println!(
            "{}Total bonus:{}   {}",
            CYAN,
            RESET,
            PayrollEntry::display(Some(p.total_bonus))
        );
        println!(
            "{}Reliability:{}   {}  {}(last {} week(s)){}",
            CYAN,
            RESET,
            stars(p.stars),
            GREY,
            p.window_weeks,
            RESET
        );
        println!("{}Bonus chance:{}  {}%", CYAN, RESET, p.bonus_likelihood);

        if *charts {
            let c = StatsLogic::charts(&pool.conn, *id, cfg.chart_weeks)?;

            println!();
            print_bars("Days per week", &c.weekly_days);
            print_bars("Bonus per week", &c.weekly_bonus);
            print_bars("Top sites (days)", &c.sites);
        }
    }
    Ok(())
}

fn print_bars(title: &str, points: &[ChartPoint]) {
    println!("{}{}{}", CYAN, title, RESET);
    if points.is_empty() {
        println!("  {}no data{}\n", GREY, RESET);
        return;
    }

    let label_w = points.iter().map(|p| p.label.chars().count()).max().unwrap_or(0);
    let max = points.iter().map(|p| p.value).fold(0.0_f64, f64::max);

    for p in points {
        let len = if max > 0.0 {
            (p.value / max * BAR_WIDTH).round() as usize
        } else {
            0
        };
        println!(
            "  {:<w$} {} {}",
            p.label,
            "█".repeat(len),
            p.value,
            w = label_w
        );
    }
    println!();
}
