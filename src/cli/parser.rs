use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for obralog
/// CLI application to reconcile weekly site attendance sheets into SQLite
#[derive(Parser)]
#[command(
    name = "obralog",
    version = env!("CARGO_PKG_VERSION"),
    about = "Import weekly construction-site attendance and payroll sheets into SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Run configuration file migrations if needed")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/vim/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print or manage the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Import a weekly attendance sheet (semicolon-separated CSV)
    Import {
        /// Path of the CSV file
        #[arg(value_name = "FILE")]
        file: String,

        /// Replace an already imported week without asking
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// List imported weeks grouped by year
    Weeks {
        #[arg(long, help = "Only show weeks of this year")]
        year: Option<i32>,
    },

    /// Show the attendance and payroll table of one week
    Week {
        year: i32,

        /// Calendar week number (KW)
        kw: u32,
    },

    /// List workers
    Workers {
        #[arg(long, help = "Include inactive workers")]
        all: bool,
    },

    /// Show a worker profile with reliability score
    Worker {
        id: i64,

        #[arg(long, help = "Also show weekly days, bonus and top sites")]
        charts: bool,
    },

    /// Show or edit worker cedulas, site names and active flags
    Settings {
        #[arg(long, value_name = "ID=VALUE", help = "Set a worker cedula (empty value clears it)")]
        cedula: Vec<String>,

        #[arg(long = "site-name", value_name = "ID=VALUE", help = "Set a site name (empty value clears it)")]
        site_name: Vec<String>,

        #[arg(long = "activate-worker", value_name = "ID")]
        activate_worker: Vec<i64>,

        #[arg(long = "deactivate-worker", value_name = "ID")]
        deactivate_worker: Vec<i64>,

        #[arg(long = "activate-site", value_name = "ID")]
        activate_site: Vec<i64>,

        #[arg(long = "deactivate-site", value_name = "ID")]
        deactivate_site: Vec<i64>,
    },

    /// Export the table of one week
    Export {
        #[arg(long)]
        year: i32,

        #[arg(long)]
        kw: u32,

        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short = 'f')]
        force: bool,
    },
}
