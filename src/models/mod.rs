pub mod attendance;
pub mod payroll;
pub mod site;
pub mod week;
pub mod week_view;
pub mod worker;
pub mod worker_stats;
