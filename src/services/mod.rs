pub mod dashboard_service;
pub mod withdrawal_service;

pub use dashboard_service::{DashboardLoad, DashboardService, DashboardView, StatTile};
pub use withdrawal_service::{WithdrawalService, WithdrawalsLoad, WithdrawalsView};
