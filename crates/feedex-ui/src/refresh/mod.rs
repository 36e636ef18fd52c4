mod config;
mod controller;
mod state;

pub use config::PullRefreshConfig;
pub use controller::PullRefreshController;
pub use state::PullState;
