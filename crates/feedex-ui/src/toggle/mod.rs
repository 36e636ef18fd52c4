mod config;
mod dispatcher;

pub use config::ItemToggleConfig;
pub use dispatcher::{FlingOutcome, ItemToggleDispatcher, ToggleTarget};
