pub mod interactions;
pub mod plugin;
pub mod setup;
pub mod sync;

pub use plugin::FlowPlugin;
