pub mod scene;

pub use scene::{FlowCell, setup_container};
