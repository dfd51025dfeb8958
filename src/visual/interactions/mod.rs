pub mod keyboard;
pub mod pointer;

pub use keyboard::toggle_last_cell;
pub use pointer::{UnhandledPointer, handle_pointer_input};
