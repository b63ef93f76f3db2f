mod control_loop;
mod shutdown;

pub use control_loop::{ControlLoop, TickReport};
pub use shutdown::install_shutdown_handler;
