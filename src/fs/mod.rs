pub mod lock;
pub mod log_file;
pub mod tail;
pub mod watcher;

pub use lock::InstanceLock;
pub use log_file::{append_encoded, append_terminated};
pub use tail::{last_line, read_last_line};
pub use watcher::{current_mod_time, ModificationWatcher};
