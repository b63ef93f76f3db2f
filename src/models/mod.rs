pub mod channel;
pub mod constants;
pub mod row;

pub use channel::{Channel, ChannelTable};
pub use row::LogRow;
