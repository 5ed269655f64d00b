pub mod channel;
pub mod constants;
pub mod logging;
