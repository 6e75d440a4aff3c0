pub mod config;
pub mod consts;
pub mod dump;
pub mod logging;
pub mod wav;
