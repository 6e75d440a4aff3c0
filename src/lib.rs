pub mod error;
pub mod modulation;
pub mod phy;
pub mod transmission;
pub mod ui;
pub mod utils;

pub use error::{PhyError, Result};
pub use utils::config::PhyConfig;
