pub mod cli;
pub mod diagnose;
pub mod ports;
pub mod probe;
pub mod report;
pub mod resolve;
pub mod utils;

pub use cli::*;
pub use diagnose::*;
pub use ports::*;
pub use probe::*;
pub use report::*;
pub use resolve::*;
pub use utils::*;
