pub mod report;
pub mod season;

pub use report::*;
pub use season::*;
