pub mod selection_mirror;
pub mod simple_logger;

pub use selection_mirror::*;
pub use simple_logger::*;
