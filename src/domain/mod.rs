pub mod error;
pub mod grid;
pub mod labels;
pub mod navigation;
pub mod state;

pub use error::*;
pub use grid::*;
pub use labels::*;
pub use navigation::*;
pub use state::*;
