pub mod controller;
pub mod picker_view;
pub mod theme;

pub use controller::*;
pub use picker_view::*;
pub use theme::*;
