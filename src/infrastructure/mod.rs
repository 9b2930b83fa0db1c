pub mod hooks;
pub mod plugins;
pub mod session;

#[cfg(test)]
pub mod test_utils;

pub use hooks::*;
pub use plugins::*;
pub use session::*;
