pub mod market;
pub mod signals;
pub mod trade;

pub use market::*;
pub use signals::*;
pub use trade::*;
