pub mod category;
pub mod conference;

pub use category::*;
pub use conference::*;
