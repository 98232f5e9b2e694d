pub mod fetcher;
pub mod parse;
pub mod pool;

pub use fetcher::*;
pub use parse::*;
