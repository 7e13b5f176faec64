pub mod listing;
pub mod price;

pub use listing::*;
pub use price::*;
