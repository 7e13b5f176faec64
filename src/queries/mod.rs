//! Query modules for the Lynapp SDK.
//!
//! [`ListingQuery`] borrows a [`Connection`](crate::connection::Connection)
//! and returns typed listings; [`filter`] holds the local filter, sort and
//! pagination rules applied on top of the service's search.

pub mod filter;
pub mod listings;

pub use filter::{paginate, BedroomFilter, GridLayout, Page, SearchListingsParams, SortOrder};
pub use listings::{city_suggestions, ListingQuery};
