//! Business rules on top of a [`DataStore`](crate::store::DataStore).
//!
//! Each service is a set of free functions taking the store as their first
//! argument, so they can be tested against any store implementation.

pub mod authors;
pub mod entries;
pub mod statistics;

#[cfg(test)]
pub(crate) mod test_support;
