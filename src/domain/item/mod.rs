//! Item domain module.

mod aggregate;

pub use aggregate::Item;
