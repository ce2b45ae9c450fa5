pub mod customer;
pub mod frequency;

pub use customer::*;
pub use frequency::*;
