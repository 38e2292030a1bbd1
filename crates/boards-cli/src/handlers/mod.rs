pub mod diff;
pub mod filter;
pub mod group;
pub mod suggest;
