pub mod clustering;
pub mod filter;
