pub mod aeps;
pub mod estamp;
pub mod user;
