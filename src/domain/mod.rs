pub mod bounty;
pub mod errors;
pub mod models;
