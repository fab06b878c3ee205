pub mod facade;
pub mod state;
