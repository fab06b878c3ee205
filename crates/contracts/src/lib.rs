pub mod clients;
pub mod system;
pub mod validation;
