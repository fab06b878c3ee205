pub mod details;
pub mod list;
pub mod push_modal;
