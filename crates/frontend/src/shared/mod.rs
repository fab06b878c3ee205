pub mod api_utils;
pub mod components;
pub mod i18n;
pub mod notifications;
pub mod sorting;
pub mod url_state;
