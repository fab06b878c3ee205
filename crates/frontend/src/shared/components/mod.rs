pub mod sort_header;
