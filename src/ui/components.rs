pub mod footer;
pub mod header;
pub mod input;
pub mod table;
