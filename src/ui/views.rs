pub mod main;
pub mod todos;
pub mod traits;
pub mod users;
pub mod view_select;
