pub mod confirm;
pub mod inputs;
pub mod table_view;
