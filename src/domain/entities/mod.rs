pub mod envelope;
pub mod page;
pub mod resource;
pub mod session;
