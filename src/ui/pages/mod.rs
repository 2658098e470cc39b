pub mod drivers;
pub mod fobs;
pub mod leads;
pub mod login;
pub mod projects;
pub mod routes;
pub mod trips;
pub mod users;
pub mod vehicles;
