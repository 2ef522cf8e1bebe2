pub mod prelude;

pub mod account_roles;
pub mod accounts;
pub mod bookings;
pub mod educations;
pub mod employees;
pub mod roles;
pub mod rooms;
pub mod universities;
