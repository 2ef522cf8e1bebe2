pub mod account;
pub mod booking;
pub mod education;
pub mod employee;
pub mod role;
pub mod room;
pub mod university;
