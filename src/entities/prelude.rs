pub use super::account_roles::Entity as AccountRoles;
pub use super::accounts::Entity as Accounts;
pub use super::bookings::Entity as Bookings;
pub use super::educations::Entity as Educations;
pub use super::employees::Entity as Employees;
pub use super::roles::Entity as Roles;
pub use super::rooms::Entity as Rooms;
pub use super::universities::Entity as Universities;
