pub mod account_service;
pub use account_service::{AccountError, AccountService, Registration};

pub mod account_service_impl;
pub use account_service_impl::{SeaOrmAccountService, hash_for_account};

pub mod email;
pub use email::EmailService;
