pub mod jwt;
pub mod money;
pub mod pagination;
pub mod password;
pub mod validation;
