pub mod comment;
pub mod errors;
pub mod money;
pub mod order;
pub mod order_number;
pub mod ports;
pub mod product;
pub mod user;
pub mod validation;
