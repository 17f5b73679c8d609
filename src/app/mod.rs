pub mod bridge;
pub mod handler;
pub mod price;
pub mod status;
pub mod swap;
