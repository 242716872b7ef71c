pub mod coupons;
pub mod products;
pub mod reviews;
pub mod stats;
pub mod tokens;
pub mod users;
