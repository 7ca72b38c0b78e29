pub mod analysis;
pub mod feed;
pub mod health;
pub mod post;
pub mod user;
