pub mod auth;
pub mod card;

pub use auth::{Claims, User};
pub use card::{CardView, SharedCardView};
