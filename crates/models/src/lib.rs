pub mod dish;
pub mod errors;
pub mod form;
pub mod user;

pub use dish::{Dish, DishDraft};
pub use user::{CookProfile, RegisterInput, User, UserRole};
