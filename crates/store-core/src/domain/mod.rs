//! 스토어 도메인 모델.

pub mod product;
pub mod user;

pub use product::{NewProduct, Product};
pub use user::{NewUser, User, UserUpdate};
