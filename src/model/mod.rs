//! Wire records exchanged with the backend. The client never derives business values from them.

pub mod cart;
pub mod image;
pub mod product;
pub mod user;

pub use cart::*;
pub use image::*;
pub use product::*;
pub use user::*;
