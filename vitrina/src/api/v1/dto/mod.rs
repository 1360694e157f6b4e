pub mod catalog;
pub mod chat;
pub mod sessions;
pub mod wishlist;

pub use catalog::*;
pub use chat::*;
pub use sessions::*;
pub use wishlist::*;
