mod catalog;
mod sessions;
mod wishlists;

pub use catalog::CatalogRepository;
pub use sessions::SessionRepository;
pub use wishlists::WishlistRepository;
