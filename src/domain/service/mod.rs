//! Guest service aggregate

pub mod model;
pub mod repository;

pub use model::GuestService;
pub use repository::GuestServiceRepository;
