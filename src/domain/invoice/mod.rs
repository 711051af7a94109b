//! Invoice aggregate

pub mod model;
pub mod repository;

pub use model::{Invoice, InvoiceLine, PaymentStatus};
pub use repository::InvoiceRepository;
