pub mod dto;
pub mod service;

pub use dto::{ImageReferenceInput, ShopInput};
pub use service::ShopService;
