pub mod dto;
pub mod service;

pub use dto::UploadedImage;
pub use service::MediaService;
