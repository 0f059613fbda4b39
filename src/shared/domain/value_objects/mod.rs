mod image_file;
mod user_id;

pub use image_file::ImageFile;
pub use user_id::UserId;
