mod image_usage_repository_impl;

pub use image_usage_repository_impl::ImageUsageRepositoryImpl;
