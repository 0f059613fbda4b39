mod shop_repository_impl;

pub use shop_repository_impl::ShopRepositoryImpl;
