mod shop_repository;

#[cfg(test)]
pub use shop_repository::MockShopRepository;
pub use shop_repository::ShopRepository;
