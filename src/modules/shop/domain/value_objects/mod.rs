mod coordinates;
mod payment_method;
mod post_code;
mod shop_name;

pub use coordinates::Coordinates;
pub use payment_method::PaymentMethod;
pub use post_code::PostCode;
pub use shop_name::ShopName;
