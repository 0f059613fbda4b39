/// Test data factories using builder pattern
///
/// Provides convenient methods to create test data with sensible defaults
use chrono::{DateTime, Utc};
use shop_review_lib::modules::review::domain::{
    entities::{Review, ReviewDetails},
    value_objects::Rating,
};
use shop_review_lib::modules::shop::domain::{
    entities::{Shop, ShopDetails},
    value_objects::{Coordinates, PaymentMethod, PostCode, ShopName},
};
use shop_review_lib::modules::station::domain::{entities::Station, value_objects::StationName};
use shop_review_lib::shared::domain::clock;
use shop_review_lib::shared::domain::value_objects::{ImageFile, UserId};
use uuid::Uuid;

pub fn station(name: &str) -> Station {
    Station::new(StationName::new(name).unwrap())
}

pub struct ShopFactory {
    details: ShopDetails,
    registerer: String,
}

impl Default for ShopFactory {
    fn default() -> Self {
        Self {
            details: ShopDetails::named(ShopName::new("Test Shop").unwrap()),
            registerer: "alice".to_string(),
        }
    }
}

impl ShopFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: &str) -> Self {
        self.details.name = ShopName::new(name).unwrap();
        self
    }

    pub fn post_code(mut self, post_code: &str) -> Self {
        self.details.post_code = Some(PostCode::new(post_code).unwrap());
        self
    }

    pub fn address(mut self, address: &str) -> Self {
        self.details.address = address.to_string();
        self
    }

    pub fn location(mut self, latitude: f64, longitude: f64) -> Self {
        self.details.location = Some(Coordinates::new(latitude, longitude).unwrap());
        self
    }

    pub fn stations(mut self, stations: &[&Station]) -> Self {
        self.details.stations = stations.iter().map(|s| s.id).collect();
        self
    }

    pub fn images(mut self, images: Vec<ImageFile>) -> Self {
        self.details.images = images;
        self
    }

    pub fn payment_methods(mut self, methods: &[&str]) -> Self {
        self.details.payment_methods = methods
            .iter()
            .map(|m| PaymentMethod::new(*m).unwrap())
            .collect();
        self
    }

    pub fn registered_by(mut self, user: &str) -> Self {
        self.registerer = user.to_string();
        self
    }

    pub fn build(self) -> Shop {
        Shop::new(self.details, UserId::new(self.registerer).unwrap())
    }
}

pub struct ReviewFactory {
    shop_id: Uuid,
    author: String,
    rating: i32,
    content: String,
    images: Vec<ImageFile>,
    created_at: Option<DateTime<Utc>>,
}

impl ReviewFactory {
    pub fn for_shop(shop_id: Uuid) -> Self {
        Self {
            shop_id,
            author: "alice".to_string(),
            rating: 2,
            content: "Test review".to_string(),
            images: Vec::new(),
            created_at: None,
        }
    }

    pub fn author(mut self, author: &str) -> Self {
        self.author = author.to_string();
        self
    }

    pub fn rating(mut self, rating: i32) -> Self {
        self.rating = rating;
        self
    }

    pub fn content(mut self, content: &str) -> Self {
        self.content = content.to_string();
        self
    }

    pub fn images(mut self, images: Vec<ImageFile>) -> Self {
        self.images = images;
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    pub fn build(self) -> Review {
        let details = ReviewDetails {
            rating: Rating::new(self.rating).unwrap(),
            content: self.content,
            images: self.images,
        };
        let created_at = self.created_at.unwrap_or_else(clock::now);

        Review::restore(
            Uuid::now_v7(),
            UserId::new(self.author).unwrap(),
            self.shop_id,
            details,
            created_at,
            created_at,
        )
        .unwrap()
    }
}
