use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::modules::shop::domain::value_objects::{Coordinates, PaymentMethod, PostCode, ShopName};
use crate::shared::domain::clock;
use crate::shared::domain::value_objects::{ImageFile, UserId};
use crate::shared::utils::collections::dedup_preserving_order;

/// The client-editable part of a shop.
#[derive(Debug, Clone, PartialEq)]
pub struct ShopDetails {
    pub name: ShopName,
    pub post_code: Option<PostCode>,
    pub address: String,
    pub location: Option<Coordinates>,
    pub stations: Vec<Uuid>,
    pub images: Vec<ImageFile>,
    pub payment_methods: Vec<PaymentMethod>,
}

impl ShopDetails {
    pub fn named(name: ShopName) -> Self {
        Self {
            name,
            post_code: None,
            address: String::new(),
            location: None,
            stations: Vec::new(),
            images: Vec::new(),
            payment_methods: Vec::new(),
        }
    }

    fn normalized(mut self) -> Self {
        self.address = self.address.trim().to_string();
        self.stations = dedup_preserving_order(self.stations);
        self.images = dedup_preserving_order(self.images);
        self.payment_methods = dedup_preserving_order(self.payment_methods);
        self
    }
}

/// Aggregate root: a shop with its stations, images and payment methods.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shop {
    pub id: Uuid,
    pub name: ShopName,
    pub post_code: Option<PostCode>,
    pub address: String,
    #[serde(flatten)]
    pub location: Option<Coordinates>,
    pub stations: Vec<Uuid>,
    pub images: Vec<ImageFile>,
    pub payment_methods: Vec<PaymentMethod>,
    pub registerer: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Shop {
    pub fn new(details: ShopDetails, registerer: UserId) -> Self {
        let details = details.normalized();
        let now = clock::now();
        Self {
            id: Uuid::now_v7(),
            name: details.name,
            post_code: details.post_code,
            address: details.address,
            location: details.location,
            stations: details.stations,
            images: details.images,
            payment_methods: details.payment_methods,
            registerer,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace every client-editable field; identity, owner and creation time stay.
    pub fn update(&mut self, details: ShopDetails) {
        let details = details.normalized();
        self.name = details.name;
        self.post_code = details.post_code;
        self.address = details.address;
        self.location = details.location;
        self.stations = details.stations;
        self.images = details.images;
        self.payment_methods = details.payment_methods;
        self.updated_at = clock::now();
    }

    pub fn is_registered_by(&self, user: &UserId) -> bool {
        &self.registerer == user
    }

    /// Returns false when the image was already attached.
    pub fn attach_image(&mut self, image: ImageFile) -> bool {
        if self.images.contains(&image) {
            return false;
        }
        self.images.push(image);
        self.updated_at = clock::now();
        true
    }

    /// Returns false when the image was not attached.
    pub fn detach_image(&mut self, image: &ImageFile) -> bool {
        let before = self.images.len();
        self.images.retain(|existing| existing != image);
        if self.images.len() == before {
            return false;
        }
        self.updated_at = clock::now();
        true
    }
}
