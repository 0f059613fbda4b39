use serde::Deserialize;

use crate::modules::shop::domain::entities::ShopDetails;
use crate::modules::shop::domain::value_objects::{Coordinates, PaymentMethod, PostCode, ShopName};
use crate::shared::domain::value_objects::ImageFile;
use crate::shared::errors::{AppResult, ValidationError};
use crate::shared::utils::validation::Validator;

/// Create/update request body. The registerer always comes from the caller's identity.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ShopInput {
    pub name: String,
    pub post_code: Option<String>,
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub stations: Vec<String>,
    pub images: Vec<String>,
    pub payment_methods: Vec<String>,
}

impl ShopInput {
    pub fn into_details(self) -> AppResult<ShopDetails> {
        let post_code = match self.post_code.as_deref() {
            Some(raw) => PostCode::parse_optional(raw)?,
            None => None,
        };

        let images = self
            .images
            .iter()
            .map(|reference| ImageFile::parse_reference(reference))
            .collect::<Result<Vec<_>, ValidationError>>()?;

        let payment_methods = self
            .payment_methods
            .into_iter()
            .map(PaymentMethod::new)
            .collect::<Result<Vec<_>, ValidationError>>()?;

        Ok(ShopDetails {
            name: ShopName::new(self.name)?,
            post_code,
            address: self.address,
            location: Coordinates::from_optional(self.latitude, self.longitude)?,
            stations: Validator::parse_ids("station", &self.stations)?,
            images,
            payment_methods,
        })
    }
}

/// Body of `DELETE /shops/{id}/images`.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageReferenceInput {
    pub image_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::errors::AppError;
    use uuid::Uuid;

    #[test]
    fn test_full_input() {
        let station = Uuid::now_v7();
        let image = ImageFile::generate();
        let input: ShopInput = serde_json::from_value(serde_json::json!({
            "name": "Cafe A",
            "post_code": "150-0001",
            "address": "Jingumae",
            "latitude": 35.6,
            "longitude": 139.7,
            "stations": [station.to_string()],
            "images": [image.path()],
            "payment_methods": ["cash"],
            "registerer": "ignored"
        }))
        .unwrap();

        let details = input.into_details().unwrap();
        assert_eq!(details.name.as_str(), "Cafe A");
        assert_eq!(details.post_code.unwrap().as_str(), "150-0001");
        assert_eq!(details.location.unwrap().latitude(), 35.6);
        assert_eq!(details.stations, vec![station]);
        assert_eq!(details.images, vec![image]);
        assert_eq!(details.payment_methods[0].as_str(), "cash");
    }

    #[test]
    fn test_minimal_input() {
        let input: ShopInput = serde_json::from_str(r#"{"name": "Stand", "post_code": ""}"#).unwrap();
        let details = input.into_details().unwrap();
        assert!(details.post_code.is_none());
        assert!(details.location.is_none());
        assert!(details.stations.is_empty());
    }

    #[test]
    fn test_invalid_fields_are_rejected() {
        let bad_post_code = ShopInput {
            name: "Cafe".to_string(),
            post_code: Some("1500001".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            bad_post_code.into_details(),
            Err(AppError::ValidationError(ValidationError::InvalidPostCode(_)))
        ));

        let half_location = ShopInput {
            name: "Cafe".to_string(),
            latitude: Some(35.0),
            ..Default::default()
        };
        assert!(half_location.into_details().is_err());

        let bad_station = ShopInput {
            name: "Cafe".to_string(),
            stations: vec!["shibuya".to_string()],
            ..Default::default()
        };
        assert!(matches!(
            bad_station.into_details(),
            Err(AppError::InvalidInput(_))
        ));

        assert!(ShopInput::default().into_details().is_err());
    }
}
