use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::GuestService;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDto {
    pub id: i32,
    pub name: String,
    pub category: String,
    /// Unit price in smallest currency unit
    pub price: i64,
    pub available: bool,
}

impl From<&GuestService> for ServiceDto {
    fn from(service: &GuestService) -> Self {
        Self {
            id: service.id,
            name: service.name.clone(),
            category: service.category.clone(),
            price: service.price,
            available: service.available,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[validate(range(min = 0, message = "price must not be negative"))]
    pub price: i64,
}

impl CreateServiceRequest {
    pub fn into_domain(self) -> GuestService {
        GuestService::new(self.name, self.category, self.price)
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateServiceRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    pub category: Option<String>,
    #[validate(range(min = 0, message = "price must not be negative"))]
    pub price: Option<i64>,
    /// Retiring a service only blocks new selections; existing
    /// bookings keep it
    pub available: Option<bool>,
}

impl UpdateServiceRequest {
    pub fn apply(self, service: &mut GuestService) {
        if let Some(name) = self.name {
            service.name = name;
        }
        if let Some(category) = self.category {
            service.category = category;
        }
        if let Some(price) = self.price {
            service.price = price;
        }
        if let Some(available) = self.available {
            service.available = available;
        }
        service.updated_at = chrono::Utc::now();
    }
}
