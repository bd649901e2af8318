//! Catalog entity and its creation input

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Icon assigned when the creation form leaves the field blank.
pub const DEFAULT_ICON: &str = "🔧";

/// A sellable offering in the catalog.
///
/// `id` is assigned by the store on insert and never changes afterwards.
/// `price` and `stock` are never negative; the only write path goes through
/// [`NewService::parse`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: i64,
    pub promotion: bool,
    pub icon: String,
    pub created_at: DateTime<Utc>,
}

/// Raw creation input, exactly as an HTML form submits it: numeric fields
/// arrive as text and are coerced by [`NewService::parse`].
#[derive(Debug, Clone, Default)]
pub struct ServiceFields {
    pub name: String,
    pub description: String,
    pub price: String,
    pub stock: String,
    pub promotion: bool,
    pub icon: Option<String>,
}

/// Validated creation input, ready for insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct NewService {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: i64,
    pub promotion: bool,
    pub icon: String,
}

/// Rejected creation input. Surfaced to the admin as a form re-display,
/// never a crash.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,
    #[error("price must be a non-negative number")]
    InvalidPrice,
    #[error("stock must be a non-negative integer")]
    InvalidStock,
}

impl NewService {
    /// Coerce raw form input into a valid service draft.
    ///
    /// `promotion` defaults to false when the checkbox is absent; a blank
    /// icon falls back to [`DEFAULT_ICON`].
    pub fn parse(fields: ServiceFields) -> Result<Self, ValidationError> {
        let name = fields.name.trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }

        let price: f64 = fields
            .price
            .trim()
            .parse()
            .map_err(|_| ValidationError::InvalidPrice)?;
        if !price.is_finite() || price < 0.0 {
            return Err(ValidationError::InvalidPrice);
        }

        let stock: i64 = fields
            .stock
            .trim()
            .parse()
            .map_err(|_| ValidationError::InvalidStock)?;
        if stock < 0 {
            return Err(ValidationError::InvalidStock);
        }

        let icon = match fields.icon {
            Some(icon) if !icon.trim().is_empty() => icon,
            _ => DEFAULT_ICON.to_string(),
        };

        Ok(Self {
            name,
            description: fields.description,
            price,
            stock,
            promotion: fields.promotion,
            icon,
        })
    }
}

/// Transport record for the JSON export endpoint.
///
/// Field names are preserved verbatim for compatibility with existing
/// consumers of the export contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRecord {
    pub id: i64,
    pub nombre: String,
    pub descripcion: String,
    pub precio: f64,
    pub stock: i64,
    pub promocion: bool,
    pub icono: String,
}

impl From<Service> for ServiceRecord {
    fn from(service: Service) -> Self {
        Self {
            id: service.id,
            nombre: service.name,
            descripcion: service.description,
            precio: service.price,
            stock: service.stock,
            promocion: service.promotion,
            icono: service.icon,
        }
    }
}
