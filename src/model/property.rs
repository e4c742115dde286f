//! Property listings

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::error::{Error, Result};
use crate::model::de::{nullable, opt_string_or_number, opt_u32_or_string, string_or_number};
use crate::model::new_id;
use crate::units::{format_nali, nali_from_sqft, parse_area};

/// Data file for property records
pub const FILE: &str = "properties.json";

// =============================================================================
// TYPES
// =============================================================================

/// Listing category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Buy,
    Lease,
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "buy" => Ok(Category::Buy),
            "lease" => Ok(Category::Lease),
            other => Err(Error::validation(format!(
                "category must be 'buy' or 'lease', got '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Buy => f.write_str("buy"),
            Category::Lease => f.write_str("lease"),
        }
    }
}

/// Physical specifications shown on the listing card
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Specs {
    #[serde(
        default,
        deserialize_with = "opt_u32_or_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub bedrooms: Option<u32>,
    #[serde(
        default,
        deserialize_with = "opt_u32_or_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub bathrooms: Option<u32>,
    /// Built-up area, display text
    #[serde(
        default,
        deserialize_with = "opt_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub area: Option<String>,
    /// Plot size in sq ft
    #[serde(
        default,
        deserialize_with = "opt_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub land_size: Option<String>,
    /// Plot size in Nali
    #[serde(
        default,
        deserialize_with = "opt_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub nali_size: Option<String>,
}

impl Specs {
    /// `naliSize` as computed from the current `landSize`
    pub fn derived_nali(&self) -> Option<String> {
        self.land_size
            .as_deref()
            .and_then(parse_area)
            .map(|sqft| format_nali(nali_from_sqft(sqft)))
    }

    /// Derive `naliSize` from `landSize` when only the latter is given
    pub fn fill_nali(&mut self) {
        if self.nali_size.is_none() {
            self.nali_size = self.derived_nali();
        }
    }

    /// Replace these specs with an edited copy.
    ///
    /// When `landSize` changes, a `naliSize` that is missing or still the
    /// value derived from the old plot size is recomputed. A hand-written
    /// `naliSize` is kept.
    pub fn replace(&mut self, mut next: Specs) {
        if next.land_size != self.land_size {
            let stale = self.derived_nali();
            if next.nali_size.is_none() || (stale.is_some() && next.nali_size == stale) {
                next.nali_size = next.derived_nali();
            }
        }
        *self = next;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Agent {
    pub name: String,
    pub phone: String,
    pub email: String,
}

/// A landmark near the property ("Mall Road", "2 km")
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NearbyPlace {
    pub name: String,
    pub distance: String,
}

/// A property record as stored in `properties.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Display price, e.g. `"₹ 45,00,000"`
    #[serde(deserialize_with = "string_or_number")]
    pub price: String,
    /// Comma-separated, most specific first: `"Landour, Mussoorie, Uttarakhand"`
    pub location: String,
    pub category: Category,
    #[serde(default)]
    pub property_type: String,
    #[serde(default)]
    pub specs: Specs,
    #[serde(default)]
    pub images: Vec<String>,
    /// Single video from before `videoUrls` existed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default)]
    pub video_urls: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_order: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<Agent>,
    #[serde(default)]
    pub nearby: Vec<NearbyPlace>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_details: Option<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

/// Admin form payload for create (POST) and merge-update (PUT)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyInput {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub price: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,
    pub property_type: Option<String>,
    pub specs: Option<Specs>,
    pub images: Option<Vec<String>>,
    pub video_url: Option<String>,
    pub video_urls: Option<Vec<String>>,
    pub featured: Option<bool>,
    /// `null` clears the order
    #[serde(default, deserialize_with = "nullable")]
    pub featured_order: Option<Option<i64>>,
    pub agent: Option<Agent>,
    pub nearby: Option<Vec<NearbyPlace>>,
    pub location_details: Option<String>,
    pub amenities: Option<Vec<String>>,

    /// Freshly uploaded image URLs, appended to `images`
    #[serde(default)]
    pub new_images: Vec<String>,
    /// Freshly uploaded video URLs, appended to `videoUrls`
    #[serde(default)]
    pub new_video_urls: Vec<String>,
    /// Image URLs to drop from `images`
    #[serde(default)]
    pub remove_images: Vec<String>,
}

// =============================================================================
// CONSTRUCTION AND MERGE
// =============================================================================

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn append_unique(target: &mut Vec<String>, items: Vec<String>) {
    for item in items {
        if !item.trim().is_empty() && !target.contains(&item) {
            target.push(item);
        }
    }
}

impl Property {
    /// Build a new record from an admin form, validating required fields
    pub fn create(input: PropertyInput) -> Result<Self> {
        let mut missing = Vec::new();
        let title = non_empty(input.title.clone());
        let price = non_empty(input.price.clone());
        let location = non_empty(input.location.clone());
        let category = non_empty(input.category.clone());

        if title.is_none() {
            missing.push("title");
        }
        if price.is_none() {
            missing.push("price");
        }
        if location.is_none() {
            missing.push("location");
        }
        if category.is_none() {
            missing.push("category");
        }
        if !missing.is_empty() {
            return Err(Error::validation(format!(
                "missing required fields: {}",
                missing.join(", ")
            )));
        }

        let now = Utc::now();
        let mut property = Property {
            id: new_id(),
            title: title.unwrap_or_default(),
            description: String::new(),
            price: price.unwrap_or_default(),
            location: location.unwrap_or_default(),
            category: category.unwrap_or_default().parse()?,
            property_type: String::new(),
            specs: Specs::default(),
            images: Vec::new(),
            video_url: None,
            video_urls: Vec::new(),
            featured: false,
            featured_order: None,
            agent: None,
            nearby: Vec::new(),
            location_details: None,
            amenities: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        property.apply(PropertyInput {
            title: None,
            price: None,
            location: None,
            category: None,
            ..input
        })?;
        property.updated_at = now;
        Ok(property)
    }

    /// Merge an admin form into this record.
    ///
    /// Supplied fields overwrite; `newImages`/`newVideoUrls` are appended
    /// without duplicates; `removeImages` are dropped afterwards.
    pub fn apply(&mut self, input: PropertyInput) -> Result<()> {
        if let Some(title) = input.title {
            let title = title.trim().to_string();
            if title.is_empty() {
                return Err(Error::validation("title cannot be empty"));
            }
            self.title = title;
        }
        if let Some(price) = input.price {
            self.price = price;
        }
        if let Some(location) = input.location {
            let location = location.trim().to_string();
            if location.is_empty() {
                return Err(Error::validation("location cannot be empty"));
            }
            self.location = location;
        }
        if let Some(category) = input.category {
            self.category = category.parse()?;
        }
        if let Some(v) = input.description {
            self.description = v;
        }
        if let Some(v) = input.property_type {
            self.property_type = v.trim().to_string();
        }
        if let Some(v) = input.specs {
            self.specs.replace(v);
        }
        if let Some(v) = input.images {
            self.images = v;
        }
        if let Some(v) = input.video_url {
            self.video_url = non_empty(Some(v));
        }
        if let Some(v) = input.video_urls {
            self.video_urls = v;
        }
        if let Some(v) = input.featured {
            self.featured = v;
        }
        if let Some(v) = input.featured_order {
            self.featured_order = v;
        }
        if !self.featured {
            self.featured_order = None;
        }
        if let Some(v) = input.agent {
            self.agent = Some(v);
        }
        if let Some(v) = input.nearby {
            self.nearby = v;
        }
        if let Some(v) = input.location_details {
            self.location_details = non_empty(Some(v));
        }
        if let Some(v) = input.amenities {
            self.amenities = v;
        }

        append_unique(&mut self.images, input.new_images);
        append_unique(&mut self.video_urls, input.new_video_urls);
        if !input.remove_images.is_empty() {
            self.images.retain(|url| !input.remove_images.contains(url));
        }

        self.specs.fill_nali();
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Trimmed, non-empty parts of the comma-separated location
    pub fn location_parts(&self) -> impl Iterator<Item = &str> {
        self.location
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> PropertyInput {
        PropertyInput {
            title: Some("Cedar Cottage".to_string()),
            price: Some("₹ 85,00,000".to_string()),
            location: Some("Landour, Mussoorie, Uttarakhand".to_string()),
            category: Some("Buy".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_requires_fields() {
        let err = Property::create(PropertyInput {
            title: Some("  ".to_string()),
            ..Default::default()
        })
        .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("title"));
        assert!(message.contains("price"));
        assert!(message.contains("location"));
        assert!(message.contains("category"));
    }

    #[test]
    fn test_create_rejects_unknown_category() {
        let result = Property::create(PropertyInput {
            category: Some("rent".to_string()),
            ..input()
        });
        assert!(matches!(result, Err(Error::Validation { .. })));
    }

    #[test]
    fn test_create_fills_nali_and_id() {
        let property = Property::create(PropertyInput {
            specs: Some(Specs {
                land_size: Some("5400".to_string()),
                ..Default::default()
            }),
            new_images: vec!["/uploads/a.jpg".to_string()],
            ..input()
        })
        .unwrap();

        assert!(!property.id.is_empty());
        assert_eq!(property.category, Category::Buy);
        assert_eq!(property.specs.nali_size.as_deref(), Some("2.5 Nali"));
        assert_eq!(property.images, vec!["/uploads/a.jpg"]);
    }

    #[test]
    fn test_apply_merges_uploaded_urls() {
        let mut property = Property::create(PropertyInput {
            images: Some(vec!["/uploads/a.jpg".to_string()]),
            video_urls: Some(vec!["https://youtu.be/x".to_string()]),
            ..input()
        })
        .unwrap();

        property
            .apply(PropertyInput {
                new_images: vec!["/uploads/a.jpg".to_string(), "/uploads/b.jpg".to_string()],
                new_video_urls: vec!["https://youtu.be/y".to_string()],
                ..Default::default()
            })
            .unwrap();

        assert_eq!(property.images, vec!["/uploads/a.jpg", "/uploads/b.jpg"]);
        assert_eq!(
            property.video_urls,
            vec!["https://youtu.be/x", "https://youtu.be/y"]
        );
        assert_eq!(property.title, "Cedar Cottage");

        property
            .apply(PropertyInput {
                remove_images: vec!["/uploads/a.jpg".to_string()],
                ..Default::default()
            })
            .unwrap();
        assert_eq!(property.images, vec!["/uploads/b.jpg"]);
    }

    #[test]
    fn test_explicit_nali_is_kept() {
        let mut specs = Specs {
            land_size: Some("2160".to_string()),
            nali_size: Some("1 Nali (approx)".to_string()),
            ..Default::default()
        };
        specs.fill_nali();
        assert_eq!(specs.nali_size.as_deref(), Some("1 Nali (approx)"));
    }

    #[test]
    fn test_location_parts() {
        let property = Property::create(PropertyInput {
            location: Some(" Landour ,Mussoorie,, Uttarakhand ".to_string()),
            ..input()
        })
        .unwrap();
        let parts: Vec<&str> = property.location_parts().collect();
        assert_eq!(parts, vec!["Landour", "Mussoorie", "Uttarakhand"]);
    }

    #[test]
    fn test_deserialize_numeric_price() {
        let property: Property = serde_json::from_str(
            r#"{"id":"1","title":"Plot","price":3500000,"location":"Nainital","category":"buy"}"#,
        )
        .unwrap();
        assert_eq!(property.price, "3500000");
        assert!(property.images.is_empty());
    }

    #[test]
    fn test_string_counts_in_stored_record() {
        let json = r#"{
            "id": "p1",
            "title": "Deodar House",
            "price": "₹ 95,00,000",
            "location": "Mussoorie",
            "category": "buy",
            "specs": { "bedrooms": "3", "bathrooms": 2, "landSize": 4320 }
        }"#;
        let property: Property = serde_json::from_str(json).unwrap();
        assert_eq!(property.specs.bedrooms, Some(3));
        assert_eq!(property.specs.bathrooms, Some(2));
        assert_eq!(property.specs.land_size.as_deref(), Some("4320"));

        let input: PropertyInput =
            serde_json::from_str(r#"{"specs": {"bedrooms": "4", "bathrooms": ""}}"#).unwrap();
        let specs = input.specs.unwrap();
        assert_eq!(specs.bedrooms, Some(4));
        assert_eq!(specs.bathrooms, None);
    }

    #[test]
    fn test_land_size_edit_recomputes_nali() {
        let mut property = Property::create(PropertyInput {
            specs: Some(Specs {
                land_size: Some("2160".to_string()),
                ..Default::default()
            }),
            ..input()
        })
        .unwrap();
        assert_eq!(property.specs.nali_size.as_deref(), Some("1 Nali"));

        // Edit form posts the whole specs object back, old Nali included
        property
            .apply(PropertyInput {
                specs: Some(Specs {
                    land_size: Some("6480".to_string()),
                    nali_size: Some("1 Nali".to_string()),
                    ..Default::default()
                }),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(property.specs.nali_size.as_deref(), Some("3 Nali"));

        // Without a Nali value at all
        property
            .apply(PropertyInput {
                specs: Some(Specs {
                    land_size: Some("5400".to_string()),
                    ..Default::default()
                }),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(property.specs.nali_size.as_deref(), Some("2.5 Nali"));
    }

    #[test]
    fn test_hand_written_nali_survives_land_size_edit() {
        let mut specs = Specs {
            land_size: Some("2160".to_string()),
            nali_size: Some("about 1 Nali".to_string()),
            ..Default::default()
        };
        specs.replace(Specs {
            land_size: Some("4320".to_string()),
            nali_size: Some("about 1 Nali".to_string()),
            ..Default::default()
        });
        assert_eq!(specs.nali_size.as_deref(), Some("about 1 Nali"));
    }

    #[test]
    fn test_featured_order_clearing() {
        let mut property = Property::create(input()).unwrap();
        let set: PropertyInput =
            serde_json::from_str(r#"{"featured": true, "featuredOrder": 3}"#).unwrap();
        property.apply(set).unwrap();
        assert_eq!(property.featured_order, Some(3));

        // Absent field leaves the order alone
        property.apply(PropertyInput::default()).unwrap();
        assert_eq!(property.featured_order, Some(3));

        let clear: PropertyInput = serde_json::from_str(r#"{"featuredOrder": null}"#).unwrap();
        property.apply(clear).unwrap();
        assert_eq!(property.featured_order, None);

        property
            .apply(serde_json::from_str(r#"{"featuredOrder": 1}"#).unwrap())
            .unwrap();
        assert_eq!(property.featured_order, Some(1));

        // Un-featuring drops the stale order
        property
            .apply(serde_json::from_str(r#"{"featured": false}"#).unwrap())
            .unwrap();
        assert!(!property.featured);
        assert_eq!(property.featured_order, None);
    }
}
