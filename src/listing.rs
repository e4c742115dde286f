//! Property search
//!
//! A linear scan over the property list. Every criterion is optional and
//! criteria combine with AND.

use serde::Deserialize;
use std::cmp::Ordering;

use crate::model::de::opt_flag;
use crate::model::Property;
use crate::units::parse_price;

/// Raw query string of `GET /api/properties`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyQuery {
    pub category: Option<String>,
    pub location: Option<String>,
    pub property_type: Option<String>,
    pub price_min: Option<String>,
    pub price_max: Option<String>,
    /// `true`/`false` or `1`/`0`
    #[serde(default, deserialize_with = "opt_flag")]
    pub featured: Option<bool>,
}

/// Parsed search criteria
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyFilter {
    /// Lowercased; a value that is not a known category matches nothing
    pub category: Option<String>,
    pub location: Option<String>,
    pub property_type: Option<String>,
    pub price_min: Option<u64>,
    pub price_max: Option<u64>,
    pub featured_only: bool,
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("all"))
}

impl From<PropertyQuery> for PropertyFilter {
    /// Unparseable price bounds are ignored rather than rejected, matching
    /// how the site's filter dropdowns behave.
    fn from(query: PropertyQuery) -> Self {
        Self {
            category: blank_to_none(query.category).map(|c| c.to_lowercase()),
            location: blank_to_none(query.location).map(|l| l.to_lowercase()),
            property_type: blank_to_none(query.property_type).map(|t| t.to_lowercase()),
            price_min: query.price_min.as_deref().and_then(parse_price),
            price_max: query.price_max.as_deref().and_then(parse_price),
            featured_only: query.featured.unwrap_or(false),
        }
    }
}

impl PropertyFilter {
    fn has_price_bound(&self) -> bool {
        self.price_min.is_some() || self.price_max.is_some()
    }

    /// Whether a single property passes every criterion
    pub fn matches(&self, property: &Property) -> bool {
        if let Some(category) = &self.category {
            if property.category.to_string() != *category {
                return false;
            }
        }

        if let Some(location) = &self.location {
            if !property
                .location_parts()
                .any(|part| part.to_lowercase() == *location)
            {
                return false;
            }
        }

        if let Some(property_type) = &self.property_type {
            if property.property_type.trim().to_lowercase() != *property_type {
                return false;
            }
        }

        if self.has_price_bound() {
            let Some(price) = parse_price(&property.price) else {
                return false;
            };
            if self.price_min.is_some_and(|min| price < min) {
                return false;
            }
            if self.price_max.is_some_and(|max| price > max) {
                return false;
            }
        }

        if self.featured_only && !property.featured {
            return false;
        }

        true
    }

    /// Filter a property list, keeping stored order.
    ///
    /// Featured-only results are ordered by `featuredOrder` (unset last),
    /// then most recently updated.
    pub fn apply(&self, properties: Vec<Property>) -> Vec<Property> {
        let mut results: Vec<Property> = properties
            .into_iter()
            .filter(|p| self.matches(p))
            .collect();

        if self.featured_only {
            results.sort_by(featured_ordering);
        }

        results
    }
}

fn featured_ordering(a: &Property, b: &Property) -> Ordering {
    match (a.featured_order, b.featured_order) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
    .then_with(|| b.updated_at.cmp(&a.updated_at))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PropertyInput;

    fn property(title: &str, price: &str, location: &str, category: &str, kind: &str) -> Property {
        Property::create(PropertyInput {
            title: Some(title.to_string()),
            price: Some(price.to_string()),
            location: Some(location.to_string()),
            category: Some(category.to_string()),
            property_type: Some(kind.to_string()),
            ..Default::default()
        })
        .unwrap()
    }

    fn sample() -> Vec<Property> {
        vec![
            property("Oak Villa", "₹ 1,20,00,000", "Landour, Mussoorie", "buy", "Villa"),
            property("Pine Cottage", "₹ 75,00,000", "Mussoorie, Dehradun", "buy", "Cottage"),
            property("Lake Flat", "₹ 35,000", "Nainital", "lease", "Apartment"),
            property("Hill Plot", "Price on request", "Bhimtal, Nainital", "buy", "Plot"),
            property("Orchard Plot", "₹ 50,00,000", "Ramgarh, Nainital", "buy", "plot"),
        ]
    }

    fn titles(results: &[Property]) -> Vec<&str> {
        results.iter().map(|p| p.title.as_str()).collect()
    }

    fn filter(query: PropertyQuery) -> Vec<Property> {
        PropertyFilter::from(query).apply(sample())
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        assert_eq!(filter(PropertyQuery::default()).len(), 5);
    }

    #[test]
    fn test_category() {
        let results = filter(PropertyQuery {
            category: Some("Lease".to_string()),
            ..Default::default()
        });
        assert_eq!(titles(&results), vec!["Lake Flat"]);
    }

    #[test]
    fn test_location_matches_whole_parts_only() {
        let results = filter(PropertyQuery {
            location: Some("mussoorie".to_string()),
            ..Default::default()
        });
        assert_eq!(titles(&results), vec!["Oak Villa", "Pine Cottage"]);

        // Substrings of a part do not match
        let results = filter(PropertyQuery {
            location: Some("Naini".to_string()),
            ..Default::default()
        });
        assert!(results.is_empty());
    }

    #[test]
    fn test_property_type_is_case_insensitive() {
        let results = filter(PropertyQuery {
            property_type: Some("PLOT".to_string()),
            ..Default::default()
        });
        assert_eq!(titles(&results), vec!["Hill Plot", "Orchard Plot"]);
    }

    #[test]
    fn test_price_range_is_inclusive() {
        let results = filter(PropertyQuery {
            price_min: Some("5000000".to_string()),
            price_max: Some("7500000".to_string()),
            ..Default::default()
        });
        assert_eq!(titles(&results), vec!["Pine Cottage", "Orchard Plot"]);
    }

    #[test]
    fn test_price_bound_excludes_unpriced() {
        let results = filter(PropertyQuery {
            price_min: Some("0".to_string()),
            ..Default::default()
        });
        assert!(!titles(&results).contains(&"Hill Plot"));
        assert_eq!(results.len(), 4);
    }

    #[test]
    fn test_formatted_bounds_and_garbage() {
        let parsed = PropertyFilter::from(PropertyQuery {
            price_min: Some("50,00,000".to_string()),
            price_max: Some("any".to_string()),
            category: Some("rent".to_string()),
            location: Some("all".to_string()),
            ..Default::default()
        });
        assert_eq!(parsed.price_min, Some(5_000_000));
        assert_eq!(parsed.price_max, None);
        assert_eq!(parsed.category.as_deref(), Some("rent"));
        assert_eq!(parsed.location, None);
    }

    #[test]
    fn test_unknown_category_matches_nothing() {
        let results = filter(PropertyQuery {
            category: Some("rent".to_string()),
            ..Default::default()
        });
        assert!(results.is_empty());

        // "all" still means no category filter
        let results = filter(PropertyQuery {
            category: Some("All".to_string()),
            ..Default::default()
        });
        assert_eq!(results.len(), 5);
    }

    #[test]
    fn test_combined_criteria() {
        let results = filter(PropertyQuery {
            category: Some("buy".to_string()),
            location: Some("Nainital".to_string()),
            price_max: Some("6000000".to_string()),
            ..Default::default()
        });
        assert_eq!(titles(&results), vec!["Orchard Plot"]);
    }

    #[test]
    fn test_featured_ordering() {
        let mut properties = sample();
        properties[0].featured = true;
        properties[0].featured_order = Some(2);
        properties[2].featured = true;
        properties[2].featured_order = Some(1);
        properties[4].featured = true;

        let results = PropertyFilter::from(PropertyQuery {
            featured: Some(true),
            ..Default::default()
        })
        .apply(properties);
        assert_eq!(titles(&results), vec!["Lake Flat", "Oak Villa", "Orchard Plot"]);
    }
}
