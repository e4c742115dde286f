//! Slug-keyed content pages (blog posts, region articles, landing copy)

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::core::error::{Error, Result};
use crate::model::new_id;

/// Data file for content pages
pub const FILE: &str = "content.json";

static SLUG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap());

/// SEO metadata shared by every editable page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Seo {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
}

impl Seo {
    pub fn new(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            keywords: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentPage {
    pub id: String,
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero_image: Option<String>,
    #[serde(default)]
    pub seo: Seo,
    #[serde(default = "published_default")]
    pub published: bool,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

fn published_default() -> bool {
    true
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentInput {
    pub slug: Option<String>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub hero_image: Option<String>,
    pub seo: Option<Seo>,
    pub published: Option<bool>,
}

/// Validate and normalise a slug
pub fn normalize_slug(slug: &str) -> Result<String> {
    let slug = slug.trim().to_lowercase();
    if !SLUG_RE.is_match(&slug) {
        return Err(Error::validation(format!(
            "invalid slug '{}': use lowercase letters, digits and single dashes",
            slug
        )));
    }
    Ok(slug)
}

impl ContentPage {
    pub fn create(input: ContentInput) -> Result<Self> {
        let slug = match input.slug.as_deref() {
            Some(slug) if !slug.trim().is_empty() => normalize_slug(slug)?,
            _ => return Err(Error::validation("slug is required")),
        };
        let title = match input.title.as_deref().map(str::trim) {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => return Err(Error::validation("title is required")),
        };

        let now = Utc::now();
        Ok(Self {
            id: new_id(),
            slug,
            title,
            body: input.body.unwrap_or_default(),
            hero_image: input.hero_image.filter(|s| !s.trim().is_empty()),
            seo: input.seo.unwrap_or_default(),
            published: input.published.unwrap_or(true),
            created_at: now,
            updated_at: now,
        })
    }

    /// Overwrite supplied fields, keeping `id` and `createdAt`
    pub fn apply(&mut self, input: ContentInput) -> Result<()> {
        if let Some(slug) = input.slug {
            self.slug = normalize_slug(&slug)?;
        }
        if let Some(title) = input.title {
            let title = title.trim().to_string();
            if title.is_empty() {
                return Err(Error::validation("title cannot be empty"));
            }
            self.title = title;
        }
        if let Some(body) = input.body {
            self.body = body;
        }
        if let Some(hero) = input.hero_image {
            self.hero_image = Some(hero).filter(|s| !s.trim().is_empty());
        }
        if let Some(seo) = input.seo {
            self.seo = seo;
        }
        if let Some(published) = input.published {
            self.published = published;
        }
        self.updated_at = Utc::now();
        Ok(())
    }
}

/// Newest edits first
pub fn sort_by_updated(pages: &mut [ContentPage]) {
    pages.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
}
