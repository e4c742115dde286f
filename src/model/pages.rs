//! Singleton page documents
//!
//! Each page is one JSON object in its own file. Reads bootstrap the file
//! from [`Default`] when it is missing; saves overwrite the whole document.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::model::content::Seo;

/// A singleton document persisted in its own data file
pub trait Document: Serialize + DeserializeOwned + Default + Send + Sync + 'static {
    /// File name under the data directory
    const FILE: &'static str;
}

// =============================================================================
// SHARED BLOCKS
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Hero {
    pub title: String,
    pub subtitle: String,
    pub image: String,
    pub cta_text: String,
    pub cta_link: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Highlight {
    pub title: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Testimonial {
    pub name: String,
    pub location: String,
    pub quote: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamMember {
    pub name: String,
    pub role: String,
    pub photo: String,
    pub bio: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stat {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuideSection {
    pub heading: String,
    pub body: String,
    pub image: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLinks {
    pub facebook: String,
    pub instagram: String,
    pub youtube: String,
    pub linkedin: String,
}

// =============================================================================
// HOME
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HomePageContent {
    pub hero: Hero,
    pub intro: String,
    pub featured_heading: String,
    pub highlights: Vec<Highlight>,
    pub testimonials: Vec<Testimonial>,
    pub seo: Seo,
}

impl Default for HomePageContent {
    fn default() -> Self {
        Self {
            hero: Hero {
                title: "Find your home in the hills".to_string(),
                subtitle: "Cottages, villas and plots across Uttarakhand".to_string(),
                image: "/images/hero-home.jpg".to_string(),
                cta_text: "Browse properties".to_string(),
                cta_link: "/properties".to_string(),
            },
            intro: "We help families and investors buy and lease property in the Himalayan foothills."
                .to_string(),
            featured_heading: "Featured properties".to_string(),
            highlights: vec![
                Highlight {
                    title: "Verified titles".to_string(),
                    description: "Every listing is checked before it goes live.".to_string(),
                    icon: "shield".to_string(),
                },
                Highlight {
                    title: "Local expertise".to_string(),
                    description: "Agents who live where they sell.".to_string(),
                    icon: "map".to_string(),
                },
            ],
            testimonials: Vec::new(),
            seo: Seo::new(
                "Property in Uttarakhand | Buy and lease",
                "Cottages, villas and land for sale and lease in Uttarakhand.",
            ),
        }
    }
}

impl Document for HomePageContent {
    const FILE: &'static str = "home.json";
}

// =============================================================================
// ABOUT
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AboutContent {
    pub title: String,
    pub subtitle: String,
    pub hero_image: String,
    pub story: String,
    pub mission: String,
    pub vision: String,
    pub team: Vec<TeamMember>,
    pub stats: Vec<Stat>,
    pub seo: Seo,
}

impl Default for AboutContent {
    fn default() -> Self {
        Self {
            title: "About us".to_string(),
            subtitle: "Rooted in the mountains".to_string(),
            hero_image: "/images/hero-about.jpg".to_string(),
            story: String::new(),
            mission: String::new(),
            vision: String::new(),
            team: Vec::new(),
            stats: vec![
                Stat {
                    label: "Properties sold".to_string(),
                    value: "0".to_string(),
                },
                Stat {
                    label: "Years in business".to_string(),
                    value: "0".to_string(),
                },
            ],
            seo: Seo::new("About us", "Who we are and how we work."),
        }
    }
}

impl Document for AboutContent {
    const FILE: &'static str = "about.json";
}

// =============================================================================
// CONTACT PAGE
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactPageContent {
    pub title: String,
    pub subtitle: String,
    pub hero_image: String,
    pub phone: String,
    pub email: String,
    pub whatsapp: String,
    pub address: String,
    pub office_hours: String,
    pub map_embed_url: String,
    pub seo: Seo,
}

impl Default for ContactPageContent {
    fn default() -> Self {
        Self {
            title: "Contact us".to_string(),
            subtitle: "Tell us what you are looking for".to_string(),
            hero_image: "/images/hero-contact.jpg".to_string(),
            phone: String::new(),
            email: String::new(),
            whatsapp: String::new(),
            address: String::new(),
            office_hours: "Mon-Sat, 10am-6pm".to_string(),
            map_embed_url: String::new(),
            seo: Seo::new("Contact us", "Get in touch about buying or leasing property."),
        }
    }
}

impl Document for ContactPageContent {
    const FILE: &'static str = "contact-page.json";
}

// =============================================================================
// REGION GUIDE
// =============================================================================

/// Region guide page (Uttarakhand)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GuideContent {
    pub region: String,
    pub title: String,
    pub intro: String,
    pub hero_image: String,
    pub sections: Vec<GuideSection>,
    pub faqs: Vec<Faq>,
    pub seo: Seo,
}

impl Default for GuideContent {
    fn default() -> Self {
        Self {
            region: "Uttarakhand".to_string(),
            title: "Buying property in Uttarakhand".to_string(),
            intro: "A short guide to towns, land units and paperwork.".to_string(),
            hero_image: "/images/hero-guide.jpg".to_string(),
            sections: vec![GuideSection {
                heading: "Land measurement".to_string(),
                body: "Plots are usually quoted in Nali. One Nali is about 2160 sq ft."
                    .to_string(),
                image: String::new(),
            }],
            faqs: vec![Faq {
                question: "Can non-residents buy land?".to_string(),
                answer: "Restrictions apply to agricultural land; residential plots up to a limit are allowed."
                    .to_string(),
            }],
            seo: Seo::new(
                "Uttarakhand property guide",
                "Towns, land units and paperwork for buying in Uttarakhand.",
            ),
        }
    }
}

impl Document for GuideContent {
    const FILE: &'static str = "guide.json";
}

// =============================================================================
// SITE SETTINGS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub site_name: String,
    pub tagline: String,
    pub logo: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub whatsapp_number: String,
    pub currency_symbol: String,
    pub social: SocialLinks,
    pub seo: Seo,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            site_name: "Hill Homes".to_string(),
            tagline: "Property in the Himalayan foothills".to_string(),
            logo: "/images/logo.svg".to_string(),
            contact_email: String::new(),
            contact_phone: String::new(),
            whatsapp_number: String::new(),
            currency_symbol: "₹".to_string(),
            social: SocialLinks::default(),
            seo: Seo::new("Hill Homes", "Property in the Himalayan foothills"),
        }
    }
}

impl Document for Settings {
    const FILE: &'static str = "settings.json";
}
