//! Site data model
//!
//! Plain records serialized to JSON, one file per entity type. No
//! referential integrity is kept between them.

pub mod content;
pub mod de;
pub mod pages;
pub mod property;
pub mod submission;

pub use content::{ContentInput, ContentPage, Seo};
pub use pages::{AboutContent, ContactPageContent, Document, GuideContent, HomePageContent, Settings};
pub use property::{Category, Property, PropertyInput, Specs};
pub use submission::{
    ContactMessage, Inquiry, InquiryStatus, MessageStatus, Submission, SubmissionInput,
};

use crate::core::error::Result;
use crate::store::JsonStore;

/// Generate a record id
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Every list-valued data file
pub const LIST_FILES: [&str; 4] = [
    property::FILE,
    content::FILE,
    Inquiry::FILE,
    ContactMessage::FILE,
];

async fn init_document<T: Document>(store: &JsonStore, force: bool) -> Result<bool> {
    if store.exists(T::FILE) && !force {
        return Ok(false);
    }
    store.save(T::FILE, &T::default()).await?;
    Ok(true)
}

/// Write default documents and empty lists into a data directory.
///
/// Existing files are left alone unless `force` is set. Returns the names
/// of the files that were written.
pub async fn bootstrap(store: &JsonStore, force: bool) -> Result<Vec<&'static str>> {
    let mut written = Vec::new();

    if init_document::<HomePageContent>(store, force).await? {
        written.push(HomePageContent::FILE);
    }
    if init_document::<AboutContent>(store, force).await? {
        written.push(AboutContent::FILE);
    }
    if init_document::<ContactPageContent>(store, force).await? {
        written.push(ContactPageContent::FILE);
    }
    if init_document::<GuideContent>(store, force).await? {
        written.push(GuideContent::FILE);
    }
    if init_document::<Settings>(store, force).await? {
        written.push(Settings::FILE);
    }

    for file in LIST_FILES {
        if store.exists(file) && !force {
            continue;
        }
        store.save(file, &Vec::<serde_json::Value>::new()).await?;
        written.push(file);
    }

    Ok(written)
}
