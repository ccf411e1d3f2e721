use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One game entry from a search, category or A-Z listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Game title as shown in the listing
    pub title: String,

    /// Last path segment of the game page URL
    pub slug: String,

    /// Absolute URL of the game page
    pub url: String,

    /// Cover image, when the listing has one
    pub thumbnail: Option<String>,

    /// Category tags attached to the entry
    pub tags: BTreeSet<String>,
}

/// One page of a paginated listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingPage {
    pub items: Vec<SearchResult>,
    pub page: u32,
    pub has_next: bool,
}

pub type CategoryPage = ListingPage;
pub type AzPage = ListingPage;

/// Hardware requirements for one tier
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementSet {
    pub os: Option<String>,
    pub processor: Option<String>,
    pub memory: Option<String>,
    pub graphics: Option<String>,
    pub storage: Option<String>,
}

impl RequirementSet {
    pub fn is_empty(&self) -> bool {
        self.os.is_none()
            && self.processor.is_none()
            && self.memory.is_none()
            && self.graphics.is_none()
            && self.storage.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemRequirements {
    pub minimum: RequirementSet,
    pub recommended: RequirementSet,
}

impl SystemRequirements {
    pub fn is_empty(&self) -> bool {
        self.minimum.is_empty() && self.recommended.is_empty()
    }
}

/// A download offered by one file host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MirrorLink {
    /// File host name, e.g. "UploadHaven"
    pub provider: String,
    pub url: String,
}

/// Everything extracted from a single game page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameDetail {
    pub slug: String,
    /// Canonical page URL, always `{base}/{slug}/`
    pub url: String,
    pub title: String,
    pub thumbnail: Option<String>,
    pub description: String,
    pub requirements: SystemRequirements,
    pub screenshots: Vec<String>,
    pub download_links: Vec<MirrorLink>,
    /// Size printed next to the download button, e.g. "12.4 GB"
    pub file_size: Option<String>,
    pub genres: Vec<String>,
    pub developer: Option<String>,
    pub publisher: Option<String>,
    pub release_date: Option<String>,
}
