use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

/// Categories the listing site groups games into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Action,
    Adult,
    Adventure,
    Anime,
    Classics,
    Fps,
    Horror,
    Indie,
    OpenWorld,
    Popular,
    Ps2,
    Racing,
    Remastered,
    Rpg,
    Simulation,
    SmallGames,
    Sports,
    VirtualReality,
}

/// A category as presented to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryInfo {
    pub name: String,
    pub slug: String,
    pub url: String,
}

impl Category {
    pub const ALL: [Category; 18] = [
        Category::Action,
        Category::Adult,
        Category::Adventure,
        Category::Anime,
        Category::Classics,
        Category::Fps,
        Category::Horror,
        Category::Indie,
        Category::OpenWorld,
        Category::Popular,
        Category::Ps2,
        Category::Racing,
        Category::Remastered,
        Category::Rpg,
        Category::Simulation,
        Category::SmallGames,
        Category::Sports,
        Category::VirtualReality,
    ];

    /// Display name as the site prints it
    pub fn name(self) -> &'static str {
        match self {
            Category::Action => "ACTION",
            Category::Adult => "ADULT",
            Category::Adventure => "ADVENTURE",
            Category::Anime => "ANIME",
            Category::Classics => "CLASSICS",
            Category::Fps => "FPS",
            Category::Horror => "HORROR",
            Category::Indie => "INDIE",
            Category::OpenWorld => "OPEN WORLD",
            Category::Popular => "POPULAR",
            Category::Ps2 => "PS2",
            Category::Racing => "RACING",
            Category::Remastered => "REMASTERED",
            Category::Rpg => "RPG",
            Category::Simulation => "SIMULATION",
            Category::SmallGames => "SMALL GAMES",
            Category::Sports => "SPORTS",
            Category::VirtualReality => "VIRTUAL REALITY",
        }
    }

    /// Path segment used in category URLs
    pub fn slug(self) -> String {
        self.name().to_lowercase().replace(' ', "-")
    }

    /// First page of the category listing
    pub fn url(self, base: &Url) -> Option<Url> {
        base.join(&format!("category/{}/", self.slug())).ok()
    }

    pub fn info(self, base: &Url) -> CategoryInfo {
        CategoryInfo {
            name: self.name().to_string(),
            slug: self.slug(),
            url: self.url(base).map(String::from).unwrap_or_default(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = Error;

    /// Accepts a slug (`open-world`) or a display name (`Open World`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace([' ', '_'], "-");
        Category::ALL
            .into_iter()
            .find(|c| c.slug() == wanted)
            .ok_or_else(|| Error::InvalidInput(format!("unknown category {:?}", s)))
    }
}
