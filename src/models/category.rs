use std::fmt;
use std::str::FromStr;

use crate::error::ScrapeError;
use crate::utils::display_category;

/// Subject categories published by the listing site.
///
/// The set is closed: the site only serves these eight slugs, and anything
/// else is rejected before a browser is launched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Category {
    BusinessAndEconomics,
    MedicalAndHealthScience,
    MathematicsAndStatistics,
    #[default]
    EngineeringAndTechnology,
    PhysicalAndLifeSciences,
    SocialSciencesAndHumanities,
    Education,
    Law,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::BusinessAndEconomics,
        Category::MedicalAndHealthScience,
        Category::MathematicsAndStatistics,
        Category::EngineeringAndTechnology,
        Category::PhysicalAndLifeSciences,
        Category::SocialSciencesAndHumanities,
        Category::Education,
        Category::Law,
    ];

    /// URL slug as used by the listing site
    pub fn slug(&self) -> &'static str {
        match self {
            Category::BusinessAndEconomics => "business-and-economics",
            Category::MedicalAndHealthScience => "medical-and-health-science",
            Category::MathematicsAndStatistics => "mathematics-and-statistics",
            Category::EngineeringAndTechnology => "engineering-and-technology",
            Category::PhysicalAndLifeSciences => "physical-and-life-sciences",
            Category::SocialSciencesAndHumanities => "social-sciences-and-humanities",
            Category::Education => "education",
            Category::Law => "law",
        }
    }

    /// Human-readable name (e.g., "Engineering And Technology")
    pub fn display_name(&self) -> String {
        display_category(self.slug())
    }
}

impl FromStr for Category {
    type Err = ScrapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.slug() == s)
            .ok_or(ScrapeError::InvalidCategory)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}
