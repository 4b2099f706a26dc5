use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::unknown_key::{UnknownKeyError, parse_key};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Industry {
    WebDevelopment,
    MobileDevelopment,
    DataScience,
    UiUxDesign,
    DevOps,
    ContentWriting,
    DigitalMarketing,
    Consulting,
}

/// Static pricing data for an industry.
///
/// `base_rate` is a typical USD hourly rate and is informational only; the
/// engine uses `multiplier`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndustryProfile {
    pub base_rate: Decimal,
    pub multiplier: Decimal,
    pub skills: &'static [&'static str],
}

impl Industry {
    pub fn all() -> &'static [Industry] {
        &[
            Self::WebDevelopment,
            Self::MobileDevelopment,
            Self::DataScience,
            Self::UiUxDesign,
            Self::DevOps,
            Self::ContentWriting,
            Self::DigitalMarketing,
            Self::Consulting,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WebDevelopment => "web-development",
            Self::MobileDevelopment => "mobile-development",
            Self::DataScience => "data-science",
            Self::UiUxDesign => "ui-ux-design",
            Self::DevOps => "dev-ops",
            Self::ContentWriting => "content-writing",
            Self::DigitalMarketing => "digital-marketing",
            Self::Consulting => "consulting",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::WebDevelopment => "Web Development",
            Self::MobileDevelopment => "Mobile Development",
            Self::DataScience => "Data Science",
            Self::UiUxDesign => "UI/UX Design",
            Self::DevOps => "DevOps",
            Self::ContentWriting => "Content Writing",
            Self::DigitalMarketing => "Digital Marketing",
            Self::Consulting => "Consulting",
        }
    }

    pub fn profile(&self) -> IndustryProfile {
        match self {
            Self::WebDevelopment => IndustryProfile {
                base_rate: Decimal::from(75),
                multiplier: Decimal::ONE,
                skills: &["React", "Node.js", "TypeScript", "Next.js", "GraphQL"],
            },
            Self::MobileDevelopment => IndustryProfile {
                base_rate: Decimal::from(80),
                multiplier: Decimal::new(11, 1),
                skills: &["Swift", "Kotlin", "Flutter", "React Native"],
            },
            Self::DataScience => IndustryProfile {
                base_rate: Decimal::from(95),
                multiplier: Decimal::new(125, 2),
                skills: &[
                    "Python",
                    "Machine Learning",
                    "SQL",
                    "TensorFlow",
                    "Data Visualization",
                ],
            },
            Self::UiUxDesign => IndustryProfile {
                base_rate: Decimal::from(65),
                multiplier: Decimal::new(95, 2),
                skills: &["Figma", "Prototyping", "User Research", "Design Systems"],
            },
            Self::DevOps => IndustryProfile {
                base_rate: Decimal::from(90),
                multiplier: Decimal::new(12, 1),
                skills: &["AWS", "Docker", "Kubernetes", "Terraform", "CI/CD"],
            },
            Self::ContentWriting => IndustryProfile {
                base_rate: Decimal::from(45),
                multiplier: Decimal::new(8, 1),
                skills: &["SEO", "Copywriting", "Technical Writing", "Editing"],
            },
            Self::DigitalMarketing => IndustryProfile {
                base_rate: Decimal::from(55),
                multiplier: Decimal::new(9, 1),
                skills: &["SEO", "PPC", "Social Media", "Analytics", "Email Marketing"],
            },
            Self::Consulting => IndustryProfile {
                base_rate: Decimal::from(100),
                multiplier: Decimal::new(13, 1),
                skills: &["Strategy", "Project Management", "Business Analysis"],
            },
        }
    }

    pub fn multiplier(&self) -> Decimal {
        self.profile().multiplier
    }
}

impl FromStr for Industry {
    type Err = UnknownKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_key("industry", s, Self::all(), Industry::as_str)
    }
}

impl fmt::Display for Industry {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.label())
    }
}
