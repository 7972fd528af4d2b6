use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// A catalog section that is polled independently.
///
/// Declaration order is the poll order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "bestsellers")]
    Bestsellers,
    #[serde(rename = "sale")]
    Sale,
    #[serde(rename = "exclusive")]
    Exclusive,
    #[serde(rename = "newArrivals", alias = "new-arrivals", alias = "new_arrivals")]
    NewArrivals,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Bestsellers,
        Category::Sale,
        Category::Exclusive,
        Category::NewArrivals,
    ];

    /// Canonical key used in config files, logs, and the CLI.
    #[must_use]
    pub fn as_key(self) -> &'static str {
        match self {
            Category::Bestsellers => "bestsellers",
            Category::Sale => "sale",
            Category::Exclusive => "exclusive",
            Category::NewArrivals => "newArrivals",
        }
    }

    /// Human-readable name for notification footers and headings.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Category::Bestsellers => "Bestsellers",
            Category::Sale => "Sale",
            Category::Exclusive => "Exclusive",
            Category::NewArrivals => "New Arrivals",
        }
    }

    fn valid_keys() -> String {
        Self::ALL
            .iter()
            .map(|c| c.as_key())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_key())
    }
}

impl FromStr for Category {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "bestsellers" => Ok(Category::Bestsellers),
            "sale" => Ok(Category::Sale),
            "exclusive" => Ok(Category::Exclusive),
            "newArrivals" | "new-arrivals" | "new_arrivals" => Ok(Category::NewArrivals),
            other => Err(CoreError::UnknownCategory {
                key: other.to_string(),
                valid: Self::valid_keys(),
            }),
        }
    }
}
