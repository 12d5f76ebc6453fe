//! Product categories and the catalog category filter.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Catalog product category.
///
/// Matching on categories is case-sensitive and exact; the variants mirror
/// the values allowed by the product table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Men,
    Women,
    Kids,
    Unisex,
}

impl Category {
    /// All categories, in display order.
    pub const ALL: [Self; 4] = [Self::Men, Self::Women, Self::Kids, Self::Unisex];

    /// The category name as stored in the database and shown in the UI.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Men => "Men",
            Self::Women => "Women",
            Self::Kids => "Kids",
            Self::Unisex => "Unisex",
        }
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown category name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category: {0}")]
pub struct CategoryParseError(pub String);

impl FromStr for Category {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Men" => Ok(Self::Men),
            "Women" => Ok(Self::Women),
            "Kids" => Ok(Self::Kids),
            "Unisex" => Ok(Self::Unisex),
            other => Err(CategoryParseError(other.to_string())),
        }
    }
}

/// Category selection driving the catalog view.
///
/// `All` is the synthetic entry shown alongside the real categories; it
/// matches every product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Parse a filter value from a query parameter.
    ///
    /// `"All"`, the empty string, and unrecognised values all select `All` -
    /// an unknown category in the URL degrades to the unfiltered view rather
    /// than erroring.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        Category::from_str(value).map_or(Self::All, Self::Only)
    }

    /// Whether a product with the given category passes this filter.
    #[must_use]
    pub fn matches(self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => selected == category,
        }
    }

    /// The selected value as shown in the filter bar.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Only(category) => category.as_str(),
        }
    }
}
