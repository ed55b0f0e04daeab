//! The static grocery catalog and the dietary filters applied to it.

use std::{fmt::Display, fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::Error;

/// The catalog that ships with the binary.
const BUILTIN_CATALOG: &str = include_str!("../data/groceries.json");

/// The aisle a catalog item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Meat, fish, beans and other protein sources.
    Protein,
    /// Milk, cheese, eggs, etc.
    Dairy,
    /// Rice, pasta, bread, etc.
    Grains,
    /// Fresh and frozen fruit.
    Fruits,
    /// Fresh and frozen vegetables.
    Vegetables,
    /// Chips, popcorn, etc.
    Snacks,
    /// Oils, spreads, canned goods, etc.
    Pantry,
    /// Items without a more specific category.
    General,
    /// Any category this service does not know about.
    #[serde(other)]
    Other,
}

impl Category {
    /// The lowercase name used in JSON and in grocery items.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Protein => "protein",
            Category::Dairy => "dairy",
            Category::Grains => "grains",
            Category::Fruits => "fruits",
            Category::Vegetables => "vegetables",
            Category::Snacks => "snacks",
            Category::Pantry => "pantry",
            Category::General => "general",
            Category::Other => "other",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A product that can be put on a grocery list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// The product name, e.g. "Brown Rice".
    pub name: String,
    /// The aisle the product belongs to.
    pub category: Category,
    /// The price of a single `unit` in dollars.
    #[serde(rename = "price")]
    pub unit_price: f64,
    /// The unit the product is sold in, e.g. "lb" or "dozen".
    pub unit: String,
}

/// The diet a grocery list must respect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DietaryPreference {
    /// Anything goes.
    None,
    /// No grains or fruit.
    Keto,
    /// No protein or dairy, except for beans.
    Vegan,
}

impl From<&str> for DietaryPreference {
    /// Unrecognised preferences mean no filtering.
    fn from(value: &str) -> Self {
        match value {
            "vegan" => DietaryPreference::Vegan,
            "keto" => DietaryPreference::Keto,
            _ => DietaryPreference::None,
        }
    }
}

impl DietaryPreference {
    /// Whether `item` may appear on a list for this diet.
    pub fn allows(&self, item: &CatalogItem) -> bool {
        match self {
            DietaryPreference::Vegan => {
                !matches!(item.category, Category::Protein | Category::Dairy)
                    || item.name.to_lowercase().contains("bean")
            }
            DietaryPreference::Keto => !matches!(item.category, Category::Grains | Category::Fruits),
            DietaryPreference::None => true,
        }
    }
}

#[derive(Deserialize)]
struct CatalogFile {
    groceries: Vec<CatalogItem>,
}

/// The read-only list of products that fallback lists are built from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

impl Catalog {
    /// Create a catalog from `items`.
    pub fn new(items: Vec<CatalogItem>) -> Self {
        Self { items }
    }

    /// The catalog embedded in the binary.
    ///
    /// # Errors
    /// Returns [Error::CatalogLoad] if the embedded JSON is invalid.
    pub fn builtin() -> Result<Self, Error> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Read a catalog from a JSON file of the form `{"groceries": [...]}`.
    ///
    /// # Errors
    /// Returns [Error::CatalogLoad] if the file cannot be read or parsed.
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let text = fs::read_to_string(path)
            .map_err(|error| Error::CatalogLoad(format!("{}: {error}", path.display())))?;

        Self::from_json(&text)
    }

    /// Parse a catalog from JSON text.
    ///
    /// # Errors
    /// Returns [Error::CatalogLoad] if the text is not a valid catalog or an
    /// item has a price that is not a positive number.
    pub fn from_json(text: &str) -> Result<Self, Error> {
        let file: CatalogFile =
            serde_json::from_str(text).map_err(|error| Error::CatalogLoad(error.to_string()))?;

        if let Some(item) = file
            .groceries
            .iter()
            .find(|item| !item.unit_price.is_finite() || item.unit_price <= 0.0)
        {
            return Err(Error::CatalogLoad(format!(
                "\"{}\" has an invalid price {}",
                item.name, item.unit_price
            )));
        }

        Ok(Self::new(file.groceries))
    }

    /// All items in catalog order.
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    /// The number of items in the catalog.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalog has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The items allowed by `preference`, in catalog order.
    pub fn filter(&self, preference: DietaryPreference) -> Vec<&CatalogItem> {
        self.items
            .iter()
            .filter(|item| preference.allows(item))
            .collect()
    }
}
