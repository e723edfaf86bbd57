use super::{GroceryError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed category vocabulary offered to the UI.
///
/// The set is advisory: items keep their category as plain text, so values
/// written by other tools survive a load untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Category {
    FruitsAndVegetables,
    MeatAndFish,
    Dairy,
    BreadAndCereals,
    Beverages,
    Cleaning,
    Hygiene,
    Other,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 8] = [
        Category::FruitsAndVegetables,
        Category::MeatAndFish,
        Category::Dairy,
        Category::BreadAndCereals,
        Category::Beverages,
        Category::Cleaning,
        Category::Hygiene,
        Category::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::FruitsAndVegetables => "Frutas e Verduras",
            Category::MeatAndFish => "Carnes e Peixes",
            Category::Dairy => "Laticínios",
            Category::BreadAndCereals => "Pães e Cereais",
            Category::Beverages => "Bebidas",
            Category::Cleaning => "Limpeza",
            Category::Hygiene => "Higiene",
            Category::Other => "Outros",
        }
    }

    /// Look up a category by its exact label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.label() == label)
    }
}

/// Category labels in display order, for populating pickers.
pub fn category_labels() -> Vec<&'static str> {
    Category::ALL.iter().map(Category::label).collect()
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Category {
    type Err = GroceryError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_label(s).ok_or_else(|| GroceryError::UnknownCategory(s.to_string()))
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.label().to_string()
    }
}

impl TryFrom<String> for Category {
    type Error = GroceryError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}
