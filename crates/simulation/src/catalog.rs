//! Product metadata catalog.
//!
//! Every purchasable product carries a consumption category, an ecological
//! impact band, a durability rating and a reflection text shown by the
//! purchase decision modal. Records are built once at startup and never
//! mutated; lookups for unregistered products fall back to a default
//! light-desire record so a purchase can never be blocked by missing
//! metadata.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Category and impact enums
// ---------------------------------------------------------------------------

/// Consumption classification of a product: real need vs. manufactured want.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductCategory {
    /// Food, water. Essential to live.
    NecessityBasic,
    /// Tools, clothing, books. Useful and long-lived.
    NecessityMedium,
    /// Basic entertainment and treats.
    DesireLight,
    /// Luxuries and redundant technology.
    DesireStrong,
}

impl ProductCategory {
    /// Pollution points added to the world score when a purchase of this
    /// category is confirmed.
    pub fn contamination_weight(self) -> f32 {
        match self {
            Self::NecessityBasic => 1.0,
            Self::NecessityMedium => 3.0,
            Self::DesireLight => 8.0,
            Self::DesireStrong => 15.0,
        }
    }

    /// Whether the decision modal frames this purchase as a need.
    pub fn is_necessity(self) -> bool {
        matches!(self, Self::NecessityBasic | Self::NecessityMedium)
    }

    /// Human-readable category name for the comparison table.
    pub fn label(self) -> &'static str {
        match self {
            Self::NecessityBasic => "Necesidad básica",
            Self::NecessityMedium => "Necesidad media",
            Self::DesireLight => "Deseo leve",
            Self::DesireStrong => "Deseo fuerte",
        }
    }
}

/// Ecological impact band of a single product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImpactBand {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl ImpactBand {
    /// Badge label shown in the comparison table.
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "BAJO",
            Self::Medium => "MEDIO",
            Self::High => "ALTO",
            Self::VeryHigh => "MUY ALTO",
        }
    }

    /// Badge color, shared with the decision modal's accent color.
    pub fn color(self) -> (u8, u8, u8) {
        match self {
            Self::Low => (80, 220, 80),
            Self::Medium => (255, 200, 60),
            Self::High => (255, 140, 60),
            Self::VeryHigh => (255, 80, 80),
        }
    }
}

// ---------------------------------------------------------------------------
// Records and catalog
// ---------------------------------------------------------------------------

/// Immutable metadata for one product, keyed by product name in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub category: ProductCategory,
    pub impact: ImpactBand,
    /// How long the product lasts, 0-100. Consumables are near 0.
    pub durability: u8,
    /// Reference price shown in the comparison table.
    pub price: u32,
    /// Reflection text shown by the decision modal before buying.
    pub reflection: String,
}

impl Default for ProductRecord {
    /// Fallback for unregistered products: assume a light desire.
    fn default() -> Self {
        Self {
            category: ProductCategory::DesireLight,
            impact: ImpactBand::Medium,
            durability: 50,
            price: 100,
            reflection: "¿Realmente necesitas esto?".to_string(),
        }
    }
}

/// Static lookup of product metadata, populated once at startup.
#[derive(Resource, Debug, Clone)]
pub struct ProductCatalog {
    products: BTreeMap<String, ProductRecord>,
}

impl Default for ProductCatalog {
    fn default() -> Self {
        let mut catalog = Self {
            products: BTreeMap::new(),
        };

        catalog.insert(
            "Manzana",
            ProductRecord {
                category: ProductCategory::NecessityBasic,
                impact: ImpactBand::Low,
                durability: 1,
                price: 50,
                reflection: "La comida es esencial para vivir. Es una necesidad real."
                    .to_string(),
            },
        );
        catalog.insert(
            "Galleta",
            ProductRecord {
                category: ProductCategory::DesireLight,
                impact: ImpactBand::Medium,
                durability: 1,
                price: 80,
                reflection: "¿Realmente tienes hambre o solo antojo de algo dulce?"
                    .to_string(),
            },
        );
        catalog.insert(
            "Libro",
            ProductRecord {
                category: ProductCategory::NecessityMedium,
                impact: ImpactBand::Low,
                durability: 100,
                price: 200,
                reflection: "El conocimiento es valioso y este libro durará años."
                    .to_string(),
            },
        );
        catalog.insert(
            "Celular",
            ProductRecord {
                category: ProductCategory::DesireStrong,
                impact: ImpactBand::VeryHigh,
                durability: 80,
                price: 500,
                reflection: "¿Necesitas otro celular? La tecnología consume recursos valiosos."
                    .to_string(),
            },
        );
        catalog.insert(
            "Tablet",
            ProductRecord {
                category: ProductCategory::DesireStrong,
                impact: ImpactBand::VeryHigh,
                durability: 80,
                price: 800,
                reflection: "Una tablet más no te hará más feliz. ¿Ya tienes otros dispositivos?"
                    .to_string(),
            },
        );

        catalog
    }
}

impl ProductCatalog {
    /// Register a product. Later registrations replace earlier ones.
    pub fn insert(&mut self, name: &str, record: ProductRecord) {
        self.products.insert(name.to_string(), record);
    }

    /// Look up a product's metadata.
    pub fn get(&self, name: &str) -> Option<&ProductRecord> {
        self.products.get(name)
    }

    /// Look up a product, falling back to the default light-desire record
    /// so purchase flow never stalls on missing metadata.
    pub fn record_or_default(&self, name: &str) -> ProductRecord {
        self.products.get(name).cloned().unwrap_or_default()
    }

    /// Contamination weight for a product, via its category.
    pub fn contamination_weight(&self, name: &str) -> f32 {
        self.record_or_default(name).category.contamination_weight()
    }

    /// All products in catalog (name) order, for the comparison table.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ProductRecord)> {
        self.products.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

pub struct CatalogPlugin;

impl Plugin for CatalogPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ProductCatalog>();
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
