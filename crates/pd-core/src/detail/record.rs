use serde::{Deserialize, Serialize};

/// Name + URL pair used throughout the catalog API for nested resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// Sprite image URIs. Every slot may be null in the upstream document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sprites {
    pub front_default: Option<String>,
    pub back_default: Option<String>,
    pub front_shiny: Option<String>,
    pub back_shiny: Option<String>,
    pub front_female: Option<String>,
    pub back_female: Option<String>,
    pub front_shiny_female: Option<String>,
    pub back_shiny_female: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSlot {
    pub slot: u8,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatEntry {
    pub base_stat: u32,
    #[serde(default)]
    pub effort: u32,
    pub stat: NamedResource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilitySlot {
    pub ability: NamedResource,
    #[serde(default)]
    pub is_hidden: bool,
    pub slot: u8,
}

/// Full projection of one catalog entry's detail document.
/// 单个目录条目详情文档的完整投影
///
/// Height is in decimeters and weight in hectograms, exactly as served.
/// Use [`PokemonDetail::height_m`] / [`PokemonDetail::weight_kg`] for display units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonDetail {
    pub id: u32,
    pub name: String,
    pub height: u32,
    pub weight: u32,
    /// Null for some forms in the live API.
    #[serde(default)]
    pub base_experience: Option<u32>,
    #[serde(default)]
    pub sprites: Sprites,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub stats: Vec<StatEntry>,
    #[serde(default)]
    pub abilities: Vec<AbilitySlot>,
}

impl PokemonDetail {
    pub fn height_m(&self) -> f64 {
        f64::from(self.height) / 10.0
    }

    pub fn weight_kg(&self) -> f64 {
        f64::from(self.weight) / 10.0
    }

    /// Type names in document order.
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.types.iter().map(|t| t.kind.name.as_str())
    }

    /// First listed type, used to pick the detail view's accent colour.
    pub fn primary_type(&self) -> Option<&str> {
        self.types.first().map(|t| t.kind.name.as_str())
    }
}
