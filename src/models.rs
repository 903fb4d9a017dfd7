use serde::{Deserialize, Serialize};

/// A card as returned by the Pokémon TCG `/cards` endpoint.
/// Only the fields the gallery renders are kept; everything else is ignored.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Card {
    pub id: String,
    pub name: String,
    pub images: CardImages,
    pub set: CardSet,
    /// Energy types, e.g. `["Fire"]`. Trainer and energy cards have none.
    #[serde(default)]
    pub types: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CardImages {
    pub small: String,
    pub large: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CardSet {
    pub name: String,
}

impl Card {
    /// First listed type, if any
    pub fn primary_type(&self) -> Option<&str> {
        self.types
            .as_ref()
            .and_then(|types| types.first())
            .map(String::as_str)
            .filter(|t| !t.is_empty())
    }

    /// Lowercased primary type used for styling, empty when untyped
    pub fn type_class(&self) -> String {
        self.primary_type()
            .map(str::to_lowercase)
            .unwrap_or_default()
    }

    pub fn energy_type(&self) -> Option<EnergyType> {
        EnergyType::from_class(&self.type_class())
    }
}

/// One page of the `/cards` search response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardPage {
    pub data: Vec<Card>,
    #[serde(default)]
    pub total_count: Option<u64>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub page_size: Option<u32>,
    #[serde(default)]
    pub count: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnergyType {
    Colorless,
    Darkness,
    Dragon,
    Fairy,
    Fighting,
    Fire,
    Grass,
    Lightning,
    Metal,
    Psychic,
    Water,
}

impl EnergyType {
    pub fn from_class(class: &str) -> Option<Self> {
        match class {
            "colorless" => Some(EnergyType::Colorless),
            "darkness" => Some(EnergyType::Darkness),
            "dragon" => Some(EnergyType::Dragon),
            "fairy" => Some(EnergyType::Fairy),
            "fighting" => Some(EnergyType::Fighting),
            "fire" => Some(EnergyType::Fire),
            "grass" => Some(EnergyType::Grass),
            "lightning" => Some(EnergyType::Lightning),
            "metal" => Some(EnergyType::Metal),
            "psychic" => Some(EnergyType::Psychic),
            "water" => Some(EnergyType::Water),
            _ => None,
        }
    }

    /// Accent colour used for tile borders and the viewer glow
    pub fn rgb(&self) -> [u8; 3] {
        match self {
            EnergyType::Colorless => [200, 200, 190],
            EnergyType::Darkness => [80, 70, 110],
            EnergyType::Dragon => [200, 160, 40],
            EnergyType::Fairy => [235, 130, 190],
            EnergyType::Fighting => [190, 90, 50],
            EnergyType::Fire => [240, 80, 50],
            EnergyType::Grass => [90, 180, 70],
            EnergyType::Lightning => [250, 210, 40],
            EnergyType::Metal => [150, 160, 170],
            EnergyType::Psychic => [170, 90, 200],
            EnergyType::Water => [60, 140, 230],
        }
    }
}

/// Accent for untyped cards
pub const NEUTRAL_ACCENT: [u8; 3] = [110, 110, 110];
