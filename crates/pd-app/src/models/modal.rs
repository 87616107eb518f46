use super::capitalize;
use super::palette::{stat_label, type_color, DEFAULT_BACKGROUND, DEFAULT_CHIP_COLOR};
use pd_core::detail::PokemonDetail;
use pd_core::fetch::FetchState;
use std::fmt;

/// Highest base stat a bar is scaled against.
pub const STAT_MAX: f64 = 255.0;

const BAR_WIDTH: usize = 20;

/// Which sprite the detail view currently shows; alternates on a timer
/// owned by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpriteFacing {
    #[default]
    Front,
    Back,
}

impl SpriteFacing {
    pub fn toggle(self) -> Self {
        match self {
            SpriteFacing::Front => SpriteFacing::Back,
            SpriteFacing::Back => SpriteFacing::Front,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeChip {
    pub name: String,
    pub color: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatTone {
    High,
    Medium,
    Low,
}

impl StatTone {
    fn from_percentage(percentage: f64) -> Self {
        if percentage > 80.0 {
            StatTone::High
        } else if percentage > 50.0 {
            StatTone::Medium
        } else {
            StatTone::Low
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            StatTone::High => "#4CAF50",
            StatTone::Medium => "#FFC107",
            StatTone::Low => "#FF5252",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatRow {
    pub label: String,
    pub value: u32,
    pub percentage: f64,
    pub tone: StatTone,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbilityChip {
    pub name: String,
    pub hidden: bool,
}

/// Expanded detail view of one entry.
/// 展开后的详情视图
#[derive(Debug, Clone, PartialEq)]
pub struct ModalView {
    pub name: String,
    /// `#001`
    pub number: String,
    pub background: &'static str,
    pub types: Vec<TypeChip>,
    pub front_sprite: Option<String>,
    pub back_sprite: Option<String>,
    pub weight_kg: f64,
    pub height_m: f64,
    pub base_experience: Option<u32>,
    pub stats: Vec<StatRow>,
    pub abilities: Vec<AbilityChip>,
}

impl ModalView {
    pub fn from_detail(detail: &PokemonDetail) -> Self {
        let background = detail
            .primary_type()
            .and_then(type_color)
            .unwrap_or(DEFAULT_BACKGROUND);

        let types = detail
            .type_names()
            .map(|name| TypeChip {
                name: name.to_string(),
                color: type_color(name).unwrap_or(DEFAULT_CHIP_COLOR),
            })
            .collect();

        let stats = detail
            .stats
            .iter()
            .map(|entry| {
                let percentage = f64::from(entry.base_stat) / STAT_MAX * 100.0;
                StatRow {
                    label: stat_label(&entry.stat.name).to_string(),
                    value: entry.base_stat,
                    percentage,
                    tone: StatTone::from_percentage(percentage),
                }
            })
            .collect();

        // Only the first hyphen becomes a space: "soul-heart" → "soul heart".
        let abilities = detail
            .abilities
            .iter()
            .map(|slot| AbilityChip {
                name: slot.ability.name.replacen('-', " ", 1),
                hidden: slot.is_hidden,
            })
            .collect();

        Self {
            name: detail.name.clone(),
            number: format!("#{:03}", detail.id),
            background,
            types,
            front_sprite: detail.sprites.front_default.clone(),
            back_sprite: detail.sprites.back_default.clone(),
            weight_kg: detail.weight_kg(),
            height_m: detail.height_m(),
            base_experience: detail.base_experience,
            stats,
            abilities,
        }
    }

    pub fn sprite(&self, facing: SpriteFacing) -> Option<&str> {
        match facing {
            SpriteFacing::Front => self.front_sprite.as_deref(),
            SpriteFacing::Back => self.back_sprite.as_deref(),
        }
    }
}

impl fmt::Display for ModalView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}  [{}]", capitalize(&self.name), self.number, self.background)?;

        let chips: Vec<String> = self
            .types
            .iter()
            .map(|chip| format!("{} ({})", chip.name, chip.color))
            .collect();
        writeln!(f, "Types: {}", chips.join("  "))?;

        if let Some(sprite) = self.sprite(SpriteFacing::Front) {
            writeln!(f, "Sprite: {sprite}")?;
        }

        let base_experience = self
            .base_experience
            .map(|exp| exp.to_string())
            .unwrap_or_else(|| "-".to_string());
        writeln!(
            f,
            "Weight: {} kg | Height: {} m | Base Exp.: {}",
            self.weight_kg, self.height_m, base_experience
        )?;

        writeln!(f, "Base Stats")?;
        for stat in &self.stats {
            let filled = ((stat.percentage / 100.0) * BAR_WIDTH as f64).round() as usize;
            let filled = filled.min(BAR_WIDTH);
            writeln!(
                f,
                "  {:<8} {:>3} {}{}",
                stat.label,
                stat.value,
                "█".repeat(filled),
                "░".repeat(BAR_WIDTH - filled)
            )?;
        }

        writeln!(f, "Abilities")?;
        for ability in &self.abilities {
            if ability.hidden {
                writeln!(f, "  {} (hidden)", ability.name)?;
            } else {
                writeln!(f, "  {}", ability.name)?;
            }
        }
        Ok(())
    }
}

/// What the detail view shows for a given fetch state.
#[derive(Debug, Clone, PartialEq)]
pub enum ModalContent {
    Loading,
    Ready(Box<ModalView>),
    Unavailable,
}

impl ModalContent {
    pub fn from_state(state: &FetchState<PokemonDetail>) -> Self {
        if state.loading {
            return ModalContent::Loading;
        }
        match &state.value {
            Some(detail) => ModalContent::Ready(Box::new(ModalView::from_detail(detail))),
            None => ModalContent::Unavailable,
        }
    }
}

impl fmt::Display for ModalContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModalContent::Loading => writeln!(f, "loading..."),
            ModalContent::Ready(view) => view.fmt(f),
            ModalContent::Unavailable => writeln!(f, "Could not load the data"),
        }
    }
}
