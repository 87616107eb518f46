use super::capitalize;
use pd_core::catalog::EntityReference;
use pd_core::detail::PokemonDetail;
use pd_core::fetch::FetchState;
use std::fmt;

/// Resolved content of one list card.
#[derive(Debug, Clone, PartialEq)]
pub struct CardDetails {
    pub name: String,
    pub id: u32,
    pub sprite: Option<String>,
    pub height_m: f64,
    pub weight_kg: f64,
    /// Type names in document order
    pub types: Vec<String>,
}

impl CardDetails {
    pub fn from_detail(name: &str, detail: &PokemonDetail) -> Self {
        Self {
            name: name.to_string(),
            id: detail.id,
            sprite: detail.sprites.front_default.clone(),
            height_m: detail.height_m(),
            weight_kg: detail.weight_kg(),
            types: detail.type_names().map(str::to_string).collect(),
        }
    }
}

/// Inline card of the list screen.
///
/// Loading wins over a stale value: while a refetch is in flight the card
/// shows the loading indicator.
#[derive(Debug, Clone, PartialEq)]
pub enum CardView {
    Loading { name: String },
    Ready(CardDetails),
    NoData { name: String },
}

impl CardView {
    pub fn from_state(reference: &EntityReference, state: &FetchState<PokemonDetail>) -> Self {
        let name = reference.name.clone();
        if state.loading {
            return CardView::Loading { name };
        }
        match &state.value {
            Some(detail) => CardView::Ready(CardDetails::from_detail(&name, detail)),
            None => CardView::NoData { name },
        }
    }

    pub fn name(&self) -> &str {
        match self {
            CardView::Loading { name } | CardView::NoData { name } => name,
            CardView::Ready(details) => &details.name,
        }
    }
}

impl fmt::Display for CardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", capitalize(self.name()))?;
        match self {
            CardView::Loading { .. } => writeln!(f, "  loading..."),
            CardView::NoData { .. } => writeln!(f, "  No data available"),
            CardView::Ready(details) => {
                if let Some(sprite) = &details.sprite {
                    writeln!(f, "  Sprite: {sprite}")?;
                }
                writeln!(f, "  ID: #{}", details.id)?;
                writeln!(f, "  Height: {}m", details.height_m)?;
                writeln!(f, "  Weight: {}kg", details.weight_kg)?;
                writeln!(f, "  Types: {}", details.types.join(", "))
            }
        }
    }
}
