//! Colour and label lookup tables for the detail view

/// Background of the detail view when no type colour applies.
pub const DEFAULT_BACKGROUND: &str = "#f5f5f5";

/// Chip colour for types missing from [`type_color`].
pub const DEFAULT_CHIP_COLOR: &str = "#3498db";

pub fn type_color(type_name: &str) -> Option<&'static str> {
    let color = match type_name {
        "normal" => "#CFCFB5",
        "fire" => "#F6A56D",
        "water" => "#93B4F6",
        "electric" => "#FAE67D",
        "grass" => "#9FDE87",
        "ice" => "#C4F0F0",
        "fighting" => "#D96B65",
        "poison" => "#C47AC4",
        "ground" => "#E8D7A1",
        "flying" => "#CFC3F8",
        "psychic" => "#FBA9C6",
        "bug" => "#C8D25E",
        "rock" => "#D2C68A",
        "ghost" => "#9E8AC3",
        "dragon" => "#A08AFA",
        "dark" => "#9B8B76",
        "steel" => "#D6D6E8",
        "fairy" => "#F7C1D0",
        _ => return None,
    };
    Some(color)
}

/// Display label of a base stat; unknown names pass through unchanged.
pub fn stat_label(stat_name: &str) -> &str {
    match stat_name {
        "hp" => "HP",
        "attack" => "Attack",
        "defense" => "Defense",
        "special-attack" => "Sp. Atk",
        "special-defense" => "Sp. Def",
        "speed" => "Speed",
        other => other,
    }
}
