//! View models derived from `FetchState`
//! 由 `FetchState` 派生的视图模型
//!
//! Pure data for the list card and the expanded detail view. No toolkit is
//! involved; `Display` impls give the terminal rendering.

mod card;
mod modal;
pub mod palette;

pub use card::{CardDetails, CardView};
pub use modal::{AbilityChip, ModalContent, ModalView, SpriteFacing, StatRow, StatTone, TypeChip};

/// `bulbasaur` → `Bulbasaur`
pub(crate) fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::capitalize;

    #[test]
    fn capitalize_handles_empty_and_ascii() {
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("mr-mime"), "Mr-mime");
    }
}
