//! Detail records and the projections applied to raw detail documents
//! 详情记录以及对原始详情文档的投影

mod projection;
mod record;

pub use projection::{FrontSprite, FullDetail, Projection, ProjectionError};
pub use record::{AbilitySlot, NamedResource, PokemonDetail, Sprites, StatEntry, TypeSlot};
