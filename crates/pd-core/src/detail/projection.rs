//! Projections from a raw detail document to the shape a consumer needs
//! 从原始详情文档到消费方所需形状的投影
//!
//! One resolver implementation serves every consumer; what differs is only
//! the projection it is parameterized with.

use super::record::PokemonDetail;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProjectionError {
    #[error("malformed detail document: {0}")]
    Malformed(String),

    #[error("detail document has no value at {0}")]
    Missing(&'static str),
}

/// A (possibly narrowing) transformation applied to a fetched detail document.
pub trait Projection: Send + Sync + 'static {
    type Output: Clone + Send + Sync + 'static;

    fn project(&self, document: &Value) -> Result<Self::Output, ProjectionError>;
}

/// Full record projection.
#[derive(Debug, Clone, Copy, Default)]
pub struct FullDetail;

impl Projection for FullDetail {
    type Output = PokemonDetail;

    fn project(&self, document: &Value) -> Result<PokemonDetail, ProjectionError> {
        PokemonDetail::deserialize(document).map_err(|e| ProjectionError::Malformed(e.to_string()))
    }
}

/// Narrow projection: only the default front-facing sprite URI.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrontSprite;

impl FrontSprite {
    const POINTER: &'static str = "/sprites/front_default";
}

impl Projection for FrontSprite {
    type Output = String;

    fn project(&self, document: &Value) -> Result<String, ProjectionError> {
        document
            .pointer(Self::POINTER)
            .and_then(Value::as_str)
            .map(str::to_owned)
            .ok_or(ProjectionError::Missing(Self::POINTER))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document() -> Value {
        json!({
            "id": 4,
            "name": "charmander",
            "height": 6,
            "weight": 85,
            "sprites": {"front_default": "https://img/4.png", "back_default": null},
            "types": [{"slot": 1, "type": {"name": "fire", "url": ""}}]
        })
    }

    #[test]
    fn narrow_projection_matches_full_projection_sprite() {
        let doc = document();

        let full = FullDetail.project(&doc).unwrap();
        let image = FrontSprite.project(&doc).unwrap();

        assert_eq!(full.sprites.front_default.as_deref(), Some(image.as_str()));
    }

    #[test]
    fn narrow_projection_does_not_require_full_shape() {
        let doc = json!({"sprites": {"front_default": "https://img/x.png"}});

        assert!(FullDetail.project(&doc).is_err());
        assert_eq!(FrontSprite.project(&doc).unwrap(), "https://img/x.png");
    }

    #[test]
    fn null_front_sprite_is_missing() {
        let doc = json!({"sprites": {"front_default": null}});

        assert_eq!(
            FrontSprite.project(&doc),
            Err(ProjectionError::Missing("/sprites/front_default"))
        );
    }

    #[test]
    fn full_projection_reports_malformed_documents() {
        let doc = json!({"id": "not-a-number", "name": "missingno"});

        assert!(matches!(
            FullDetail.project(&doc),
            Err(ProjectionError::Malformed(_))
        ));
    }
}
