use std::io::{Read, Write};

use crate::{
    foundation::core::{CanvasBounds, ShapeState, Tick},
    foundation::error::{TickframeError, TickframeResult},
    model::animation::Animation,
    shape::kind::ShapeKind,
    timeline::motion::{MotionInterval, MotionList},
};

/// Serializable snapshot of a whole animation: canvas, declared shapes and timelines.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AnimationDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<CanvasBounds>,
    pub shapes: Vec<ShapeDocument>,
}

/// One shape as stored in an [`AnimationDocument`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ShapeDocument {
    pub id: String,
    pub kind: ShapeKind,
    pub declared: ShapeState,
    #[serde(default)]
    pub motions: Vec<MotionInterval>,
    /// Tick from which the shape stays hidden after its first keyframe was removed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vanished_from: Option<Tick>,
}

impl AnimationDocument {
    pub fn from_animation(animation: &Animation) -> Self {
        let shapes = animation
            .registry()
            .records()
            .map(|rec| ShapeDocument {
                id: rec.id.clone(),
                kind: rec.kind,
                declared: rec.declared,
                motions: rec.motions.intervals().to_vec(),
                vanished_from: rec.vanished_from,
            })
            .collect();
        Self {
            bounds: animation.bounds(),
            shapes,
        }
    }

    /// Rebuild an animation. Shapes and motions go through the same validation as
    /// hand-built ones.
    pub fn into_animation(self) -> TickframeResult<Animation> {
        let mut animation = Animation::new();
        if let Some(bounds) = self.bounds {
            animation.set_bounds(bounds);
        }
        for shape in self.shapes {
            animation.declare(shape.kind, &shape.id, shape.declared)?;
            for m in MotionList::from_intervals(shape.motions)?.intervals() {
                animation.add_motion(&shape.id, m.clone())?;
            }
            animation
                .registry_mut()
                .set_vanished_from(&shape.id, shape.vanished_from)?;
        }
        Ok(animation)
    }

    pub fn to_json_pretty(&self) -> TickframeResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| TickframeError::serde(e.to_string()))
    }

    pub fn to_writer(&self, w: impl Write) -> TickframeResult<()> {
        serde_json::to_writer_pretty(w, self).map_err(|e| TickframeError::serde(e.to_string()))
    }

    pub fn from_json(s: &str) -> TickframeResult<Self> {
        serde_json::from_str(s).map_err(|e| TickframeError::serde(e.to_string()))
    }

    pub fn from_reader(r: impl Read) -> TickframeResult<Self> {
        serde_json::from_reader(r).map_err(|e| TickframeError::serde(e.to_string()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/document.rs"]
mod tests;
