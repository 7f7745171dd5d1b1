//! Tickframe is a keyframe timeline engine for 2D shape animations.
//!
//! Shapes (rectangles and ellipses) move, resize and recolor over a discrete timeline of
//! ticks. Each shape owns an ordered list of motion intervals; keyframe edits keep that
//! list contiguous and the animation continuous.
//!
//! # Pipeline overview
//!
//! 1. **Load**: text (`parse_animation`), JSON (`AnimationDocument`) or code
//!    (`AnimationBuilder`) produce an [`Animation`]
//! 2. **Edit**: `add_keyframe` / `remove_keyframe` reshape a shape's timeline
//! 3. **Evaluate**: `Animation + Tick -> Vec<ShapeSnapshot>` by linear interpolation
//! 4. **Serialize**: `describe` (text, reloadable) or `to_svg` (SMIL markup)
//!
//! Evaluation is deterministic: the state a shape interpolates from is always derived
//! from its declared state and its earlier intervals, never from the last query.
#![forbid(unsafe_code)]

mod foundation {
    pub mod core;
    pub mod error;
}

mod shape {
    pub mod kind;
    pub mod registry;
}

mod timeline {
    pub mod delta;
    pub mod keyframe;
    pub mod motion;
}

mod eval {
    pub mod evaluator;
    pub mod interpolate;
}

mod model {
    pub mod animation;
    pub mod builder;
    pub mod document;
}

mod serialize {
    pub mod svg;
    pub mod text;
}

mod io {
    pub mod reader;
}

pub use eval::evaluator::{EvaluatedFrame, Evaluator};
pub use eval::interpolate::{evaluate, interpolate_delta};
pub use foundation::core::{CanvasBounds, Position, Rgb, ShapeState, Size, Tick};
pub use foundation::error::{TickframeError, TickframeResult};
pub use io::reader::{parse_animation, read_animation};
pub use model::animation::Animation;
pub use model::builder::AnimationBuilder;
pub use model::document::{AnimationDocument, ShapeDocument};
pub use serialize::svg::{SvgOptions, to_svg};
pub use serialize::text::{TraceEntry, describe, motion_trace};
pub use shape::kind::{ShapeKind, SvgAttributes};
pub use shape::registry::{ShapeRegistry, ShapeSnapshot};
pub use timeline::delta::{Delta, PropertyKind};
pub use timeline::keyframe::{KeyframeEdit, KeyframeRemoval};
pub use timeline::motion::{MotionInterval, MotionList};
