use super::{AnimationSpec, PageContent, SceneSpec};
use crate::scene::animation::Motion;

/// Fall speed of a raindrop, units per 1/60 s tick, and the band it
/// cycles through.
const DROP_FALL: f32 = 0.05;
const DROP_FLOOR: f32 = -1.5;
const DROP_CEILING: f32 = 6.5;

const ANIMATIONS: &[AnimationSpec] = &[AnimationSpec {
    target: "Raindrops",
    motion: Motion::Fall {
        units_per_tick: DROP_FALL,
        floor: DROP_FLOOR,
        ceiling: DROP_CEILING,
    },
}];

pub(super) fn content() -> PageContent {
    PageContent {
        title: "Rain Keeps It Full".to_string(),
        paragraphs: vec![
            "Clark County sees well over forty inches of rain in an ordinary \
             year, most of it between October and May."
                .to_string(),
            "The crater catches that rain and lets it soak through cinder and \
             fractured basalt into the groundwater below. The springs on the \
             lake floor return it slowly, so the level barely moves even in a \
             dry August."
                .to_string(),
        ],
        cta: "Next".to_string(),
        scene: Some(SceneSpec {
            asset: "rain.glb",
            fov_degrees: 45.0,
            animations: ANIMATIONS,
        }),
    }
}
