use super::{AnimationSpec, PageContent, SceneSpec};
use crate::scene::animation::Motion;

/// Terrain turntable rate, radians per 1/60 s tick.
const TERRAIN_SPIN: f32 = 0.0025;

const ANIMATIONS: &[AnimationSpec] = &[AnimationSpec {
    target: "Terrain",
    motion: Motion::Spin {
        radians_per_tick: TERRAIN_SPIN,
    },
}];

pub(super) fn content() -> PageContent {
    PageContent {
        title: "Battle Ground Lake State Park".to_string(),
        paragraphs: vec![
            "A spring-fed lake in the crater of an ancient volcano, half an hour \
             northeast of Vancouver, Washington."
                .to_string(),
            "Page through the exhibit to see how the lake formed, what the rain \
             does here, and how to plan a visit."
                .to_string(),
        ],
        cta: "Let's Go!".to_string(),
        scene: Some(SceneSpec {
            asset: "mainpage.glb",
            fov_degrees: 30.0,
            animations: ANIMATIONS,
        }),
    }
}
