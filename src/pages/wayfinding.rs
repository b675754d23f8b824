use super::{AnimationSpec, PageContent, SceneSpec};
use crate::scene::animation::Motion;

/// Map pin turntable rate, radians per 1/60 s tick.
const PIN_SPIN: f32 = 0.02;

const ANIMATIONS: &[AnimationSpec] = &[AnimationSpec {
    target: "Pin",
    motion: Motion::Spin {
        radians_per_tick: PIN_SPIN,
    },
}];

pub(super) fn content() -> PageContent {
    PageContent {
        title: "Finding the Park".to_string(),
        paragraphs: vec![
            "The park sits three miles northeast of the town of Battle Ground. \
             Follow Main Street out of town, turn north on Grace Avenue, and \
             keep going as it becomes Heisson Road; the entrance is signed on \
             NE Palmer Road."
                .to_string(),
            "The town's name remembers a battle that never happened: in 1855 a \
             territorial captain rode out to bring back a band of Klickitat who \
             had left Fort Vancouver, and the two sides talked instead of \
             fighting. The spot of the standoff became Battle Ground."
                .to_string(),
        ],
        cta: "Next".to_string(),
        scene: Some(SceneSpec {
            asset: "pin.glb",
            fov_degrees: 25.0,
            animations: ANIMATIONS,
        }),
    }
}
