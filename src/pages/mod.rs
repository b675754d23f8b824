//! Authored exhibit pages and the total index-to-content mapping.

mod origins;
mod rainfall;
mod visiting;
mod wayfinding;
mod welcome;

use crate::scene::animation::Motion;

/// Number of authored pages; indices at or past this land on
/// [`Page::Beyond`].
pub const AUTHORED_PAGES: u32 = 5;

/// One slide of the exhibit. A closed set: every authored page is a
/// variant, and anything past the end is `Beyond` with the raw index
/// preserved, so dispatch is total over the whole counter range.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Page {
    Welcome,
    Origins,
    Rainfall,
    Wayfinding,
    Visiting,
    Beyond(u32),
}

impl Page {
    /// Map a page counter to its page. Never fails; unauthored indices
    /// become `Beyond`.
    pub fn from_index(index: u32) -> Self {
        match index {
            0 => Self::Welcome,
            1 => Self::Origins,
            2 => Self::Rainfall,
            3 => Self::Wayfinding,
            4 => Self::Visiting,
            n => Self::Beyond(n),
        }
    }

    pub fn index(self) -> u32 {
        match self {
            Self::Welcome => 0,
            Self::Origins => 1,
            Self::Rainfall => 2,
            Self::Wayfinding => 3,
            Self::Visiting => 4,
            Self::Beyond(n) => n,
        }
    }

    /// The authored content for this page, or the fallback view past the
    /// end of the exhibit.
    pub fn content(self) -> PageContent {
        match self {
            Self::Welcome => welcome::content(),
            Self::Origins => origins::content(),
            Self::Rainfall => rainfall::content(),
            Self::Wayfinding => wayfinding::content(),
            Self::Visiting => visiting::content(),
            Self::Beyond(index) => fallback(index),
        }
    }
}

/// A named motion inside a page's scene.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AnimationSpec {
    pub target: &'static str,
    pub motion: Motion,
}

/// Which asset a page mounts and how its camera and motions are set up.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SceneSpec {
    /// Asset file name, relative to the asset root.
    pub asset: &'static str,
    /// Vertical field of view applied over the asset's embedded camera.
    pub fov_degrees: f32,
    pub animations: &'static [AnimationSpec],
}

/// Everything the overlay needs to draw one page.
#[derive(Clone, Debug, PartialEq)]
pub struct PageContent {
    pub title: String,
    pub paragraphs: Vec<String>,
    /// Label of the advance button.
    pub cta: String,
    pub scene: Option<SceneSpec>,
}

/// Minimal view for indices past the authored content: just the raw
/// index, so overshooting visitors can see where they are.
fn fallback(index: u32) -> PageContent {
    PageContent {
        title: format!("Page {index}"),
        paragraphs: Vec::new(),
        cta: "Next".to_string(),
        scene: None,
    }
}
