use trailhead::nav::{PageFlow, SessionHistory};
use trailhead::pages::{Page, AUTHORED_PAGES};
use trailhead::scene::Motion;

#[cfg(test)]
mod dispatch_tests {
    use super::*;

    #[test]
    fn test_every_index_maps_to_a_page() {
        for index in [0, 1, 2, 3, 4, 5, 6, 100, 65536, u32::MAX] {
            let page = Page::from_index(index);
            let content = page.content();
            assert!(
                !content.title.is_empty(),
                "index {index} produced an empty page"
            );
        }
    }

    #[test]
    fn test_authored_pages_are_distinct() {
        let titles: Vec<String> = (0..AUTHORED_PAGES)
            .map(|index| Page::from_index(index).content().title)
            .collect();
        for (i, title) in titles.iter().enumerate() {
            for (j, other) in titles.iter().enumerate() {
                if i != j {
                    assert_ne!(title, other, "pages {i} and {j} share a title");
                }
            }
        }
    }

    #[test]
    fn test_fallback_carries_the_raw_index() {
        assert_eq!(Page::from_index(AUTHORED_PAGES).content().title, "Page 5");
        assert_eq!(Page::from_index(777).content().title, "Page 777");
    }

    #[test]
    fn test_scene_assets_per_page() {
        let expected: [Option<&str>; 5] = [
            Some("mainpage.glb"),
            None,
            Some("rain.glb"),
            Some("pin.glb"),
            None,
        ];
        for (index, want) in expected.iter().enumerate() {
            let content = Page::from_index(index as u32).content();
            assert_eq!(
                content.scene.map(|scene| scene.asset),
                *want,
                "page {index} mounts the wrong asset"
            );
        }
    }

    #[test]
    fn test_scene_motions_are_named() {
        for index in 0..AUTHORED_PAGES {
            let Some(scene) = Page::from_index(index).content().scene else {
                continue;
            };
            for animation in scene.animations {
                assert!(!animation.target.is_empty());
                match animation.motion {
                    Motion::Spin { radians_per_tick } => assert!(radians_per_tick > 0.0),
                    Motion::Fall {
                        units_per_tick,
                        floor,
                        ceiling,
                    } => {
                        assert!(units_per_tick > 0.0);
                        assert!(floor < ceiling);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod flow_dispatch_tests {
    use super::*;

    #[test]
    fn test_walking_the_exhibit_end_to_end() {
        let mut flow = PageFlow::new(0, SessionHistory::new());
        let mut seen = vec![Page::from_index(flow.index())];

        // Walk past the end of the authored content.
        for _ in 0..AUTHORED_PAGES + 1 {
            flow.advance();
            seen.push(Page::from_index(flow.index()));
        }

        assert_eq!(seen[0], Page::Welcome);
        assert_eq!(seen[4], Page::Visiting);
        assert_eq!(seen[5], Page::Beyond(5));
        assert_eq!(seen[6], Page::Beyond(6));

        // And back home, clamped.
        for _ in 0..20 {
            flow.retreat();
        }
        assert_eq!(Page::from_index(flow.index()), Page::Welcome);
    }

    #[test]
    fn test_history_restore_redispatches_content() {
        let mut flow = PageFlow::new(0, SessionHistory::new());
        flow.advance();
        flow.advance();
        assert_eq!(Page::from_index(flow.index()), Page::Rainfall);

        flow.navigate_back();
        let restored = Page::from_index(flow.index());
        assert_eq!(restored, Page::Origins);
        assert_eq!(restored.content().title, "A Lake Born of Fire");
    }
}
