use super::PageContent;

pub(super) fn content() -> PageContent {
    PageContent {
        title: "Plan Your Visit".to_string(),
        paragraphs: vec![
            "Around 280 acres of forest wrap the 28-acre lake. A swimming beach \
             anchors the day-use area, the lake is stocked with rainbow trout, \
             and about five miles of trail loop the crater rim for hikers and \
             horses."
                .to_string(),
            "Overnight guests can choose standard campsites, walk-in primitive \
             sites, or the small cabins above the beach. Day visitors need a \
             Discover Pass; the gate closes at dusk."
                .to_string(),
        ],
        cta: "Next".to_string(),
        scene: None,
    }
}
