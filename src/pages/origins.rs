use super::PageContent;

pub(super) fn content() -> PageContent {
    PageContent {
        title: "A Lake Born of Fire".to_string(),
        paragraphs: vec![
            "Battle Ground Lake fills a volcanic maar: a shallow crater blasted \
             out when rising magma hit groundwater and flashed it to steam. \
             Geologists like to call it a miniature Crater Lake."
                .to_string(),
            "The eruption was one voice in the Boring Volcanic Field, a swarm of \
             small short-lived volcanoes scattered across the Portland and \
             Vancouver lowlands over the last couple of million years."
                .to_string(),
            "No stream flows in and none flows out. Springs feed the lake from \
             below, filtered through the same broken volcanic rock the eruption \
             left behind."
                .to_string(),
        ],
        cta: "Next".to_string(),
        scene: None,
    }
}
