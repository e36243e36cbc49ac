//! Target site profile
//!
//! Every DOM hook the content runtime relies on lives here, so a markup change
//! on the site is a data change rather than a code change. The defaults
//! describe YouTube's desktop watch page.

use serde::{Deserialize, Serialize};
use url::Url;

/// Safari on macOS; the site serves its full desktop player to it
pub const SAFARI_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_0) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Safari/605.1.15";

/// DOM structure of the one site Perch augments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteProfile {
    /// Page loaded at startup
    pub start_url: Url,
    /// User agent presented to the site
    pub user_agent: String,
    /// Body class that switches the expanded overlay on
    pub marker_class: String,
    /// The site's own fullscreen button
    pub fullscreen_control: String,
    /// Keyboard shortcut the site binds to fullscreen
    pub fullscreen_key: String,
    /// Root element of the player
    pub player_root: String,
    /// Element wrapping the video surface
    pub video_container: String,
    /// The main video element
    pub main_video: String,
    /// Regions hidden while expanded
    pub hidden_regions: Vec<String>,
    /// Player containers stretched over the viewport while expanded
    pub expanded_surfaces: Vec<String>,
    /// Player controls kept above the stretched surfaces
    pub controls_bar: String,
    /// Regions where a mouse-down never starts a window drag
    pub drag_exclusions: Vec<String>,
}

impl Default for SiteProfile {
    fn default() -> Self {
        Self {
            start_url: Url::parse("https://www.youtube.com/playlist?list=WL")
                .expect("static start url"),
            user_agent: SAFARI_USER_AGENT.to_string(),
            marker_class: "perch-expanded".to_string(),
            fullscreen_control: ".ytp-fullscreen-button".to_string(),
            fullscreen_key: "f".to_string(),
            player_root: "#movie_player".to_string(),
            video_container: ".html5-video-container".to_string(),
            main_video: "video.html5-main-video".to_string(),
            hidden_regions: to_strings(&[
                "#masthead-container",
                "#page-manager ytd-watch-flexy #secondary",
                "#page-manager ytd-watch-flexy #below",
                "#page-manager ytd-watch-flexy #related",
                "#page-manager ytd-watch-flexy #comments",
                "#page-manager ytd-watch-flexy #chat",
                "#page-manager ytd-watch-flexy #meta",
                "#page-manager ytd-watch-flexy #info-contents",
            ]),
            expanded_surfaces: to_strings(&[
                "#full-bleed-container",
                "#player-full-bleed-container",
                "ytd-watch-flexy #player-container",
                "ytd-watch-flexy #player-container-outer",
                "ytd-watch-flexy #player-container-inner",
                "ytd-watch-flexy #ytd-player",
                "ytd-watch-flexy #player-wide-container",
                "ytd-watch-flexy .ytd-player",
                "#movie_player",
            ]),
            controls_bar: ".ytp-chrome-bottom".to_string(),
            drag_exclusions: to_strings(&[
                "a",
                "button",
                "input",
                "textarea",
                "select",
                "[role=\"button\"]",
                "[role=\"slider\"]",
                ".ytp-chrome-bottom",
                ".ytp-chrome-top",
                ".ytp-progress-bar",
                ".ytp-scrubber-container",
                ".ytp-settings-menu",
                ".ytp-popup",
                ".ytp-ce-element",
                "ytd-searchbox",
                "#search",
            ]),
        }
    }
}

impl SiteProfile {
    /// Single selector list for `Element.closest` over the drag exclusions
    pub fn drag_exclusion_selector(&self) -> String {
        self.drag_exclusions.join(", ")
    }

    /// Whether `host` belongs to the profiled site
    pub fn owns_host(&self, host: &str) -> bool {
        match self.start_url.host_str() {
            Some(domain) => {
                let site = domain.trim_start_matches("www.");
                host == site || host.ends_with(&format!(".{site}"))
            }
            None => false,
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
