//! Expanded-state stylesheet
//!
//! The overlay is purely declarative: every rule is scoped under
//! `body.<marker>`, so removing the marker class restores the page's own
//! layout untouched.

use crate::site::SiteProfile;

/// Element id of the injected `<style>` tag
pub const STYLE_ELEMENT_ID: &str = "perch-overlay";

/// Stacking order of the stretched player; the controls sit one above it
const SURFACE_Z_INDEX: u32 = 999_999;

/// CSS generator for the simulated fullscreen presentation
pub struct OverlayStylesheet;

impl OverlayStylesheet {
    /// Generate the full stylesheet for a site profile
    pub fn generate(profile: &SiteProfile) -> String {
        let body = format!("body.{}", profile.marker_class);
        let scoped = |selectors: &[String]| {
            selectors
                .iter()
                .map(|s| format!("{body} {s}"))
                .collect::<Vec<_>>()
                .join(",\n")
        };

        format!(
            r#"/* Perch expanded overlay */
{hidden} {{
  display: none !important;
}}

{body} {{
  overflow: hidden !important;
}}

{body} #page-manager {{
  margin-top: 0 !important;
}}

{surfaces} {{
  position: fixed !important;
  top: 0 !important;
  left: 0 !important;
  width: 100vw !important;
  height: 100vh !important;
  max-height: none !important;
  min-height: 0 !important;
  z-index: {z} !important;
  background: black !important;
  margin: 0 !important;
  padding: 0 !important;
}}

{body} {container} {{
  width: 100% !important;
  height: 100% !important;
}}

{body} {video} {{
  width: 100% !important;
  height: 100% !important;
  object-fit: contain !important;
  position: relative !important;
  top: 0 !important;
  left: 0 !important;
}}

{body} {controls} {{
  z-index: {z_controls} !important;
}}
"#,
            hidden = scoped(&profile.hidden_regions),
            surfaces = scoped(&profile.expanded_surfaces),
            container = profile.video_container,
            video = profile.main_video,
            controls = profile.controls_bar,
            z = SURFACE_Z_INDEX,
            z_controls = SURFACE_Z_INDEX + 1,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_rule_is_scoped_to_marker() {
        let profile = SiteProfile::default();
        let css = OverlayStylesheet::generate(&profile);
        for line in css.lines() {
            let line = line.trim_end_matches(',').trim_end_matches(" {");
            if line.starts_with("body") || line.starts_with('#') || line.starts_with('.') {
                assert!(line.starts_with("body.perch-expanded"), "unscoped rule: {line}");
            }
        }
    }

    #[test]
    fn test_hides_ancillary_regions() {
        let css = OverlayStylesheet::generate(&SiteProfile::default());
        assert!(css.contains("body.perch-expanded #masthead-container"));
        assert!(css.contains("body.perch-expanded #page-manager ytd-watch-flexy #comments"));
        assert!(css.contains("display: none !important;"));
        assert!(css.contains("overflow: hidden !important;"));
    }

    #[test]
    fn test_surface_fills_viewport() {
        let css = OverlayStylesheet::generate(&SiteProfile::default());
        assert!(css.contains("body.perch-expanded #movie_player {"));
        assert!(css.contains("position: fixed !important;"));
        assert!(css.contains("width: 100vw !important;"));
        assert!(css.contains("z-index: 999999 !important;"));
        assert!(css.contains("z-index: 1000000 !important;"));
    }

    #[test]
    fn test_custom_marker() {
        let profile = SiteProfile {
            marker_class: "pip".to_string(),
            ..Default::default()
        };
        let css = OverlayStylesheet::generate(&profile);
        assert!(css.contains("body.pip video.html5-main-video"));
        assert!(!css.contains("perch-expanded"));
    }
}
