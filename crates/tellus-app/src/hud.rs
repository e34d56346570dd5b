//! HUD readout displayed via the window title.
//!
//! Every formatter takes the configured window title as its prefix.

use tellus_camera::GeoCoord;
use tellus_globe::GlobeStats;

/// Title shown while textures stream in.
///
/// Example: `Tellus: loading 60%`
pub fn loading_title(title: &str, percent: u8) -> String {
    format!("{title}: loading {percent}%")
}

/// Title shown when assembly fails and the viewer cannot start.
pub fn load_failed_title(title: &str) -> String {
    format!("{title}: texture load failed (see log)")
}

/// Format the per-frame readout as a compact window title. `fps` is `None`
/// when the FPS readout is disabled in config.
///
/// Example: `Tellus | LAT: 12.34° LON: -56.78° | FPS: 60 | 16,641 vtx | 4 tex`
pub fn status_title(title: &str, coord: GeoCoord, fps: Option<u32>, stats: GlobeStats) -> String {
    let fps_segment = match fps {
        Some(fps) => format!(" | FPS: {fps}"),
        None => String::new(),
    };
    format!(
        "{title} | LAT: {:.2}\u{00b0} LON: {:.2}\u{00b0}{fps_segment} | {} vtx | {} tex",
        coord.lat,
        coord.lon,
        format_with_commas(stats.vertex_count as u64),
        stats.texture_count,
    )
}

/// Format an integer with comma thousands separators.
fn format_with_commas(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}
