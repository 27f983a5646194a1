//! Traffic-speed heatmap.
//!
//! [`HeatmapRenderer::render`] looks up the live speed at each point and keeps
//! only the points that answered.  The resulting [`Heatmap`] renders to one
//! self-contained HTML page: Leaflet with the `leaflet.heat` plugin loaded
//! from a CDN and the samples embedded as a JSON array of
//! `[lat, lon, speed_kmh]`.  Intensity is scaled against the fastest sample.

use std::path::Path;

use serde_json::json;
use tracing::{debug, info};

use ed_core::GeoPoint;
use ed_traffic::SpeedSource;

use crate::OutputResult;

const LEAFLET_CSS:  &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS:   &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";
const LEAFLET_HEAT: &str = "https://unpkg.com/leaflet.heat@0.2.0/dist/leaflet-heat.js";

/// One point of the intensity layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatSample {
    pub lat:       f64,
    pub lon:       f64,
    pub speed_kmh: f64,
}

/// Map framing and heat-layer styling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatmapOptions {
    pub center:      GeoPoint,
    pub zoom:        u8,
    /// Radius of each heat point in pixels.
    pub radius:      u32,
    pub min_opacity: f64,
}

impl HeatmapOptions {
    /// Zoom 12, radius 25, minimum opacity 0.4.
    pub fn centered_on(center: GeoPoint) -> Self {
        Self { center, zoom: 12, radius: 25, min_opacity: 0.4 }
    }
}

/// Samples speeds through a [`SpeedSource`] and builds a [`Heatmap`].
pub struct HeatmapRenderer<S: SpeedSource> {
    speeds:  S,
    options: HeatmapOptions,
}

impl<S: SpeedSource> HeatmapRenderer<S> {
    pub fn new(speeds: S, options: HeatmapOptions) -> Self {
        Self { speeds, options }
    }

    /// One speed lookup per point, in order.  Points whose speed is unknown
    /// are left out; no substitute value is used.
    pub fn render(&self, points: &[GeoPoint]) -> Heatmap {
        let samples: Vec<HeatSample> = points
            .iter()
            .filter_map(|&p| {
                self.speeds.speed_or_unknown(p).map(|speed_kmh| HeatSample {
                    lat: p.lat,
                    lon: p.lon,
                    speed_kmh,
                })
            })
            .collect();

        debug!(points = points.len(), samples = samples.len(), "heatmap sampled");
        Heatmap { samples, options: self.options }
    }
}

/// A rendered heatmap: its samples and how to draw them.
#[derive(Debug, Clone, PartialEq)]
pub struct Heatmap {
    pub samples: Vec<HeatSample>,
    pub options: HeatmapOptions,
}

impl Heatmap {
    /// Highest sampled speed, or `None` with no samples.
    pub fn max_speed(&self) -> Option<f64> {
        self.samples.iter().map(|s| s.speed_kmh).reduce(f64::max)
    }

    /// Sample data as the `[[lat, lon, speed], …]` JSON array leaflet.heat takes.
    pub fn samples_json(&self) -> OutputResult<String> {
        let rows: Vec<[f64; 3]> = self
            .samples
            .iter()
            .map(|s| [s.lat, s.lon, s.speed_kmh])
            .collect();
        Ok(serde_json::to_string(&rows)?)
    }

    /// Render the page.
    pub fn to_html(&self) -> OutputResult<String> {
        let o = &self.options;
        // A zero max would make leaflet.heat divide by zero.
        let max = self.max_speed().filter(|m| *m > 0.0).unwrap_or(1.0);
        let layer_opts = json!({
            "radius":     o.radius,
            "minOpacity": o.min_opacity,
            "max":        max,
        });
        let center = json!([o.center.lat, o.center.lon]);

        Ok(format!(
            r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Traffic heatmap</title>
<link rel="stylesheet" href="{LEAFLET_CSS}">
<script src="{LEAFLET_JS}"></script>
<script src="{LEAFLET_HEAT}"></script>
<style>html, body, #map {{ height: 100%; margin: 0; }}</style>
</head>
<body>
<div id="map"></div>
<script>
var map = L.map("map").setView({center}, {zoom});
L.tileLayer("https://{{s}}.tile.openstreetmap.org/{{z}}/{{x}}/{{y}}.png", {{
  maxZoom: 19,
  attribution: "&copy; OpenStreetMap contributors"
}}).addTo(map);
var samples = {samples};
L.heatLayer(samples, {layer_opts}).addTo(map);
</script>
</body>
</html>
"#,
            zoom = o.zoom,
            samples = self.samples_json()?,
        ))
    }

    /// Write the page to `path`, replacing any existing file.
    pub fn write_to(&self, path: &Path) -> OutputResult<()> {
        std::fs::write(path, self.to_html()?)?;
        info!(path = %path.display(), samples = self.samples.len(), "heatmap written");
        Ok(())
    }
}
