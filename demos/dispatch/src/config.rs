//! Command-line options and the traffic source and road data they select.

use std::path::PathBuf;

use anyhow::{Result, bail};
use structopt::StructOpt;

use ed_core::GeoPoint;
use ed_traffic::{FixedSpeed, SpeedSource, TomTomClient, TomTomConfig};

/// Environment variable consulted when `--api-key` is absent.
pub const API_KEY_VAR: &str = "TOMTOM_API_KEY";

/// Where the road network comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum RoadData {
    /// A directory of `<area-slug>.osm.pbf` extracts.
    #[cfg(feature = "osm")]
    Extracts(PathBuf),
    /// The built-in street grid; only ever used when asked for.
    SyntheticGrid,
}

#[derive(Debug, StructOpt)]
#[structopt(name = "dispatch", about = "Rank a fleet by live-traffic ETA to an incident")]
pub struct Opt {
    /// Area whose road network is used for routing
    #[structopt(long, default_value = "Mumbai, India")]
    pub area: String,
    /// Incident latitude, decimal degrees
    #[structopt(long, default_value = "19.0760", allow_hyphen_values = true)]
    pub incident_lat: f64,
    /// Incident longitude, decimal degrees
    #[structopt(long, default_value = "72.8777", allow_hyphen_values = true)]
    pub incident_lon: f64,
    /// Fleet roster CSV (`name,lat,lon`); the bundled roster when omitted
    #[structopt(long, parse(from_os_str))]
    pub fleet: Option<PathBuf>,
    /// TomTom API key; falls back to $TOMTOM_API_KEY (a `.env` file is honoured)
    #[structopt(long)]
    pub api_key: Option<String>,
    /// Override the traffic flow endpoint
    #[structopt(long)]
    pub traffic_url: Option<String>,
    /// Use a constant speed in km/h instead of querying live traffic
    #[structopt(long, allow_hyphen_values = true)]
    pub fixed_speed: Option<f64>,
    /// Directory of `<area-slug>.osm.pbf` extracts
    #[cfg(feature = "osm")]
    #[structopt(long, parse(from_os_str))]
    pub pbf_dir: Option<PathBuf>,
    /// Route on a coarse synthetic street grid instead of real road data
    #[structopt(long)]
    pub synthetic_grid: bool,
    /// Write the ranking as CSV to this path
    #[structopt(long, parse(from_os_str))]
    pub csv: Option<PathBuf>,
    /// Render the traffic heatmap to this HTML file
    #[structopt(long, parse(from_os_str))]
    pub heatmap: Option<PathBuf>,
}

impl Opt {
    pub fn incident_pos(&self) -> GeoPoint {
        GeoPoint::new(self.incident_lat, self.incident_lon)
    }

    /// `--api-key`, else the environment; blank values count as missing.
    pub fn api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(API_KEY_VAR).ok())
            .filter(|k| !k.trim().is_empty())
    }

    /// The road data the options ask for.
    ///
    /// Real extracts need `--pbf-dir`; the synthetic grid needs
    /// `--synthetic-grid`.  Asking for neither (or both) is a configuration
    /// error, so a run never falls back to made-up roads on its own.
    #[cfg(feature = "osm")]
    pub fn road_data(&self) -> Result<RoadData> {
        match (&self.pbf_dir, self.synthetic_grid) {
            (Some(dir), false) => Ok(RoadData::Extracts(dir.clone())),
            (None, true) => Ok(RoadData::SyntheticGrid),
            (Some(_), true) => bail!("--pbf-dir and --synthetic-grid are mutually exclusive"),
            (None, false) => {
                bail!("no road data: pass --pbf-dir <dir> with an extract for the area, or --synthetic-grid")
            }
        }
    }

    /// The road data the options ask for.
    ///
    /// Without the `osm` feature the synthetic grid is the only source, and
    /// it must still be asked for with `--synthetic-grid`.
    #[cfg(not(feature = "osm"))]
    pub fn road_data(&self) -> Result<RoadData> {
        if !self.synthetic_grid {
            bail!("no road data: this build has no OSM support; pass --synthetic-grid or build with --features osm");
        }
        Ok(RoadData::SyntheticGrid)
    }

    /// The speed source the options ask for.
    ///
    /// `--fixed-speed` wins and needs no key.  Otherwise live traffic is used
    /// and a missing key is a configuration error.
    pub fn speed_source(&self) -> Result<Box<dyn SpeedSource>> {
        if let Some(kmh) = self.fixed_speed {
            if !kmh.is_finite() || kmh < 0.0 {
                bail!("--fixed-speed must be a non-negative number of km/h, got {kmh}");
            }
            return Ok(Box::new(FixedSpeed(kmh)));
        }

        let Some(key) = self.api_key() else {
            bail!("no traffic API key: pass --api-key, set {API_KEY_VAR}, or use --fixed-speed");
        };
        let mut config = TomTomConfig::new(key);
        if let Some(url) = &self.traffic_url {
            config = config.with_base_url(url.clone());
        }
        Ok(Box::new(TomTomClient::new(config)?))
    }
}
