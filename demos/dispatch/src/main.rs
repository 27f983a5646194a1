//! dispatch — rank emergency vehicles by live-traffic ETA to an incident.
//!
//! Loads the area's road network once, snaps the fleet and the incident onto
//! it, routes each vehicle to the incident, and turns route length plus the
//! current road speed at the vehicle into an ETA.  Prints the ranking and a
//! recommendation; optionally exports the ranking as CSV and renders a
//! traffic heatmap over the fleet and the incident.
//!
//! ```text
//! TOMTOM_API_KEY=… cargo run -p dispatch --features osm -- --pbf-dir maps --heatmap heatmap.html
//! cargo run -p dispatch -- --synthetic-grid --fixed-speed 30 --csv ranking.csv
//! ```
//!
//! Road data is always chosen explicitly: `--pbf-dir` (feature `osm`) or
//! `--synthetic-grid`.

mod config;
mod network;

use std::io::Cursor;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use structopt::StructOpt;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use ed_core::GeoPoint;
use ed_dispatch::DispatchRanker;
use ed_fleet::{Incident, Vehicle, load_roster_csv, load_roster_reader};
use ed_output::{CsvWriter, HeatmapOptions, HeatmapRenderer, format_ranking, format_recommendation};
use ed_spatial::{DijkstraRouter, NetworkProvider, RoadNetwork};

use config::{Opt, RoadData};

/// Roster used when `--fleet` is not given.
const BUNDLED_FLEET: &str = include_str!("../fleet.csv");

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let opt = Opt::from_args();

    // 1. Inputs.  Configuration problems stop the run before any lookup.
    let incident = Incident::new(opt.incident_pos())?;
    let fleet = load_fleet(&opt)?;
    let speeds = opt.speed_source()?;
    let road_data = opt.road_data()?;
    info!(vehicles = fleet.len(), incident = %incident.pos, "inputs ready");

    // 2. Road network.  Failure here is fatal.
    let t0 = Instant::now();
    let network = load_network(&opt.area, &road_data)?;
    info!(
        nodes = network.node_count(),
        edges = network.edge_count(),
        secs = t0.elapsed().as_secs_f64(),
        "road network ready"
    );

    // 3. Rank.
    let ranker = DispatchRanker::new(&network, DijkstraRouter, &*speeds);
    let ranking = ranker.rank(&fleet, incident);

    println!("{}", format_ranking(&ranking));
    println!("{}", format_recommendation(&ranking));
    if road_data == RoadData::SyntheticGrid {
        println!("Note: distances come from a synthetic street grid, not real roads.");
    }

    // 4. Exports.
    if let Some(path) = &opt.csv {
        let mut w = CsvWriter::create(path)
            .with_context(|| format!("creating {}", path.display()))?;
        w.write_ranking(&ranking)?;
        w.finish()?;
        println!("Ranking written to {}", path.display());
    }

    if let Some(path) = &opt.heatmap {
        let mut points: Vec<GeoPoint> = fleet.iter().map(|v| v.pos).collect();
        points.push(incident.pos);

        let renderer = HeatmapRenderer::new(&*speeds, HeatmapOptions::centered_on(incident.pos));
        let map = renderer.render(&points);
        map.write_to(path)
            .with_context(|| format!("writing {}", path.display()))?;
        println!(
            "Heatmap written to {} ({} of {} points with traffic data)",
            path.display(),
            map.samples.len(),
            points.len()
        );
    }

    Ok(())
}

fn load_fleet(opt: &Opt) -> Result<Vec<Vehicle>> {
    Ok(match &opt.fleet {
        Some(path) => load_roster_csv(path)
            .with_context(|| format!("loading fleet roster {}", path.display()))?,
        None => load_roster_reader(Cursor::new(BUNDLED_FLEET))?,
    })
}

fn load_network(area: &str, road_data: &RoadData) -> Result<Arc<RoadNetwork>> {
    let network = match road_data {
        #[cfg(feature = "osm")]
        RoadData::Extracts(dir) => {
            NetworkProvider::new(ed_spatial::osm::PbfDirectory::new(dir)).get(area)?
        }
        RoadData::SyntheticGrid => {
            warn!(area, "routing on a synthetic street grid, not real road data");
            NetworkProvider::new(network::SyntheticGrid).get(area)?
        }
    };
    Ok(network)
}
