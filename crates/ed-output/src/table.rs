//! Plain-text ranking table for terminal output.

use ed_dispatch::Ranking;

/// Render `ranking` as an aligned text table.
///
/// Unknown speed or distance prints as `unknown`, an unreachable ETA as
/// `unreachable`, and the status column says why.
pub fn format_ranking(ranking: &Ranking) -> String {
    let mut lines = vec![
        format!(
            "{:<4} {:<16} {:>11} {:>12} {:>13}  {}",
            "#", "Vehicle", "ETA (min)", "Speed (km/h)", "Distance (km)", "Status"
        ),
        "-".repeat(72),
    ];

    for (i, r) in ranking.results().iter().enumerate() {
        let speed = r.speed_kmh.map_or_else(|| "unknown".to_owned(), |s| format!("{s:.1}"));
        let dist = r.distance_km.map_or_else(|| "unknown".to_owned(), |d| format!("{d:.2}"));
        lines.push(format!(
            "{:<4} {:<16} {:>11} {:>12} {:>13}  {}",
            i + 1,
            r.vehicle,
            r.eta.to_string(),
            speed,
            dist,
            r.status
        ));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// One-line dispatch recommendation.
pub fn format_recommendation(ranking: &Ranking) -> String {
    match (ranking.best_reachable(), ranking.best()) {
        (Some(best), _) => format!("Best vehicle to dispatch: {} (ETA {} min)", best.vehicle, best.eta),
        (None, Some(first)) => format!(
            "No vehicle can currently reach the incident; first listed is {} ({})",
            first.vehicle, first.status
        ),
        (None, None) => "No vehicles in roster".to_owned(),
    }
}
