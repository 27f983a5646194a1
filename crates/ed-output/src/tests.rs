//! Unit tests for ed-output.

#[cfg(test)]
mod fixtures {
    use ed_core::Eta;
    use ed_dispatch::{EtaResult, EtaStatus, Ranking};

    pub fn ranking() -> Ranking {
        Ranking::from_results(vec![
            EtaResult {
                vehicle:     "Vehicle C".into(),
                eta:         Eta::Unreachable,
                speed_kmh:   None,
                distance_km: Some(4.2),
                status:      EtaStatus::NoSpeedData,
            },
            EtaResult {
                vehicle:     "Vehicle A".into(),
                eta:         Eta::Minutes(6.0),
                speed_kmh:   Some(20.0),
                distance_km: Some(2.0),
                status:      EtaStatus::Ok,
            },
        ])
    }

    pub fn unreachable_only() -> Ranking {
        Ranking::from_results(vec![EtaResult {
            vehicle:     "Vehicle B".into(),
            eta:         Eta::Unreachable,
            speed_kmh:   None,
            distance_km: None,
            status:      EtaStatus::NoRoute("no route".into()),
        }])
    }
}

// ── CSV ───────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod csv_tests {
    use crate::CsvWriter;

    #[test]
    fn header_and_rows() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("ranking.csv");
        let mut w = CsvWriter::create(&path).unwrap();
        w.write_ranking(&super::fixtures::ranking()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap(); // idempotent

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, ["rank", "vehicle", "eta_min", "speed_kmh", "distance_km", "status"]);

        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "1");
        assert_eq!(&rows[0][1], "Vehicle A");
        assert_eq!(&rows[0][2], "6.00");
        assert_eq!(&rows[0][3], "20");
        assert_eq!(&rows[0][4], "2.000");
        assert_eq!(&rows[0][5], "ok");

        // Unknowns are empty, not zero.
        assert_eq!(&rows[1][1], "Vehicle C");
        assert_eq!(&rows[1][2], "");
        assert_eq!(&rows[1][3], "");
        assert_eq!(&rows[1][4], "4.200");
        assert_eq!(&rows[1][5], "no-speed-data");
    }

    #[test]
    fn in_memory_sink() {
        let mut w = CsvWriter::from_writer(Vec::new()).unwrap();
        w.write_ranking(&super::fixtures::unreachable_only()).unwrap();
        let bytes = w.into_inner().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(
            text,
            "rank,vehicle,eta_min,speed_kmh,distance_km,status\n1,Vehicle B,,,,no-route\n"
        );
    }
}

// ── Table ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod table {
    use ed_dispatch::Ranking;

    use crate::{format_ranking, format_recommendation};

    #[test]
    fn table_surfaces_unknowns() {
        let text = format_ranking(&super::fixtures::ranking());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[2].contains("Vehicle A"));
        assert!(lines[2].contains("6.00"));
        assert!(lines[3].contains("Vehicle C"));
        assert!(lines[3].contains("unreachable"));
        assert!(lines[3].contains("unknown"));
        assert!(lines[3].contains("no-speed-data"));
    }

    #[test]
    fn empty_ranking_is_header_only() {
        let text = format_ranking(&Ranking::default());
        assert!(text.ends_with('\n'));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("#    Vehicle"));
        assert_eq!(lines[1], "-".repeat(72));
    }

    #[test]
    fn recommendation_variants() {
        assert_eq!(
            format_recommendation(&super::fixtures::ranking()),
            "Best vehicle to dispatch: Vehicle A (ETA 6.00 min)"
        );
        let none = format_recommendation(&super::fixtures::unreachable_only());
        assert!(none.starts_with("No vehicle can currently reach the incident"));
        assert!(none.contains("Vehicle B"));
        assert_eq!(format_recommendation(&Ranking::default()), "No vehicles in roster");
    }
}

// ── Heatmap ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod heatmap {
    use ed_core::GeoPoint;
    use ed_traffic::{FixedSpeed, SpeedSource, TrafficError, TrafficResult};

    use crate::{HeatSample, HeatmapOptions, HeatmapRenderer};

    /// Answers at positive longitudes only.
    struct EastOnly;

    impl SpeedSource for EastOnly {
        fn current_speed(&self, at: GeoPoint) -> TrafficResult<f64> {
            if at.lon > 0.0 {
                Ok(at.lat)
            } else {
                Err(TrafficError::MissingField("flowSegmentData"))
            }
        }
    }

    fn points() -> Vec<GeoPoint> {
        vec![
            GeoPoint::new(10.0, 72.0),
            GeoPoint::new(20.0, -72.0),
            GeoPoint::new(30.0, 72.5),
            GeoPoint::new(40.0, -1.0),
        ]
    }

    #[test]
    fn drops_points_without_speed() {
        let r = HeatmapRenderer::new(EastOnly, HeatmapOptions::centered_on(GeoPoint::new(19.0, 72.8)));
        let map = r.render(&points());
        assert_eq!(
            map.samples,
            vec![
                HeatSample { lat: 10.0, lon: 72.0, speed_kmh: 10.0 },
                HeatSample { lat: 30.0, lon: 72.5, speed_kmh: 30.0 },
            ]
        );
        assert_eq!(map.samples_json().unwrap(), "[[10.0,72.0,10.0],[30.0,72.5,30.0]]");
        assert_eq!(map.max_speed(), Some(30.0));
    }

    #[test]
    fn html_embeds_samples_and_options() {
        let opts = HeatmapOptions::centered_on(GeoPoint::new(19.076, 72.8777));
        let map = HeatmapRenderer::new(EastOnly, opts).render(&points());
        let html = map.to_html().unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("[[10.0,72.0,10.0],[30.0,72.5,30.0]]"));
        assert!(html.contains("setView([19.076,72.8777], 12)"));
        assert!(html.contains("\"radius\":25"));
        assert!(html.contains("\"minOpacity\":0.4"));
        assert!(html.contains("\"max\":30.0"));
        assert!(html.contains("leaflet-heat.js"));
        assert!(html.contains("{s}.tile.openstreetmap.org/{z}/{x}/{y}.png"));
    }

    #[test]
    fn empty_map_still_renders() {
        let opts = HeatmapOptions::centered_on(GeoPoint::new(0.0, 0.0));
        let map = HeatmapRenderer::new(EastOnly, opts).render(&[GeoPoint::new(1.0, -1.0)]);
        assert!(map.samples.is_empty());
        assert_eq!(map.max_speed(), None);
        let html = map.to_html().unwrap();
        assert!(html.contains("var samples = [];"));
        assert!(html.contains("\"max\":1.0"));
    }

    #[test]
    fn writes_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("heatmap.html");
        let opts = HeatmapOptions::centered_on(GeoPoint::new(19.076, 72.8777));
        let map = HeatmapRenderer::new(FixedSpeed(35.0), opts).render(&points());
        assert_eq!(map.samples.len(), 4);
        map.write_to(&path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, map.to_html().unwrap());
    }
}
