//! Flow-segment response parsing.
//!
//! The service answers with JSON shaped like:
//!
//! ```json
//! { "flowSegmentData": { "currentSpeed": 31, "freeFlowSpeed": 45, "confidence": 0.9, … } }
//! ```
//!
//! Only `flowSegmentData.currentSpeed` is required.

use serde::Deserialize;

use crate::{TrafficError, TrafficResult};

#[derive(Deserialize)]
struct FlowResponse {
    #[serde(rename = "flowSegmentData")]
    flow_segment_data: Option<FlowSegmentData>,
}

#[derive(Deserialize)]
struct FlowSegmentData {
    #[serde(rename = "currentSpeed")]
    current_speed: Option<f64>,
    #[serde(rename = "freeFlowSpeed")]
    free_flow_speed: Option<f64>,
    confidence: Option<f64>,
}

/// The parts of a flow segment the dispatcher uses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowSegment {
    pub current_speed_kmh:   f64,
    pub free_flow_speed_kmh: Option<f64>,
    /// 0.0–1.0; how much live data backs `current_speed_kmh`.
    pub confidence:          Option<f64>,
}

/// Parse a flow-segment response body.
///
/// # Errors
///
/// - [`TrafficError::Malformed`] if `body` is not JSON of the expected shape.
/// - [`TrafficError::MissingField`] if the segment or its current speed is absent.
/// - [`TrafficError::InvalidSpeed`] for negative or non-finite speeds.
pub fn parse_flow_segment(body: &str) -> TrafficResult<FlowSegment> {
    let response: FlowResponse = serde_json::from_str(body)?;
    let data = response
        .flow_segment_data
        .ok_or(TrafficError::MissingField("flowSegmentData"))?;
    let current = data
        .current_speed
        .ok_or(TrafficError::MissingField("flowSegmentData.currentSpeed"))?;

    if !current.is_finite() || current < 0.0 {
        return Err(TrafficError::InvalidSpeed(current));
    }

    Ok(FlowSegment {
        current_speed_kmh:   current,
        free_flow_speed_kmh: data.free_flow_speed,
        confidence:          data.confidence,
    })
}
