//! Rows in the smart_distancing object log layout.

use std::borrow::Cow;

use anyhow::Result;
use serde::Serialize;

use super::{Frame, PTS_NONE};

pub const HEADER: &str =
    "Timestamp,DetectedObjects,ViolatingObjects,EnvironmentScore,Detections,ViolationsIndexes";

#[derive(Serialize)]
struct Detection {
    uid: u32,
    bbox: [i32; 4],
}

pub fn row(frame: &Frame) -> Result<String> {
    let timestamp = match frame.pts {
        PTS_NONE => String::new(),
        pts => pts.to_string(),
    };

    let detected = frame.people.len();
    let violating = frame.violations().count();
    let score = if detected == 0 {
        0.0
    } else {
        violating as f32 / detected as f32
    };

    let detections: Vec<_> = frame
        .people
        .iter()
        .map(|person| Detection {
            uid: person.uid,
            bbox: person
                .bbox
                .map(|bbox| [bbox.left, bbox.top, bbox.width, bbox.height])
                .unwrap_or_default(),
        })
        .collect();
    let detections = ::serde_json::to_string(&detections)?;

    let violations: Vec<_> = frame.violations().map(|person| person.uid).collect();
    let violations = ::serde_json::to_string(&violations)?;

    Ok(format!(
        "{timestamp},{detected},{violating},{score:.3},{},{}",
        escape(&detections),
        escape(&violations),
    ))
}

fn escape(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}
