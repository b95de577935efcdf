//! Social distancing between the detections of a single frame.

use crate::{
    analytics::Detection,
    payload::{BBox, Person},
};

/// Normalized distances below this put both people in danger.
pub const DANGER_DISTANCE: f32 = 1.0;

pub struct Distances {
    pub people: Vec<Person>,
    pub sum_danger: f32,
}

/// Compares every pair of detections of class `class_id`.
///
/// People stand on the bottom center of their box, and the distance between
/// two of them is measured in units of their mean height, so the threshold
/// holds regardless of how far they are from the camera.
pub fn measure(detections: &[Detection], class_id: i32) -> Distances {
    let mut people: Vec<Person> = detections
        .iter()
        .filter(|detection| detection.class_id == Some(class_id))
        .map(|detection| Person {
            uid: detection.id,
            is_danger: false,
            danger_val: 0.0,
            bbox: Some(BBox {
                left: detection.x,
                top: detection.y,
                width: detection.w,
                height: detection.h,
            }),
        })
        .collect();

    for a in 0..people.len() {
        for b in (a + 1)..people.len() {
            let (Some(box_a), Some(box_b)) = (people[a].bbox, people[b].bbox) else {
                continue;
            };
            let Some(distance) = normalized_distance(&box_a, &box_b) else {
                continue;
            };

            if distance < DANGER_DISTANCE {
                let danger = DANGER_DISTANCE - distance;
                for person in [a, b] {
                    let person = &mut people[person];
                    person.is_danger = true;
                    person.danger_val += danger;
                }
            }
        }
    }

    let sum_danger = people.iter().map(|person| person.danger_val).sum();
    Distances { people, sum_danger }
}

fn normalized_distance(a: &BBox, b: &BBox) -> Option<f32> {
    let scale = (a.height as f32 + b.height as f32) / 2.0;
    if scale <= 0.0 {
        return None;
    }

    let (ax, ay) = bottom_center(a);
    let (bx, by) = bottom_center(b);
    Some((ax - bx).hypot(ay - by) / scale)
}

fn bottom_center(bbox: &BBox) -> (f32, f32) {
    (
        bbox.left as f32 + bbox.width as f32 / 2.0,
        bbox.top as f32 + bbox.height as f32,
    )
}
