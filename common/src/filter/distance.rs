use gst::{BufferRef, DebugCategory, FlowError, FlowSuccess};

use crate::{analytics, distance, payload::Frame, payload::PTS_NONE};

use super::BufferFilter;

pub const DEFAULT_CLASS_ID: i32 = 0;
pub const DEFAULT_DO_DRAWING: bool = true;
pub const MAX_CLASS_ID: i32 = 4096;

/// Marks detections of one class which stand too close to each other.
pub struct DistanceFilter {
    cat: DebugCategory,
    pub class_id: i32,
    pub do_drawing: bool,
    frame_num: i32,
}

impl DistanceFilter {
    pub fn new(cat: DebugCategory) -> Self {
        Self {
            cat,
            class_id: DEFAULT_CLASS_ID,
            do_drawing: DEFAULT_DO_DRAWING,
            frame_num: 0,
        }
    }

    /// Measures the buffer's detections and advances the frame counter.
    pub fn frame(&mut self, buffer: &BufferRef) -> Frame {
        let detections = analytics::detections(buffer);
        let distance::Distances { people, sum_danger } =
            distance::measure(&detections, self.class_id);

        let frame_num = self.frame_num;
        self.frame_num = self.frame_num.wrapping_add(1);

        Frame {
            frame_num,
            pts: buffer.pts().map(|pts| pts.nseconds()).unwrap_or(PTS_NONE),
            people,
            sum_danger,
        }
    }
}

impl BufferFilter for DistanceFilter {
    fn on_buffer(&mut self, buffer: &mut BufferRef) -> Result<FlowSuccess, FlowError> {
        let frame = self.frame(buffer);
        gst::trace!(
            self.cat,
            "frame {}: {} people, {} in danger",
            frame.frame_num,
            frame.people.len(),
            frame.violations().count(),
        );

        if self.do_drawing {
            let marks: Vec<_> = frame
                .violations()
                .map(|person| (person.uid, person.danger_val.min(1.0)))
                .collect();

            analytics::mark_danger(buffer, &marks).map_err(|error| {
                gst::error!(self.cat, "Failed to mark close objects: {error}");
                FlowError::Error
            })?;
        }
        Ok(FlowSuccess::Ok)
    }
}
