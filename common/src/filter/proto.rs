use bytes::Bytes;
use gst::{BufferRef, DebugCategory, FlowError, FlowSuccess};
use prost::Message;

use crate::payload::{meta, Batch};

use super::{BufferFilter, DistanceFilter};

/// Serializes the distances of each frame into a [`meta`] payload.
pub struct ProtoPayloadFilter {
    cat: DebugCategory,
    inner: DistanceFilter,
}

impl ProtoPayloadFilter {
    pub fn new(cat: DebugCategory) -> Self {
        let mut inner = DistanceFilter::new(cat);
        inner.do_drawing = false;

        Self { cat, inner }
    }

    #[inline]
    pub fn set_class_id(&mut self, class_id: i32) {
        self.inner.class_id = class_id;
    }
}

impl BufferFilter for ProtoPayloadFilter {
    fn on_buffer(&mut self, buffer: &mut BufferRef) -> Result<FlowSuccess, FlowError> {
        let batch = Batch {
            frames: vec![self.inner.frame(buffer)],
        };
        let payload = Bytes::from(batch.encode_to_vec());

        meta::attach(buffer, payload).map_err(|error| {
            gst::error!(self.cat, "Failed to attach payload: {error}");
            FlowError::Error
        })?;
        Ok(FlowSuccess::Ok)
    }
}

#[cfg(test)]
mod tests {
    use gst::glib;
    use gst_analytics::{prelude::*, AnalyticsRelationMeta};

    use super::*;

    #[test]
    fn test_attaches_batch() {
        gst::init().unwrap();
        meta::register();

        let mut filter = ProtoPayloadFilter::new(*gst::CAT_RUST);
        filter.set_class_id(3);

        let mut buffer = gst::Buffer::with_size(8).unwrap();
        {
            let buffer = buffer.get_mut().unwrap();
            let mut meta = AnalyticsRelationMeta::add(buffer);
            meta.add_od_mtd(glib::Quark::from_str("CLASS-3"), 0, 0, 20, 100, 0.9)
                .unwrap();
            meta.add_od_mtd(glib::Quark::from_str("CLASS-1"), 0, 0, 20, 100, 0.9)
                .unwrap();
        }

        filter.on_buffer(buffer.get_mut().unwrap()).unwrap();
        filter.on_buffer(buffer.get_mut().unwrap()).unwrap();

        let payload = meta::read(&buffer).unwrap();
        let batch = Batch::decode(payload).unwrap();
        assert_eq!(batch.frames.len(), 1);

        let frame = &batch.frames[0];
        assert_eq!(frame.frame_num, 1);
        assert_eq!(frame.pts, crate::payload::PTS_NONE);
        assert_eq!(frame.people.len(), 1);
        assert!(!frame.people[0].is_danger);
    }
}
