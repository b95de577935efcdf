use anyhow::Result;
use gst::{BufferRef, DebugCategory, FlowError, FlowSuccess};

use crate::{filter::BufferFilter, filter::PayloadBroker, payload::Batch};

/// Keeps the latest batch around so it can be read back as a property.
pub struct PropertyBroker {
    cat: DebugCategory,
    latest: Option<Batch>,
}

impl PropertyBroker {
    pub fn new(cat: DebugCategory) -> Self {
        Self { cat, latest: None }
    }
}

impl BufferFilter for PropertyBroker {
    fn on_buffer(&mut self, buffer: &mut BufferRef) -> Result<FlowSuccess, FlowError> {
        let Some(payload) = super::payload(self.cat, buffer) else {
            return Ok(FlowSuccess::Ok);
        };

        let batch = super::decode(payload).map_err(|error| {
            gst::error!(self.cat, "Failed to decode payload: {error}");
            FlowError::Error
        })?;
        self.latest.replace(batch);
        Ok(FlowSuccess::Ok)
    }
}

impl PayloadBroker for PropertyBroker {
    fn start(&mut self) -> Result<()> {
        self.latest = None;
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.latest = None;
        Ok(())
    }

    fn payload(&self) -> Option<String> {
        let batch = self.latest.as_ref()?;
        match ::serde_json::to_string(batch) {
            Ok(payload) => Some(payload),
            Err(error) => {
                gst::error!(self.cat, "Failed to serialize results: {error}");
                None
            }
        }
    }
}
