mod file;
mod property;

pub use self::{
    file::{FileFormat, FileMetaBroker},
    property::PropertyBroker,
};

use anyhow::Result;
use bytes::Bytes;
use gst::{BufferRef, DebugCategory};
use prost::Message;

use crate::payload::{meta, Batch};

/// Reads the payload attached upstream, logging buffers which carry none.
fn payload(cat: DebugCategory, buffer: &BufferRef) -> Option<Bytes> {
    let payload = meta::read(buffer);
    if payload.is_none() {
        gst::debug!(cat, "No {} on buffer, skipping", meta::NAME);
    }
    payload
}

fn decode(payload: Bytes) -> Result<Batch> {
    Batch::decode(payload).map_err(Into::into)
}
