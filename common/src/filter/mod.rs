mod distance;
mod proto;

pub use self::{
    distance::{DistanceFilter, DEFAULT_CLASS_ID, DEFAULT_DO_DRAWING, MAX_CLASS_ID},
    proto::ProtoPayloadFilter,
};

use anyhow::Result;
use gst::{BufferRef, FlowError, FlowSuccess};

/// A metadata transformation invoked once per buffer.
pub trait BufferFilter
where
    Self: Send,
{
    fn on_buffer(&mut self, buffer: &mut BufferRef) -> Result<FlowSuccess, FlowError>;
}

impl<T> BufferFilter for Box<T>
where
    T: ?Sized + BufferFilter,
{
    #[inline]
    fn on_buffer(&mut self, buffer: &mut BufferRef) -> Result<FlowSuccess, FlowError> {
        (**self).on_buffer(buffer)
    }
}

/// A filter delivering serialized payloads somewhere outside the pipeline.
pub trait PayloadBroker
where
    Self: BufferFilter,
{
    fn start(&mut self) -> Result<()>;

    fn stop(&mut self) -> Result<()>;

    /// The latest payload, if this broker keeps one around.
    fn payload(&self) -> Option<String> {
        None
    }
}
