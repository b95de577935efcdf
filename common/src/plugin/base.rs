use gst::{
    glib::subclass::types::{ObjectSubclass, ObjectSubclassExt},
    prelude::*,
    BufferRef, FlowError, FlowSuccess,
};
use tokio::sync::{Mutex, RwLock};

use crate::{args::ElementArgs, filter::BufferFilter};

use super::PluginImpl;

pub struct BasePlugin<Args, Filter> {
    args: RwLock<Args>,
    filter: Mutex<Option<Filter>>,
}

impl<Args, Filter> Default for BasePlugin<Args, Filter>
where
    Args: Default,
{
    fn default() -> Self {
        Self {
            args: RwLock::default(),
            filter: Mutex::default(),
        }
    }
}

pub trait FilterSubclass {
    type Args: ElementArgs;
    type Filter: BufferFilter;

    fn args(&self) -> &RwLock<<Self as FilterSubclass>::Args>;

    fn filter(&self) -> &Mutex<Option<<Self as FilterSubclass>::Filter>>;
}

impl<Args, Filter> FilterSubclass for BasePlugin<Args, Filter>
where
    Args: ElementArgs,
    Filter: BufferFilter,
{
    type Args = Args;
    type Filter = Filter;

    #[inline]
    fn args(&self) -> &RwLock<Self::Args> {
        &self.args
    }

    #[inline]
    fn filter(&self) -> &Mutex<Option<Self::Filter>> {
        &self.filter
    }
}

pub trait FilterSubclassExt
where
    Self: FilterSubclass + PluginImpl,
    <Self as ObjectSubclass>::Type: IsA<gst::Object>,
{
    fn start_filter(&self, filter: <Self as FilterSubclass>::Filter) {
        self.filter().blocking_lock().replace(filter);

        gst::info!(
            self.cat(),
            imp: self,
            "Started",
        );
    }

    fn stop_filter(&self) -> Option<<Self as FilterSubclass>::Filter> {
        let filter = self.filter().blocking_lock().take();

        gst::info!(
            self.cat(),
            imp: self,
            "Stopped",
        );
        filter
    }

    /// Forwards the buffer to the running filter, after `configure` had the
    /// chance to copy the current property values into it.
    fn transform_filter<F>(
        &self,
        buffer: &mut BufferRef,
        configure: F,
    ) -> Result<FlowSuccess, FlowError>
    where
        F: FnOnce(&<Self as FilterSubclass>::Args, &mut <Self as FilterSubclass>::Filter),
    {
        let silent = self.args().blocking_read().silent();
        if !silent {
            gst::log!(
                self.cat(),
                imp: self,
                "{} got buffer.",
                self.obj().name(),
            );
        }

        // controlled properties are written through `set_property`, so no
        // lock may be held here
        if let Some(pts) = buffer.pts() {
            if let Err(error) = self.obj().sync_values(pts) {
                gst::debug!(
                    self.cat(),
                    imp: self,
                    "Failed to sync controlled properties: {error}",
                );
            }
        }

        let mut lock = self.filter().blocking_lock();
        let filter = lock.as_mut().ok_or(FlowError::Flushing)?;
        configure(&self.args().blocking_read(), filter);

        filter.on_buffer(buffer)
    }
}

impl<T> FilterSubclassExt for T
where
    T: FilterSubclass + PluginImpl,
    <T as ObjectSubclass>::Type: IsA<gst::Object>,
{
}
