use gsdistance_common::{
    broker::{FileFormat, FileMetaBroker, PropertyBroker},
    filter::PayloadBroker,
    plugin::{
        base::{FilterSubclass, FilterSubclassExt},
        broker::{BrokerPlugin, DynBroker, RuntimeSubclass},
        PluginImpl,
    },
};
use gst::{
    error, error_msg,
    glib::{
        self,
        subclass::types::{ObjectSubclass, ObjectSubclassExt},
    },
    subclass::prelude::GstObjectImpl,
    BufferRef, DebugCategory, ErrorMessage, FlowError, FlowSuccess, ResourceError,
};
use gst_base::subclass::{base_transform::BaseTransformImpl, BaseTransformMode};
use tokio::sync::{Mutex, RwLock};

use crate::args::{Args, PayloadBrokerMode};

/// Struct containing all the element data
#[derive(Default)]
pub struct Plugin {
    broker: BrokerPlugin<Args>,
}

/// This trait registers our type with the GObject object system and
/// provides the entry points for creating a new instance and setting
/// up the class data
#[glib::object_subclass]
impl ObjectSubclass for Plugin {
    const NAME: &'static str = crate::metadata::CLASS_NAME;
    type Type = super::Plugin;
    type ParentType = ::gst_base::BaseTransform;
}

impl PluginImpl for Plugin {
    #[inline]
    fn cat(&self) -> DebugCategory {
        *crate::CAT
    }
}

impl FilterSubclass for Plugin {
    type Args = Args;
    type Filter = DynBroker;

    #[inline]
    fn args(&self) -> &RwLock<<Self as FilterSubclass>::Args> {
        self.broker.args()
    }

    #[inline]
    fn filter(&self) -> &Mutex<Option<<Self as FilterSubclass>::Filter>> {
        self.broker.filter()
    }
}

impl GstObjectImpl for Plugin {}

impl BaseTransformImpl for Plugin {
    const MODE: BaseTransformMode = BaseTransformMode::AlwaysInPlace;
    const PASSTHROUGH_ON_SAME_CAPS: bool = false;
    const TRANSFORM_IP_ON_PASSTHROUGH: bool = false;

    fn start(&self) -> Result<(), ErrorMessage> {
        let args = self.args().blocking_read();
        let mode = args.mode();
        let basepath = args.basepath().map(ToOwned::to_owned);
        drop(args);

        let mut broker = self.build_broker(mode, basepath.as_deref())?;
        broker.start().map_err(|e| {
            error!(
                self.cat(),
                imp: self,
                "Failed to start {mode} broker: {e}",
            );
            error_msg!(
                ResourceError::OpenWrite,
                ["Failed to start {mode} broker: {e}"]
            )
        })?;

        self.start_filter(broker);
        Ok(())
    }

    fn stop(&self) -> Result<(), ErrorMessage> {
        let Some(mut broker) = self.stop_filter() else {
            return Ok(());
        };

        broker.stop().map_err(|e| {
            error!(
                self.cat(),
                imp: self,
                "Failed to stop broker: {e}",
            );
            error_msg!(ResourceError::Write, ["Failed to stop broker: {e}"])
        })
    }

    fn transform_ip(&self, buf: &mut BufferRef) -> Result<FlowSuccess, FlowError> {
        self.transform_filter(buf, |_, _| ())
    }
}

impl Plugin {
    fn build_broker(
        &self,
        mode: PayloadBrokerMode,
        basepath: Option<&str>,
    ) -> Result<DynBroker, ErrorMessage> {
        let format = match mode {
            PayloadBrokerMode::Property => return Ok(Box::new(PropertyBroker::new(self.cat()))),
            PayloadBrokerMode::Proto => FileFormat::Proto,
            PayloadBrokerMode::Csv => FileFormat::Csv,
        };

        let Some(basepath) = basepath else {
            error!(
                self.cat(),
                imp: self,
                "basepath must be set for {mode} mode",
            );
            return Err(error_msg!(
                ResourceError::Settings,
                ["basepath must be set for {mode} mode"]
            ));
        };

        Ok(Box::new(FileMetaBroker::new(
            self.cat(),
            self.broker.runtime().handle().clone(),
            basepath,
            format,
        )))
    }

    /// The latest payload, as long as a property mode broker is running.
    pub(crate) fn results(&self) -> Option<String> {
        if self.args().blocking_read().mode() != PayloadBrokerMode::Property {
            return None;
        }

        self.filter()
            .blocking_lock()
            .as_ref()
            .and_then(|broker| broker.payload())
    }
}
