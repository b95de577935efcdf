use gsdistance_common::{
    filter::ProtoPayloadFilter,
    plugin::{
        base::{BasePlugin, FilterSubclass, FilterSubclassExt},
        PluginImpl,
    },
};
use gst::{
    glib::{self, subclass::types::ObjectSubclass},
    subclass::prelude::GstObjectImpl,
    BufferRef, DebugCategory, ErrorMessage, FlowError, FlowSuccess,
};
use gst_base::subclass::{base_transform::BaseTransformImpl, BaseTransformMode};
use tokio::sync::{Mutex, RwLock};

use crate::args::Args;

/// Struct containing all the element data
#[derive(Default)]
pub struct Plugin {
    base: BasePlugin<Args, ProtoPayloadFilter>,
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
    type Filter = ProtoPayloadFilter;

    #[inline]
    fn args(&self) -> &RwLock<<Self as FilterSubclass>::Args> {
        self.base.args()
    }

    #[inline]
    fn filter(&self) -> &Mutex<Option<<Self as FilterSubclass>::Filter>> {
        self.base.filter()
    }
}

impl GstObjectImpl for Plugin {}

impl BaseTransformImpl for Plugin {
    const MODE: BaseTransformMode = BaseTransformMode::AlwaysInPlace;
    const PASSTHROUGH_ON_SAME_CAPS: bool = false;
    const TRANSFORM_IP_ON_PASSTHROUGH: bool = false;

    fn start(&self) -> Result<(), ErrorMessage> {
        self.start_filter(ProtoPayloadFilter::new(self.cat()));
        Ok(())
    }

    fn stop(&self) -> Result<(), ErrorMessage> {
        self.stop_filter();
        Ok(())
    }

    fn transform_ip(&self, buf: &mut BufferRef) -> Result<FlowSuccess, FlowError> {
        self.transform_filter(buf, |args, filter| filter.set_class_id(args.class_id()))
    }
}
