use std::fmt;

use gsdistance_common::{
    args::{CommonArgs, ElementArgs, Params},
    plugin::{base::FilterSubclass, PluginImpl},
    value::set_value,
};
use gst::{
    glib::{
        self, subclass::object::ObjectImpl, value::ToValue, ParamSpec, ParamSpecBuilderExt,
        ParamSpecEnum, ParamSpecString, Value,
    },
    prelude::GstParamSpecBuilderExt,
};

/// Where the broker delivers the payloads it receives.
#[derive(Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Clone, Copy, Default, glib::Enum)]
#[repr(u32)]
#[enum_type(name = "GstDsPayloadBrokerModeType")]
pub enum PayloadBrokerMode {
    #[default]
    #[enum_value(name = "return protobuf from results property", nick = "property")]
    Property = 0,
    #[enum_value(name = "write coded protobuf to file", nick = "proto")]
    Proto = 1,
    #[enum_value(name = "write csv to file (smart_distancing format).", nick = "csv")]
    Csv = 2,
}

impl fmt::Display for PayloadBrokerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Property => "property".fmt(f),
            Self::Proto => "proto".fmt(f),
            Self::Csv => "csv".fmt(f),
        }
    }
}

/// Plugin property value storage
#[derive(Clone, Debug, Default)]
pub struct Args {
    common: CommonArgs,
    mode: PayloadBrokerMode,
    basepath: Option<String>,
}

impl ElementArgs for Args {
    #[inline]
    fn silent(&self) -> bool {
        self.common.silent()
    }

    #[inline]
    fn properties() -> &'static [ParamSpec] {
        static PROPERTIES: Params = Params::new(|| Args::default().as_params());

        PROPERTIES.as_ref()
    }

    #[inline]
    fn property(&self, id: usize, pspec: &ParamSpec) -> Value {
        match pspec.name() {
            "mode" => self.mode.to_value(),
            "basepath" => self.basepath.to_value(),
            _ => self.common.property(id, pspec),
        }
    }

    #[inline]
    fn set_property(
        &mut self,
        plugin: &(impl ?Sized + PluginImpl),
        id: usize,
        value: &Value,
        pspec: &ParamSpec,
    ) {
        let name = pspec.name();
        match name {
            "mode" => set_value(plugin, name, &mut self.mode, value),
            "basepath" => set_value(plugin, name, &mut self.basepath, value),
            _ => self.common.set_property(plugin, id, value, pspec),
        }
    }
}

/// Implementation of glib::Object virtual methods
impl ObjectImpl for crate::plugin::Plugin {
    #[inline]
    fn properties() -> &'static [ParamSpec] {
        Args::properties()
    }

    #[inline]
    fn set_property(&self, id: usize, value: &Value, pspec: &ParamSpec) {
        self.args()
            .blocking_write()
            .set_property(self, id, value, pspec)
    }

    fn property(&self, id: usize, pspec: &ParamSpec) -> Value {
        match pspec.name() {
            "results" => self.results().to_value(),
            _ => self.args().blocking_read().property(id, pspec),
        }
    }
}

impl Args {
    fn as_params(&self) -> Vec<ParamSpec> {
        let mut params = self.common.as_params();
        params.push(
            ParamSpecString::builder("results")
                .nick("Results")
                .blurb("Latest results as a JSON serialized Batch (in property mode).")
                .read_only()
                .build(),
        );
        params.push(
            ParamSpecEnum::builder_with_default("mode", self.mode)
                .nick("Mode")
                .blurb("The mode for the element to operate in.")
                .mutable_ready()
                .build(),
        );
        params.push(
            ParamSpecString::builder("basepath")
                .nick("BasePath")
                .blurb("The full base path (minus extension) in proto or csv mode")
                .default_value(self.basepath.as_deref())
                .mutable_ready()
                .build(),
        );
        params
    }

    #[inline]
    pub fn mode(&self) -> PayloadBrokerMode {
        self.mode
    }

    #[inline]
    pub fn basepath(&self) -> Option<&str> {
        self.basepath.as_deref()
    }
}
