use gst::{
    glib::{value::ToValue, ParamSpec, ParamSpecBoolean, ParamSpecBuilderExt, Value},
    prelude::GstParamSpecBuilderExt,
};
use once_cell::sync::Lazy;

use crate::{plugin::PluginImpl, value::set_value};

pub trait ElementArgs
where
    Self: Send + Sync + Default,
{
    fn silent(&self) -> bool;

    /// Properties installed for this type.
    fn properties() -> &'static [ParamSpec];

    /// Called whenever a value of a property is read. It can be called
    /// at any time from any thread.
    fn property(&self, id: usize, pspec: &ParamSpec) -> Value;

    /// Called whenever a value of a property is changed. It can be called
    /// at any time from any thread.
    fn set_property(
        &mut self,
        plugin: &(impl ?Sized + PluginImpl),
        id: usize,
        value: &Value,
        pspec: &ParamSpec,
    );
}

/// Property value storage shared by every element
#[derive(Clone, Debug)]
pub struct CommonArgs {
    silent: bool,
}

impl Default for CommonArgs {
    #[inline]
    fn default() -> Self {
        CommonArgs {
            silent: Self::default_silent(),
        }
    }
}

impl CommonArgs {
    #[inline]
    const fn default_silent() -> bool {
        false
    }
}

impl ElementArgs for CommonArgs {
    #[inline]
    fn silent(&self) -> bool {
        self.silent
    }

    #[inline]
    fn properties() -> &'static [ParamSpec] {
        static PROPERTIES: Params = Params::new(|| CommonArgs::default().as_params());

        PROPERTIES.as_ref()
    }

    fn property(&self, _id: usize, pspec: &ParamSpec) -> Value {
        match pspec.name() {
            "silent" => self.silent.to_value(),
            _ => unimplemented!(),
        }
    }

    fn set_property(
        &mut self,
        plugin: &(impl ?Sized + PluginImpl),
        _id: usize,
        value: &Value,
        pspec: &ParamSpec,
    ) {
        let name = pspec.name();
        match name {
            "silent" => set_value(plugin, name, &mut self.silent, value),
            _ => unimplemented!(),
        }
    }
}

impl CommonArgs {
    pub fn as_params(&self) -> Vec<ParamSpec> {
        vec![ParamSpecBoolean::builder("silent")
            .nick("Silent")
            .blurb("Produce verbose output ?")
            .default_value(self.silent)
            .controllable()
            .build()]
    }
}

pub type Params = Lazy<Vec<ParamSpec>>;
