use gsdistance_common::{
    args::{CommonArgs, ElementArgs, Params},
    filter::{DEFAULT_CLASS_ID, MAX_CLASS_ID},
    plugin::{base::FilterSubclass, PluginImpl},
    value::set_value,
};
use gst::{
    glib::{
        subclass::object::ObjectImpl, value::ToValue, ParamSpec, ParamSpecBuilderExt,
        ParamSpecInt, Value,
    },
    prelude::GstParamSpecBuilderExt,
};

/// Plugin property value storage
#[derive(Clone, Debug)]
pub struct Args {
    common: CommonArgs,
    class_id: i32,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            common: Default::default(),
            class_id: DEFAULT_CLASS_ID,
        }
    }
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
            "class-id" => self.class_id.to_value(),
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
            "class-id" => set_value(plugin, name, &mut self.class_id, value),
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

    #[inline]
    fn property(&self, id: usize, pspec: &ParamSpec) -> Value {
        self.args().blocking_read().property(id, pspec)
    }
}

impl Args {
    fn as_params(&self) -> Vec<ParamSpec> {
        let mut params = self.common.as_params();
        params.push(
            ParamSpecInt::builder("class-id")
                .nick("ClassID")
                .blurb("Class id of a person in the payload.")
                .minimum(0)
                .maximum(MAX_CLASS_ID)
                .default_value(self.class_id)
                .controllable()
                .build(),
        );
        params
    }

    #[inline]
    pub fn class_id(&self) -> i32 {
        self.class_id
    }
}
