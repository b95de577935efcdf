use std::fmt;

use gst::glib::{subclass::types::ObjectSubclassExt, value::FromValue, Value};

use crate::plugin::PluginImpl;

pub fn set_value<'a, T>(
    plugin: &(impl ?Sized + PluginImpl),
    name: &str,
    field: &mut T,
    value: &'a Value,
) where
    T: fmt::Debug + FromValue<'a>,
{
    let value = value.get().expect("type checked upstream");
    gst::info!(
        plugin.cat(),
        imp: plugin,
        "Changing {name} from {field:?} to {value:?}",
    );
    *field = value;
}
