use gst::glib;

fn plugin_init(plugin: &gst::Plugin) -> Result<(), glib::BoolError> {
    ::gsdistance_common::payload::meta::register();

    register(plugin, "dsdistance", ::dsdistance::register)?;
    register(plugin, "dsprotopayload", ::dsprotopayload::register)?;
    register(plugin, "dspayloadbroker", ::dspayloadbroker::register)?;
    Ok(())
}

fn register(
    plugin: &gst::Plugin,
    name: &str,
    f: fn(&gst::Plugin) -> Result<(), glib::BoolError>,
) -> Result<(), glib::BoolError> {
    f(plugin).map_err(|error| {
        gst::error!(gst::CAT_RUST, "could not register {name}: {error}");
        error
    })
}

gst::plugin_define!(
    distance,
    env!("CARGO_PKG_DESCRIPTION"),
    plugin_init,
    concat!(env!("CARGO_PKG_VERSION"), "-", env!("COMMIT_ID")),
    "LGPL",
    env!("CARGO_PKG_NAME"),
    env!("CARGO_PKG_NAME"),
    env!("CARGO_PKG_REPOSITORY"),
    env!("BUILD_REL_DATE")
);
