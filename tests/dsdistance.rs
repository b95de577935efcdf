use gst::{glib, prelude::*};
use gst_analytics::{
    prelude::*, AnalyticsClassificationMtd, AnalyticsMetaRefExt, AnalyticsRelationMeta,
};

const CAPS_NVMM_NV12: &str =
    "video/x-raw(memory:NVMM),format=NV12,width=1280,height=720,framerate=1/30";
const CAPS_NVMM_RGBA: &str =
    "video/x-raw(memory:NVMM),format=RGBA,width=1280,height=720,framerate=1/30";
const CAPS_RGBA: &str = "video/x-raw,format=RGBA,width=1280,height=720,framerate=1/30";

fn init() {
    use std::sync::Once;
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        gst::init().unwrap();
        gstdistance::plugin_register_static().expect("distance test");
    });
}

/// A buffer with one detection of class `0` per `(x, y)`, each 20x100.
fn people(positions: &[(i32, i32)]) -> gst::Buffer {
    let mut buffer = gst::Buffer::with_size(42).unwrap();
    {
        let buffer = buffer.get_mut().unwrap();
        buffer.set_pts(gst::ClockTime::ZERO);

        let mut meta = AnalyticsRelationMeta::add(buffer);
        for &(x, y) in positions {
            meta.add_od_mtd(glib::Quark::from_str("0"), x, y, 20, 100, 0.9)
                .unwrap();
        }
    }
    buffer
}

fn marks(buffer: &gst::Buffer) -> usize {
    buffer
        .meta::<AnalyticsRelationMeta>()
        .unwrap()
        .iter::<AnalyticsClassificationMtd>()
        .count()
}

#[test]
fn test_setup_teardown() {
    init();

    let h = gst_check::Harness::new("dsdistance");
    drop(h);
}

#[test]
fn test_type() {
    init();

    let filter = gst::ElementFactory::make("dsdistance").build().unwrap();
    assert_eq!(filter.type_().name(), "GstDsDistance");
    assert!(filter.is::<gst_base::BaseTransform>());
}

#[test]
fn test_name_property() {
    init();

    let filter = gst::ElementFactory::make("dsdistance")
        .name("foo")
        .build()
        .unwrap();
    assert_eq!(filter.name(), "foo");
}

#[test]
fn test_silent_property() {
    init();

    let filter = gst::ElementFactory::make("dsdistance").build().unwrap();
    assert!(!filter.property::<bool>("silent"));

    filter.set_property("silent", true);
    assert!(filter.property::<bool>("silent"));

    filter.set_property("silent", false);
    assert!(!filter.property::<bool>("silent"));
}

#[test]
fn test_class_id_property() {
    init();

    let filter = gst::ElementFactory::make("dsdistance").build().unwrap();
    assert_eq!(filter.property::<i32>("class-id"), 0);

    filter.set_property("class-id", 4096i32);
    assert_eq!(filter.property::<i32>("class-id"), 4096);

    let pspec = filter
        .find_property("class-id")
        .unwrap()
        .downcast::<glib::ParamSpecInt>()
        .unwrap();
    assert_eq!(pspec.minimum(), 0);
    assert_eq!(pspec.maximum(), 4096);
    assert!(pspec.flags().contains(gst::PARAM_FLAG_CONTROLLABLE));
}

#[test]
fn test_do_drawing_property() {
    init();

    let filter = gst::ElementFactory::make("dsdistance").build().unwrap();
    assert!(filter.property::<bool>("do-drawing"));

    filter.set_property("do-drawing", false);
    assert!(!filter.property::<bool>("do-drawing"));
}

#[test]
fn test_pads() {
    init();

    for caps in [CAPS_NVMM_NV12, CAPS_NVMM_RGBA, CAPS_RGBA] {
        let mut h = gst_check::Harness::new("dsdistance");
        h.set_src_caps_str(caps);

        let buffer = h.create_buffer(42).unwrap();
        let ptr = buffer.as_ptr();
        assert_eq!(h.push(buffer), Ok(gst::FlowSuccess::Ok));

        // in place, so the very same buffer comes out
        let buffer = h.pull().unwrap();
        assert_eq!(buffer.as_ptr(), ptr);

        let current = h.sinkpad().unwrap().current_caps().unwrap();
        assert_eq!(current, caps.parse::<gst::Caps>().unwrap());
    }
}

#[test]
fn test_unsupported_format() {
    init();

    let filter = gst::ElementFactory::make("dsdistance").build().unwrap();
    let sink = filter.static_pad("sink").unwrap();

    let i420: gst::Caps = "video/x-raw,format=I420,width=320,height=240".parse().unwrap();
    assert!(!sink.pad_template_caps().can_intersect(&i420));
}

#[test]
fn test_marks_close_people() {
    init();

    let mut h = gst_check::Harness::new("dsdistance");
    h.set_src_caps_str(CAPS_RGBA);

    // the first two stand half a body height apart
    assert_eq!(
        h.push(people(&[(0, 0), (50, 0), (1000, 0)])),
        Ok(gst::FlowSuccess::Ok)
    );

    assert_eq!(marks(&h.pull().unwrap()), 2);
}

#[test]
fn test_drawing_disabled() {
    init();

    let mut h = gst_check::Harness::new("dsdistance");
    h.element().unwrap().set_property("do-drawing", false);
    h.set_src_caps_str(CAPS_RGBA);

    assert_eq!(h.push(people(&[(0, 0), (50, 0)])), Ok(gst::FlowSuccess::Ok));
    assert_eq!(marks(&h.pull().unwrap()), 0);
}

#[test]
fn test_other_class() {
    init();

    let mut h = gst_check::Harness::new("dsdistance");
    h.element().unwrap().set_property("class-id", 1i32);
    h.set_src_caps_str(CAPS_RGBA);

    assert_eq!(h.push(people(&[(0, 0), (50, 0)])), Ok(gst::FlowSuccess::Ok));
    assert_eq!(marks(&h.pull().unwrap()), 0);
}

#[test]
fn test_properties_while_playing() {
    init();

    let mut h = gst_check::Harness::new("dsdistance");
    h.set_src_caps_str(CAPS_RGBA);
    let filter = h.element().unwrap();

    assert_eq!(h.push(people(&[(0, 0), (50, 0)])), Ok(gst::FlowSuccess::Ok));
    assert_eq!(marks(&h.pull().unwrap()), 2);

    filter.set_property("do-drawing", false);
    assert_eq!(h.push(people(&[(0, 0), (50, 0)])), Ok(gst::FlowSuccess::Ok));
    assert_eq!(marks(&h.pull().unwrap()), 0);

    filter.set_property("do-drawing", true);
    filter.set_property("class-id", 1i32);
    assert_eq!(h.push(people(&[(0, 0), (50, 0)])), Ok(gst::FlowSuccess::Ok));
    assert_eq!(marks(&h.pull().unwrap()), 0);

    filter.set_property("class-id", 0i32);
    assert_eq!(h.push(people(&[(0, 0), (50, 0)])), Ok(gst::FlowSuccess::Ok));
    assert_eq!(marks(&h.pull().unwrap()), 2);
}

#[test]
fn test_pipeline() {
    init();

    let pipeline = gst::parse::launch(
        "videotestsrc num-buffers=5 ! video/x-raw,format=RGBA,width=320,height=240 ! dsdistance ! fakesink",
    )
    .unwrap();
    pipeline.set_state(gst::State::Playing).unwrap();

    let bus = pipeline.bus().unwrap();
    for msg in bus.iter_timed(gst::ClockTime::NONE) {
        use gst::MessageView;

        match msg.view() {
            MessageView::Eos(..) => break,
            MessageView::Error(err) => panic!("{} ({:?})", err.error(), err.debug()),
            _ => (),
        }
    }

    pipeline.set_state(gst::State::Null).unwrap();
}
