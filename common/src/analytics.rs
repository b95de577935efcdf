//! Object detections read from, and annotations written to, the buffer's
//! analytics relation meta.

use gst::{glib, BufferRef};
use gst_analytics::{
    prelude::*, AnalyticsMetaRefExt, AnalyticsODMtd, AnalyticsRelationMeta, RelTypes,
};

/// Classification attached to detections which are too close to another.
pub const DANGER_CLASS: &str = "danger";

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Detection {
    pub id: u32,
    pub class_id: Option<i32>,
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

pub fn detections(buffer: &BufferRef) -> Vec<Detection> {
    let Some(meta) = buffer.meta::<AnalyticsRelationMeta>() else {
        return Vec::new();
    };

    meta.iter::<AnalyticsODMtd>()
        .filter_map(|mtd| {
            let location = mtd.location().ok()?;
            let obj_type: Option<glib::Quark> = mtd.obj_type().into();

            Some(Detection {
                id: mtd.id(),
                class_id: obj_type.and_then(|obj_type| parse_class_id(obj_type.as_str())),
                x: location.x,
                y: location.y,
                w: location.w,
                h: location.h,
            })
        })
        .collect()
}

/// Relates a [`DANGER_CLASS`] classification with the given confidence to
/// each detection id.
pub fn mark_danger(buffer: &mut BufferRef, marks: &[(u32, f32)]) -> Result<(), glib::BoolError> {
    if marks.is_empty() {
        return Ok(());
    }
    let Some(mut meta) = buffer.meta_mut::<AnalyticsRelationMeta>() else {
        return Ok(());
    };

    let class = glib::Quark::from_str(DANGER_CLASS);
    for &(id, confidence) in marks {
        let cls = meta.add_one_cls_mtd(confidence, class)?.id();
        meta.set_relation(RelTypes::RELATE_TO, id, cls)?;
    }
    Ok(())
}

/// Accepts both plain integers and the `CLASS-<n>` labels of tensor decoders.
fn parse_class_id(obj_type: &str) -> Option<i32> {
    obj_type
        .strip_prefix("CLASS-")
        .unwrap_or(obj_type)
        .parse()
        .ok()
}
