//! Serialized payloads travelling alongside the buffer as a custom meta.

use bytes::Bytes;
use gst::{glib, meta::CustomMeta, BufferRef};

pub const NAME: &str = "DsPayloadMeta";

const FIELD_PAYLOAD: &str = "payload";

pub fn register() {
    if !CustomMeta::is_registered(NAME) {
        CustomMeta::register(NAME, &[]);
    }
}

/// Attaches `payload` to the buffer, replacing a payload attached earlier.
pub fn attach(buffer: &mut BufferRef, payload: Bytes) -> Result<(), glib::BoolError> {
    if CustomMeta::from_buffer(buffer, NAME).is_err() {
        CustomMeta::add(buffer, NAME)?;
    }

    let mut meta = CustomMeta::from_mut_buffer(buffer, NAME)?;
    meta.mut_structure()
        .set(FIELD_PAYLOAD, glib::Bytes::from_owned(payload));
    Ok(())
}

pub fn read(buffer: &BufferRef) -> Option<Bytes> {
    let meta = CustomMeta::from_buffer(buffer, NAME).ok()?;
    let payload = meta.structure().get::<glib::Bytes>(FIELD_PAYLOAD).ok()?;
    Some(Bytes::copy_from_slice(&payload))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init() {
        use std::sync::Once;
        static INIT: Once = Once::new();

        INIT.call_once(|| {
            gst::init().unwrap();
            register();
        });
    }

    #[test]
    fn test_missing_payload() {
        init();

        let buffer = gst::Buffer::with_size(8).unwrap();
        assert_eq!(read(&buffer), None);
    }

    #[test]
    fn test_attach_replaces_payload() {
        init();

        let mut buffer = gst::Buffer::with_size(8).unwrap();
        {
            let buffer = buffer.get_mut().unwrap();
            attach(buffer, Bytes::from_static(b"first")).unwrap();
            attach(buffer, Bytes::from_static(b"second")).unwrap();
        }

        assert_eq!(read(&buffer), Some(Bytes::from_static(b"second")));
    }
}
