use gst::{Caps, PadDirection, PadPresence, PadTemplate};
use gst_video::{VideoCapsBuilder, VideoFormat};

pub const CAPS_FEATURE_MEMORY_NVMM: &str = "memory:NVMM";

pub const SUPPORTED_VIDEO_FORMATS: [VideoFormat; 2] = [VideoFormat::Nv12, VideoFormat::Rgba];

/// Device memory first, then the same formats in system memory.
pub fn caps() -> Caps {
    let mut caps = VideoCapsBuilder::new()
        .features([CAPS_FEATURE_MEMORY_NVMM])
        .format_list(SUPPORTED_VIDEO_FORMATS)
        .build();

    let system = VideoCapsBuilder::new()
        .format_list(SUPPORTED_VIDEO_FORMATS)
        .build();
    caps.make_mut().append(system);
    caps
}

pub mod sink {
    use super::*;

    pub fn template() -> PadTemplate {
        PadTemplate::new("sink", PadDirection::Sink, PadPresence::Always, &caps()).unwrap()
    }
}

pub mod src {
    use super::*;

    pub fn template() -> PadTemplate {
        PadTemplate::new("src", PadDirection::Src, PadPresence::Always, &caps()).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caps() {
        gst::init().unwrap();

        let caps = caps();
        assert_eq!(caps.size(), 2);
        assert!(caps
            .features(0)
            .unwrap()
            .contains(CAPS_FEATURE_MEMORY_NVMM));

        let rgba: Caps = "video/x-raw(memory:NVMM),format=RGBA,width=320,height=240,framerate=30/1"
            .parse()
            .unwrap();
        assert!(rgba.can_intersect(&caps));

        let i420: Caps = "video/x-raw,format=I420,width=320,height=240".parse().unwrap();
        assert!(!i420.can_intersect(&caps));
    }
}
