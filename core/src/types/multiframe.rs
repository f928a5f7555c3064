use std::fmt;

/// Kind of attribute the Frame Increment Pointer resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub enum FrameIncrementPointer {
    /// Frame Time (0018,1063), one shared inter-frame interval
    FrameTime,

    /// Frame Time Vector (0018,1065), one interval per frame
    FrameTimeVector,

    /// Not a multiframe image, or timing structure not recognized
    #[default]
    Unspecified,
}

impl fmt::Display for FrameIncrementPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FrameIncrementPointer::FrameTime => "frameTime",
            FrameIncrementPointer::FrameTimeVector => "frameTimeVector",
            FrameIncrementPointer::Unspecified => "none",
        };
        write!(f, "{}", name)
    }
}

/// Multiframe timing metadata derived from an image's raw tags
///
/// The default value describes a single-frame image: `is_multiframe`
/// false and every numeric field zero.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct MultiframeInfo {
    pub is_multiframe: bool,

    pub number_of_frames: u32,

    /// Which timing attribute the frame increment pointer selected
    pub frame_increment_pointer: FrameIncrementPointer,

    /// Inter-frame interval in ms (mean of the vector when one is used)
    pub frame_time: f64,

    /// Per-frame intervals in ms, when the pointer selects the vector
    pub frame_time_vector: Option<Vec<f64>>,

    /// 1000 / frame time, in frames per second
    pub average_frame_rate: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_single_frame() {
        let info = MultiframeInfo::default();

        assert!(!info.is_multiframe);
        assert_eq!(info.number_of_frames, 0);
        assert_eq!(
            info.frame_increment_pointer,
            FrameIncrementPointer::Unspecified
        );
        assert_eq!(info.frame_time, 0.0);
        assert_eq!(info.frame_time_vector, None);
        assert_eq!(info.average_frame_rate, 0.0);
    }

    #[test]
    fn test_pointer_display() {
        assert_eq!(FrameIncrementPointer::FrameTime.to_string(), "frameTime");
        assert_eq!(
            FrameIncrementPointer::FrameTimeVector.to_string(),
            "frameTimeVector"
        );
        assert_eq!(FrameIncrementPointer::Unspecified.to_string(), "none");
    }
}
