use crate::extraction::tag_source::TagSource;
use crate::extraction::tags::{
    FRAME_INCREMENT_POINTER, FRAME_TIME, FRAME_TIME_VECTOR, NUMBER_OF_FRAMES,
};
use crate::types::{FrameIncrementPointer, MultiframeInfo};

/// Extracts multiframe timing metadata from a raw tag source
///
/// # Algorithm
///
/// 1. Read NumberOfFrames (0028,0008); zero or absent means single-frame
/// 2. Read FrameIncrementPointer (0028,0009) to pick the timing attribute
/// 3. Pointer → FrameTimeVector (0018,1065): frame time is the arithmetic
///    mean of the vector
/// 4. Pointer → FrameTime (0018,1063), or pointer absent: frame time is
///    the single value
/// 5. Average frame rate is 1000 / frame time
///
/// Other pointer targets (e.g. Multi-frame Functional Groups, 5200,9230)
/// are not supported; the image is still reported as multiframe but with
/// zero timing fields.
pub fn extract_multiframe(tags: &dyn TagSource) -> MultiframeInfo {
    let mut info = MultiframeInfo::default();

    let number_of_frames = tags.int_tag(NUMBER_OF_FRAMES).unwrap_or(-1);
    if number_of_frames <= 0 {
        return info;
    }

    info.is_multiframe = true;
    info.number_of_frames = number_of_frames as u32;

    match tags.tag_reference(FRAME_INCREMENT_POINTER) {
        Some(pointer) if pointer == FRAME_TIME_VECTOR => {
            if let Some(vector) = tags.float_array_tag(FRAME_TIME_VECTOR) {
                let frame_time = match vector.len() {
                    0 => 0.0,
                    n => vector.iter().sum::<f64>() / n as f64,
                };
                // A non-positive mean carries no usable timing
                if frame_time > 0.0 {
                    info.frame_increment_pointer = FrameIncrementPointer::FrameTimeVector;
                    info.frame_time = frame_time;
                    info.average_frame_rate = 1000.0 / frame_time;
                    info.frame_time_vector = Some(vector);
                }
            }
        }
        Some(pointer) if pointer == FRAME_TIME => apply_frame_time(tags, &mut info),
        // An absent pointer still falls back to FrameTime for flexibility
        None => apply_frame_time(tags, &mut info),
        Some(_) => {}
    }

    info
}

fn apply_frame_time(tags: &dyn TagSource, info: &mut MultiframeInfo) {
    let frame_time = tags
        .float_array_tag(FRAME_TIME)
        .and_then(|values| values.first().copied())
        .unwrap_or(-1.0);

    if frame_time > 0.0 {
        info.frame_increment_pointer = FrameIncrementPointer::FrameTime;
        info.frame_time = frame_time;
        info.average_frame_rate = 1000.0 / frame_time;
    }
}
