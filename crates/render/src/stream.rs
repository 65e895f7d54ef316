use crate::ansi::ScreenMode;
use crate::banner::Banner;
use crate::frame;
use crate::frames::Frames;
use ascii_models::{Rgb, StreamParams};
use bytes::Bytes;
use futures::stream::{self, Stream};
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
enum Phase {
    Start,
    Frame { index: usize, offset: usize, pass: u32 },
    End,
    Done,
}

struct State {
    phase: Phase,
    frames: Frames,
    banner: Banner,
    color: Rgb,
    mode: ScreenMode,
    delay: Duration,
    loops: Option<u32>,
}

/// Next frame index; wrapping past the last frame completes a pass.
fn advance(index: usize, len: usize, pass: u32) -> (usize, u32) {
    if index + 1 >= len {
        (0, pass.saturating_add(1))
    } else {
        (index + 1, pass)
    }
}

/// Byte stream of an animation: the screen start sequence, then frames
/// forever (or for `params.loops` full passes followed by the end sequence).
///
/// The banner offset advances by one per emitted frame and is never reset
/// between passes.
pub fn frame_stream(
    frames: Frames,
    banner: Banner,
    color: Rgb,
    params: &StreamParams,
) -> impl Stream<Item = Bytes> + Send + 'static {
    let state = State {
        phase: Phase::Start,
        frames,
        banner,
        color,
        mode: ScreenMode::from_alt(params.alt_screen),
        delay: Duration::try_from_secs_f64(params.delay_secs.max(0.0)).unwrap_or(Duration::MAX),
        loops: params.loops,
    };

    stream::unfold(state, |mut st| async move {
        loop {
            match st.phase {
                Phase::Start => {
                    st.phase = Phase::Frame {
                        index: 0,
                        offset: 0,
                        pass: 0,
                    };
                    let start = st.mode.start_sequence();
                    return Some((Bytes::from(start), st));
                }
                Phase::Frame {
                    index,
                    offset,
                    pass,
                } => {
                    // The delay after the previous frame, including the last one.
                    if offset > 0 {
                        tokio::time::sleep(st.delay).await;
                    }
                    if st.frames.is_empty() || st.loops.is_some_and(|n| pass >= n) {
                        st.phase = Phase::End;
                        continue;
                    }

                    let shifted = st.banner.shifted(offset);
                    let chunk = frame::chunk(&st.frames[index], &shifted, st.color);

                    let (index, pass) = advance(index, st.frames.len(), pass);
                    st.phase = Phase::Frame {
                        index,
                        offset: offset.wrapping_add(1),
                        pass,
                    };
                    return Some((Bytes::from(chunk), st));
                }
                Phase::End => {
                    st.phase = Phase::Done;
                    let end = st.mode.end_sequence();
                    return Some((Bytes::from(end), st));
                }
                Phase::Done => return None,
            }
        }
    })
}
