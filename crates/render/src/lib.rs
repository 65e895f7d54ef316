pub mod ansi;
pub mod banner;
pub mod frame;
pub mod frames;
pub mod markup;
pub mod stream;

pub use ansi::ScreenMode;
pub use banner::Banner;
pub use frame::{chunk, compose};
pub use frames::{FrameStore, Frames};
pub use markup::to_ansi;
pub use stream::frame_stream;
