pub mod print;

mod clock;

pub use clock::FrameClock;
