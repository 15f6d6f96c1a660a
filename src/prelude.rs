pub use crate::{
    camera::{CameraConfig, FpsCamera},
    engine::{App, AppContext, Engine, EngineConfig, WindowConfig},
    input::{Action, Bindings, InputSnapshot, InputSource, InputState, Key, SharedInput},
    util::FrameClock,
};
pub use glam::{DVec2, Mat4, Vec3};

pub type ResultAny<T = ()> = Result<T, Box<dyn std::error::Error>>;
