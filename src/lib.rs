pub mod prelude;

pub mod camera;
pub mod engine;
pub mod input;
pub mod util;

pub use camera::{CameraConfig, FpsCamera};
pub use engine::{App, AppContext, Engine, EngineConfig};
pub use input::{Action, Bindings, InputSource, InputState, SharedInput};
