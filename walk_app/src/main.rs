use fpscam::{info, prelude::*, util::print::Level};

struct Walk {
    camera: FpsCamera,
    view_proj: Mat4,
    last_report: f32,
}

impl App for Walk {
    fn new(context: &mut AppContext) -> Self {
        let camera = FpsCamera::new(Vec3::new(0.0, 0.0, 3.0), Vec3::Y, -90.0, 0.0, &context.camera);
        info!("WASD to move, mouse to look, Esc to quit");
        Self {
            view_proj: camera.projection(context.aspect()) * camera.view(),
            camera,
            last_report: 0.0,
        }
    }

    fn update(&mut self, context: &mut AppContext) {
        self.camera.update(&context.input, context.clock.dt());
        self.view_proj = self.camera.projection(context.aspect()) * self.camera.view();

        let time = context.clock.time();
        if time - self.last_report < 1.0 {
            return;
        }
        self.last_report = time;
        let pos = self.camera.position();
        let title = format!(
            "walk | pos ({:.2}, {:.2}, {:.2}) yaw {:.1} pitch {:.1} | {:.0} fps",
            pos.x,
            pos.y,
            pos.z,
            self.camera.yaw(),
            self.camera.pitch(),
            context.clock.fps()
        );
        if let Some(window) = context.window() {
            window.set_title(&title);
        }
        // per second pose dumps only clutter the console
        fpscam::log_sink!(
            "rotating_file",
            Level::Trace,
            "{title}\n{}",
            self.view_proj
        );
    }
}

fn main() -> ResultAny {
    Engine::<Walk>::run(EngineConfig::default())
}
