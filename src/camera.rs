use glam::{Mat4, Vec3};

use crate::input::{Action, InputSource};

pub const MAX_PITCH: f32 = 89.0;

#[derive(Debug, Clone)]
pub struct CameraConfig {
    /// world units per second
    pub move_speed: f32,
    /// degrees per cursor unit
    pub cursor_sensitivity: f32,
    /// max absolute pitch in degrees, capped at [`MAX_PITCH`] so `front` never meets `world_up`
    pub pitch_limit: f32,
    /// vertical field of view in degrees
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            cursor_sensitivity: 0.05,
            pitch_limit: MAX_PITCH,
            fov_y: 60.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

/// First person camera driven by held actions and cursor motion.
///
/// `front`, `up` and `right` are always derived from `pitch`, `yaw` and
/// `world_up`, and form an orthonormal basis where `(right, up, -front)` is
/// right handed. Pitch saturates at the configured limit, yaw wraps into `[0, 360)`.
#[derive(Debug, Clone)]
pub struct FpsCamera {
    position: Vec3,
    front: Vec3,
    up: Vec3,
    right: Vec3,
    world_up: Vec3,
    pitch: f32,
    yaw: f32,
    config: CameraConfig,
}

impl FpsCamera {
    /// Angles are in degrees. Yaw is measured from +x in the x-z plane.
    pub fn new(position: Vec3, world_up: Vec3, yaw: f32, pitch: f32, config: &CameraConfig) -> Self {
        let mut config = config.clone();
        config.pitch_limit = sanitize_pitch_limit(config.pitch_limit);
        let mut camera = Self {
            position,
            front: Vec3::NEG_Z,
            up: Vec3::Y,
            right: Vec3::X,
            world_up: world_up.normalize(),
            pitch: pitch.clamp(-config.pitch_limit, config.pitch_limit),
            yaw: wrap_degrees(yaw),
            config,
        };
        camera.update_vectors();
        camera
    }

    /// Advances one tick. Expects `input` to be checkpointed already.
    pub fn update(&mut self, input: &impl InputSource, dt: f32) {
        self.update_position(input, dt);
        let delta = input.cursor_delta().as_vec2();
        self.update_orientation(delta.x, delta.y);
    }

    fn update_position(&mut self, input: &impl InputSource, dt: f32) {
        let step = self.config.move_speed * dt;
        for action in Action::ALL {
            if !input.is_active(action) {
                continue;
            }
            match action {
                Action::MoveForward => self.position += self.front * step,
                Action::MoveBackward => self.position -= self.front * step,
                Action::StrafeLeft => self.position -= self.front.cross(self.up).normalize() * step,
                Action::StrafeRight => self.position += self.front.cross(self.up).normalize() * step,
                Action::Quit => {}
            }
        }
    }

    fn update_orientation(&mut self, dx: f32, dy: f32) {
        let sens = self.config.cursor_sensitivity;
        // screen y grows downwards, pitch grows upwards
        self.pitch = (self.pitch - dy * sens).clamp(-self.config.pitch_limit, self.config.pitch_limit);
        self.yaw = wrap_degrees(self.yaw + dx * sens);
        self.update_vectors();
    }

    fn update_vectors(&mut self) {
        let (pitch_sin, pitch_cos) = self.pitch.to_radians().sin_cos();
        let (yaw_sin, yaw_cos) = self.yaw.to_radians().sin_cos();
        self.front = Vec3::new(pitch_cos * yaw_cos, pitch_sin, pitch_cos * yaw_sin).normalize();
        // re-derived every time so drift never accumulates
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }

    /// World to view transform, right handed, column major.
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(
            self.config.fov_y.to_radians(),
            aspect,
            self.config.near,
            self.config.far,
        )
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn world_up(&self) -> Vec3 {
        self.world_up
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }
}

fn sanitize_pitch_limit(limit: f32) -> f32 {
    let sane = if limit.is_nan() { MAX_PITCH } else { limit.abs().min(MAX_PITCH) };
    if sane != limit {
        crate::warn!("pitch limit {limit} out of range, using {sane}");
    }
    sane
}

fn wrap_degrees(deg: f32) -> f32 {
    let wrapped = deg.rem_euclid(360.0);
    // tiny negatives round up to exactly 360
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}
