use glam::{Mat4, Vec3};

pub const DEFAULT_FOV_Y: f32 = 75.0 * std::f32::consts::PI / 180.0;
pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 100.0;

const ROTATE_SPEED: f32 = 0.005;
const PAN_SPEED: f32 = 0.0015;
const ZOOM_SPEED: f32 = 0.1;
const DAMPING: f32 = 12.0;
const MIN_RADIUS: f32 = 0.2;

// Keep pitch off the poles so the look-at up vector stays valid.
const PITCH_EPSILON: f32 = 0.01;

/// Damped orbit camera: rotates, zooms, and pans around a target point.
///
/// Pointer input moves the *desired* spherical coordinates; `update`
/// eases the actual coordinates toward them every frame.
pub struct OrbitCamera {
    target: Vec3,
    yaw: f32,
    pitch: f32,
    radius: f32,

    desired_target: Vec3,
    desired_yaw: f32,
    desired_pitch: f32,
    desired_radius: f32,

    aspect: f32,
    fov_y: f32,
    pitch_min: f32,
    pitch_max: f32,
}

impl OrbitCamera {
    /// Build an orbit camera looking from `eye` at `target`.
    pub fn from_eye(eye: Vec3, target: Vec3) -> Self {
        let offset = eye - target;
        let radius = offset.length().max(MIN_RADIUS);
        let yaw = offset.x.atan2(offset.z);
        let pitch = (offset.y / radius).clamp(-1.0, 1.0).asin();

        Self {
            target,
            yaw,
            pitch,
            radius,
            desired_target: target,
            desired_yaw: yaw,
            desired_pitch: pitch,
            desired_radius: radius,
            aspect: 1.0,
            fov_y: DEFAULT_FOV_Y,
            pitch_min: -std::f32::consts::FRAC_PI_2 + PITCH_EPSILON,
            pitch_max: std::f32::consts::FRAC_PI_2 - PITCH_EPSILON,
        }
    }

    /// Restrict the polar angle, measured from +Y. `min_polar` = closest
    /// to straight overhead.
    pub fn set_polar_limits(&mut self, min_polar: f32, max_polar: f32) {
        // polar angle from +Y -> elevation from the horizontal plane
        self.pitch_min = std::f32::consts::FRAC_PI_2 - max_polar;
        self.pitch_max = std::f32::consts::FRAC_PI_2 - min_polar;
        self.desired_pitch = self.desired_pitch.clamp(self.pitch_min, self.pitch_max);
        self.pitch = self.pitch.clamp(self.pitch_min, self.pitch_max);
    }

    pub fn set_aspect(&mut self, width: f32, height: f32) {
        if height > 0.0 {
            self.aspect = width / height;
        }
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Left-drag: rotate around the target.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.desired_yaw -= dx * ROTATE_SPEED;
        self.desired_pitch =
            (self.desired_pitch + dy * ROTATE_SPEED).clamp(self.pitch_min, self.pitch_max);
    }

    /// Scroll: move toward/away from the target.
    pub fn zoom(&mut self, scroll: f32) {
        self.desired_radius =
            (self.desired_radius * (1.0 - scroll * ZOOM_SPEED)).clamp(MIN_RADIUS, FAR_PLANE);
    }

    /// Right-drag: translate the target in the view plane.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        let right = self.right();
        let up = right.cross(self.forward()).normalize();
        let scale = self.desired_radius * PAN_SPEED;
        self.desired_target += right * (-dx * scale) + up * (dy * scale);
    }

    /// Ease actual coordinates toward desired ones (damping).
    pub fn update(&mut self, delta: f32) {
        let k = 1.0 - (-DAMPING * delta.max(0.0)).exp();
        self.yaw += (self.desired_yaw - self.yaw) * k;
        self.pitch += (self.desired_pitch - self.pitch) * k;
        self.radius += (self.desired_radius - self.radius) * k;
        self.target += (self.desired_target - self.target) * k;
    }

    pub fn position(&self) -> Vec3 {
        let dir = Vec3::new(
            self.yaw.sin() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.cos() * self.pitch.cos(),
        );
        self.target + dir * self.radius
    }

    fn forward(&self) -> Vec3 {
        (self.target - self.position()).normalize()
    }

    fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize()
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, NEAR_PLANE, FAR_PLANE)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    #[cfg(test)]
    pub(crate) fn pitch(&self) -> f32 {
        self.pitch
    }

    #[cfg(test)]
    pub(crate) fn radius(&self) -> f32 {
        self.radius
    }
}
