use glam::{Mat4, Vec2, Vec3};

use crate::input::{Direction, HeldKeys};

/// Distance moved per tick for each held direction.
pub const MOVE_STEP: f32 = 1.0 / 100.0;

/// Degrees of rotation per pixel of mouse movement.
const LOOK_SENSITIVITY: f32 = 1.0 / 5.0;

/// Pitch is clamped to straight up and straight down.
const PITCH_LIMIT: f32 = 90.0;

/// The camera height above the ground plane.
const EYE_HEIGHT: f32 = 3.0;

/// A first person camera walking on the ground plane. Yaw comes from horizontal mouse movement
/// and is left to wrap, pitch comes from vertical mouse movement and is clamped.
#[derive(Clone, Debug, Default)]
pub struct CameraState {
    /// Position on the ground plane, `x` and `z` in world space.
    pub position: Vec2,

    /// Yaw in degrees.
    pub yaw: f32,

    /// Pitch in degrees, always within [-90, 90].
    pub pitch: f32,

    /// The point mouse deltas are measured from, if a drag is in progress.
    last_mouse_pos: Option<Vec2>,

    held: HeldKeys,
}

impl CameraState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn held(&self) -> HeldKeys {
        self.held
    }

    pub fn on_key_down(&mut self, direction: Direction) {
        self.held.set(direction, true);
    }

    pub fn on_key_up(&mut self, direction: Direction) {
        self.held.set(direction, false);
    }

    /// Start measuring mouse movement from `pos`.
    pub fn on_mouse_down(&mut self, pos: Vec2) {
        self.last_mouse_pos = Some(pos);
    }

    /// Stop measuring mouse movement until the next `on_mouse_down`.
    pub fn on_mouse_up(&mut self) {
        self.last_mouse_pos = None;
    }

    /// Turn the camera by the distance the mouse moved since the last observed position.
    pub fn on_mouse_move(&mut self, pos: Vec2) {
        let Some(last) = self.last_mouse_pos else {
            return;
        };

        let delta = pos - last;
        self.yaw += delta.x * -LOOK_SENSITIVITY;
        self.pitch = (self.pitch + delta.y * LOOK_SENSITIVITY).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.last_mouse_pos = Some(pos);
    }

    /// Move one step along every held direction. Directions add up, so moving diagonally is
    /// faster than moving straight.
    pub fn tick(&mut self) {
        let yaw = self.yaw.to_radians();
        let (sin, cos) = (yaw.sin(), yaw.cos());

        if self.held.forward {
            self.position += Vec2::new(sin, cos) * MOVE_STEP;
        }
        if self.held.back {
            self.position += Vec2::new(-sin, -cos) * MOVE_STEP;
        }
        if self.held.left {
            self.position += Vec2::new(-cos, sin) * MOVE_STEP;
        }
        if self.held.right {
            self.position += Vec2::new(cos, -sin) * MOVE_STEP;
        }
    }

    /// The camera transform: translate to the eye, then yaw around Y, then pitch around X.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(self.position.x, EYE_HEIGHT, self.position.y))
            * Mat4::from_rotation_y(self.yaw.to_radians())
            * Mat4::from_rotation_x(self.pitch.to_radians())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::quickcheck;

    const EPSILON: f32 = 1e-4;

    #[test]
    fn mouse_move_without_reference_point_is_ignored() {
        let mut camera = CameraState::new();
        camera.on_mouse_move(Vec2::new(100.0, 100.0));
        assert_eq!(camera.yaw, 0.0);
        assert_eq!(camera.pitch, 0.0);

        camera.on_mouse_down(Vec2::new(0.0, 0.0));
        camera.on_mouse_up();
        camera.on_mouse_move(Vec2::new(100.0, 100.0));
        assert_eq!(camera.yaw, 0.0);
        assert_eq!(camera.pitch, 0.0);
    }

    #[test]
    fn mouse_down_does_not_rotate() {
        let mut camera = CameraState::new();
        camera.on_mouse_down(Vec2::new(40.0, 70.0));
        assert_eq!(camera.yaw, 0.0);
        assert_eq!(camera.pitch, 0.0);
        assert_eq!(camera.position, Vec2::ZERO);
    }

    #[test]
    fn mouse_drag_turns_by_a_fifth_of_a_degree_per_pixel() {
        let mut camera = CameraState::new();
        camera.on_mouse_down(Vec2::new(10.0, 10.0));
        camera.on_mouse_move(Vec2::new(20.0, 15.0));
        assert!((camera.yaw - -2.0).abs() < EPSILON);
        assert!((camera.pitch - 1.0).abs() < EPSILON);

        // Deltas are measured from the last move, not from the press.
        camera.on_mouse_move(Vec2::new(25.0, 15.0));
        assert!((camera.yaw - -3.0).abs() < EPSILON);
    }

    #[test]
    fn pitch_clamps_exactly_to_the_bound() {
        let mut camera = CameraState::new();
        camera.on_mouse_down(Vec2::ZERO);
        camera.on_mouse_move(Vec2::new(0.0, 10_000.0));
        assert_eq!(camera.pitch, 90.0);

        camera.on_mouse_move(Vec2::new(0.0, -10_000.0));
        assert_eq!(camera.pitch, -90.0);
    }

    #[test]
    fn yaw_is_not_clamped() {
        let mut camera = CameraState::new();
        camera.on_mouse_down(Vec2::ZERO);
        camera.on_mouse_move(Vec2::new(-5000.0, 0.0));
        assert!((camera.yaw - 1000.0).abs() < EPSILON);
    }

    #[test]
    fn held_directions_add_up() {
        let mut camera = CameraState::new();
        camera.on_key_down(Direction::Forward);
        camera.on_key_down(Direction::Right);
        camera.tick();

        // Facing +z with yaw 0: forward is (0, 1), right is (1, 0).
        assert!((camera.position - Vec2::new(MOVE_STEP, MOVE_STEP)).length() < EPSILON);
        assert!(camera.position.length() > MOVE_STEP);
    }

    #[test]
    fn opposite_directions_cancel() {
        let mut camera = CameraState::new();
        camera.on_key_down(Direction::Left);
        camera.on_key_down(Direction::Right);
        camera.on_key_down(Direction::Forward);
        camera.on_key_down(Direction::Back);
        camera.tick();
        assert!(camera.position.length() < EPSILON);
    }

    #[test]
    fn released_keys_stop_movement() {
        let mut camera = CameraState::new();
        camera.on_key_down(Direction::Back);
        camera.tick();
        camera.on_key_up(Direction::Back);
        camera.tick();
        assert!((camera.position - Vec2::new(0.0, -MOVE_STEP)).length() < EPSILON);
        assert_eq!(camera.held(), HeldKeys::default());
    }

    #[test]
    fn view_matrix_places_eye_above_position() {
        let mut camera = CameraState::new();
        camera.position = Vec2::new(2.0, -4.0);
        camera.yaw = 37.0;
        camera.pitch = -20.0;

        let eye = camera.view_matrix().transform_point3(Vec3::ZERO);
        assert!((eye - Vec3::new(2.0, 3.0, -4.0)).length() < EPSILON);
    }

    #[test]
    fn view_matrix_applies_yaw_before_pitch() {
        let mut camera = CameraState::new();
        camera.yaw = 90.0;
        camera.pitch = 30.0;

        let expected = Mat4::from_translation(Vec3::new(0.0, 3.0, 0.0))
            * Mat4::from_rotation_y(90f32.to_radians())
            * Mat4::from_rotation_x(30f32.to_radians());
        assert!(camera.view_matrix().abs_diff_eq(expected, EPSILON));
    }

    quickcheck! {
        fn pitch_stays_within_bounds(moves: Vec<(i16, i16)>) -> bool {
            let mut camera = CameraState::new();
            camera.on_mouse_down(Vec2::ZERO);

            moves.iter().all(|&(x, y)| {
                camera.on_mouse_move(Vec2::new(x as f32, y as f32));
                (-90.0..=90.0).contains(&camera.pitch)
            })
        }

        fn forward_moves_n_steps_along_yaw(ticks: u8, yaw: i16, pitch_moves: Vec<i16>) -> bool {
            let mut camera = CameraState::new();
            camera.yaw = yaw as f32;

            camera.on_key_down(Direction::Forward);
            camera.on_mouse_down(Vec2::ZERO);
            for i in 0..ticks {
                // Pitch changes alone must not affect where we walk.
                if let Some(&dy) = pitch_moves.get(i as usize) {
                    camera.on_mouse_move(Vec2::new(0.0, dy as f32));
                }
                camera.tick();
            }
            camera.on_key_up(Direction::Forward);
            camera.tick();

            let radians = (yaw as f32).to_radians();
            let expected = Vec2::new(radians.sin(), radians.cos()) * MOVE_STEP * ticks as f32;
            (camera.position - expected).length() < 1e-3
        }
    }
}
