use {
    cgmath::{ortho, Matrix4, Point3, SquareMatrix, Vector3},
    nalgebra::Point2,
    winit::event::{ElementState, VirtualKeyCode},
};

/// Width of the world the wall is laid out in; height follows the window's aspect ratio.
pub const FRAME_WIDTH: f32 = 1000.0;

pub const MIN_SCALE: f32 = 0.2;
pub const MAX_SCALE: f32 = 2.0;
const SCALE_STEP: f32 = 0.1;

/// Camera distance from the wall, far enough that receding disks stay in front of it.
const CAMERA_DISTANCE: f32 = 1000.0;

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    view_position: [f32; 4],
    view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new() -> Self {
        Self { view_position: [0.0; 4], view_proj: Matrix4::identity().into() }
    }

    pub fn update_view_proj(&mut self, camera: &Camera, projection: &Projection) {
        self.view_position = camera.position.to_homogeneous().into();
        self.view_proj = (projection.calc_matrix() * camera.calc_matrix()).into()
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

/// Looks straight down -Z at the wall.
#[derive(Debug)]
pub struct Camera {
    position: Point3<f32>,
}

impl Camera {
    pub fn new() -> Self {
        Self { position: Point3::new(0.0, 0.0, CAMERA_DISTANCE) }
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_to_rh(self.position, -Vector3::unit_z(), Vector3::unit_y())
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

/// Orthographic view of the frame, zoomed by `scale`.
#[derive(Debug)]
pub struct Projection {
    width: u32,
    height: u32,
    scale: f32,
}

impl Projection {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width: width.max(1), height: height.max(1), scale: 1.0 }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width.max(1);
        self.height = height.max(1);
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale.clamp(MIN_SCALE, MAX_SCALE);
    }

    /// Half the visible width and height, in world units.
    fn half_extent(&self) -> (f32, f32) {
        let half_width = FRAME_WIDTH * self.scale / 2.0;
        let aspect = self.width as f32 / self.height as f32;
        (half_width, half_width / aspect)
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        let (w, h) = self.half_extent();
        OPENGL_TO_WGPU_MATRIX * ortho(-w, w, -h, h, 1.0, CAMERA_DISTANCE * 2.0)
    }

    /// Maps a window position (pixels, origin top left) onto the wall.
    pub fn screen_to_world(&self, x: f64, y: f64) -> Point2<f32> {
        let (w, h) = self.half_extent();
        let fx = x as f32 / self.width as f32;
        let fy = y as f32 / self.height as f32;
        Point2::new((fx * 2.0 - 1.0) * w, (1.0 - fy * 2.0) * h)
    }
}

#[derive(Debug, Default)]
pub struct CameraController {
    scale_delta: f32,
}

impl CameraController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn process_keyboard(&mut self, key: VirtualKeyCode, state: ElementState) -> bool {
        if state != ElementState::Pressed {
            return false;
        }
        match key {
            VirtualKeyCode::Left => {
                self.scale_delta -= SCALE_STEP;
                true
            }
            VirtualKeyCode::Right => {
                self.scale_delta += SCALE_STEP;
                true
            }
            _ => false,
        }
    }

    pub fn update_projection(&mut self, projection: &mut Projection) {
        if self.scale_delta != 0.0 {
            projection.set_scale(projection.scale() + self.scale_delta);
            self.scale_delta = 0.0;
        }
    }
}
