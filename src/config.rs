use glutin::context::{GlProfile, Version};

pub const SETUP_CLEAR_COLOR: ClearColor = ClearColor::new(0.3, 0.2, 0.3, 1.0);
pub const FRAME_CLEAR_COLOR: ClearColor = ClearColor::new(0.0, 0.0, 1.0, 1.0);

#[derive(Debug, Clone)]
pub struct WndConfig {
    pub title: String,
    pub position: WndPosition,
    pub size: WndSize,
    pub gl_version: Version,
    pub gl_profile: GlProfile,
}
impl WndConfig {
    pub fn new() -> Self {
        Self {
            title: "Hello World!".to_string(),
            position: WndPosition { x: 0, y: 0 },
            size: WndSize {
                width: 640,
                height: 480,
            },
            gl_version: Version::new(4, 1),
            gl_profile: GlProfile::Core,
        }
    }

    pub fn window_attributes(&self) -> winit::window::WindowAttributes {
        let size = winit::dpi::PhysicalSize::new(self.size.width, self.size.height);
        let position = winit::dpi::PhysicalPosition::new(self.position.x, self.position.y);
        winit::window::Window::default_attributes()
            .with_title(self.title.clone())
            .with_position(position)
            .with_inner_size(size)
            .with_resizable(false)
    }
}
impl Default for WndConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WndPosition {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WndSize {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClearColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}
impl ClearColor {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// # Safety
    ///
    /// `gl` must be current on this thread.
    pub unsafe fn apply(&self, gl: &glow::Context) {
        use glow::HasContext;
        gl.clear_color(self.r, self.g, self.b, self.a);
    }
}
