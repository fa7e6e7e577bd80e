use std::rc::Rc;

use anyhow::Context;
use glutin::{
    context::PossiblyCurrentContext,
    display::GetGlDisplay,
    prelude::*,
    surface::{Surface, WindowSurface},
};

use crate::{
    config::{WndConfig, WndSize},
    gpu,
};

/// Fatal setup steps, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupStage {
    EventLoop,
    Window,
    Context,
    Resources,
}
impl core::fmt::Display for SetupStage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let stage = match self {
            Self::EventLoop => "event loop init",
            Self::Window => "window creation",
            Self::Context => "GL context creation",
            Self::Resources => "GL resource setup",
        };
        f.write_str(stage)
    }
}

/// Field order is teardown order: GL objects, then the context, then the window.
#[derive(Debug)]
pub struct View {
    draw: Box<dyn Draw>,
    gl: Rc<glow::Context>,
    context: PossiblyCurrentContext,
    surface: Surface<WindowSurface>,
    window: winit::window::Window,
}
impl View {
    pub fn new(
        event_loop: &winit::event_loop::ActiveEventLoop,
        config: &WndConfig,
        mut draw: Box<dyn Draw>,
    ) -> anyhow::Result<Self> {
        let (window, gl_config) =
            gpu::window(event_loop, config).context(SetupStage::Window)?;
        let (context, surface) =
            gpu::context(&window, &gl_config, config).context(SetupStage::Context)?;
        let gl = Rc::new(gpu::load_gl(&gl_config.display(), config.gl_version));
        let args = InitArgs {
            gl: &gl,
            wnd_size: config.size,
        };
        draw.init(args).context(SetupStage::Resources)?;
        tracing::info!(title = %config.title, "window ready");
        Ok(Self {
            draw,
            gl,
            context,
            surface,
            window,
        })
    }

    /// Draws one frame and presents it.
    pub fn draw(&mut self) -> anyhow::Result<()> {
        let args = DrawArgs { gl: &self.gl };
        self.draw.draw(args);
        self.surface.swap_buffers(&self.context)?;
        Ok(())
    }
}
impl Drop for View {
    fn drop(&mut self) {
        tracing::info!(window = ?self.window.id(), "teardown");
    }
}

#[derive(Debug)]
pub struct InitArgs<'a> {
    pub gl: &'a Rc<glow::Context>,
    pub wnd_size: WndSize,
}

#[derive(Debug)]
pub struct DrawArgs<'a> {
    pub gl: &'a glow::Context,
}

pub trait Draw: core::fmt::Debug {
    fn init(&mut self, args: InitArgs<'_>) -> anyhow::Result<()>;
    fn draw(&mut self, args: DrawArgs<'_>);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_error_carries_platform_text() {
        let stages = [
            SetupStage::EventLoop,
            SetupStage::Window,
            SetupStage::Context,
        ];
        for stage in stages {
            let platform = std::io::Error::other("No available video device");
            let e = anyhow::Error::new(platform).context(stage);
            let message = format!("{e:#}");
            assert!(message.starts_with(&stage.to_string()), "{message}");
            assert!(message.contains("No available video device"), "{message}");
        }
    }
}
