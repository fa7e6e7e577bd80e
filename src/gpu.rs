use anyhow::{anyhow, Context};
use glow::HasContext;
use glutin::{
    config::{Config, ConfigTemplateBuilder},
    context::{
        ContextApi, ContextAttributes, ContextAttributesBuilder, PossiblyCurrentContext, Version,
    },
    display::{Display, GetGlDisplay},
    prelude::*,
    surface::{Surface, WindowSurface},
};
use glutin_winit::{DisplayBuilder, GlWindow};
use winit::{
    event_loop::ActiveEventLoop,
    raw_window_handle::{HasWindowHandle, RawWindowHandle},
    window::Window,
};

use crate::config::WndConfig;

/// window with an OpenGL-renderable surface config
pub fn window(event_loop: &ActiveEventLoop, config: &WndConfig) -> anyhow::Result<(Window, Config)> {
    let template = ConfigTemplateBuilder::new();
    let display_builder =
        DisplayBuilder::new().with_window_attributes(Some(config.window_attributes()));
    let (window, gl_config) = display_builder
        .build(event_loop, template, gl_config_picker)
        .map_err(|e| anyhow!("{e}"))?;
    let window = window.context("display builder returned no window")?;
    Ok((window, gl_config))
}

pub fn gl_config_picker(configs: Box<dyn Iterator<Item = Config> + '_>) -> Config {
    configs
        .reduce(|accum, config| {
            if config.num_samples() > accum.num_samples() {
                config
            } else {
                accum
            }
        })
        .expect("display offered no framebuffer config")
}

pub fn context_attributes(
    config: &WndConfig,
    raw_window_handle: Option<RawWindowHandle>,
) -> ContextAttributes {
    ContextAttributesBuilder::new()
        .with_profile(config.gl_profile)
        .with_context_api(ContextApi::OpenGl(Some(config.gl_version)))
        .build(raw_window_handle)
}

/// Creates the context at the configured version and makes it current on the window surface.
pub fn context(
    window: &Window,
    gl_config: &Config,
    config: &WndConfig,
) -> anyhow::Result<(PossiblyCurrentContext, Surface<WindowSurface>)> {
    let raw_window_handle = window.window_handle().ok().map(|handle| handle.as_raw());
    let attributes = context_attributes(config, raw_window_handle);
    let display = gl_config.display();
    let context = unsafe { display.create_context(gl_config, &attributes) }?;
    let attributes = window.build_surface_attributes(Default::default())?;
    let surface = unsafe { display.create_window_surface(gl_config, &attributes) }?;
    let context = context.make_current(&surface)?;
    Ok((context, surface))
}

/// Resolves GL entry points through the display and reports what the driver loaded.
pub fn load_gl(display: &Display, requested: Version) -> glow::Context {
    let gl = unsafe {
        glow::Context::from_loader_function_cstr(|symbol| display.get_proc_address(symbol))
    };
    let reported = unsafe { gl.get_parameter_string(glow::VERSION) };
    tracing::info!("GL Version {reported}");
    let loaded = (gl.version().major, gl.version().minor);
    if let Some(warning) = loader_warning(&reported, loaded, requested) {
        tracing::warn!("{warning}");
    }
    gl
}

fn loader_warning(reported: &str, loaded: (u32, u32), requested: Version) -> Option<String> {
    if reported.trim().is_empty() {
        return Some("GL loader reported no version string".to_string());
    }
    let requested_pair = (u32::from(requested.major), u32::from(requested.minor));
    if loaded < requested_pair {
        return Some(format!(
            "GL loader resolved {}.{}, below the requested {}.{}",
            loaded.0, loaded.1, requested.major, requested.minor
        ));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loader_ok() {
        let warning = loader_warning("4.1 Metal - 88", (4, 1), Version::new(4, 1));
        assert_eq!(warning, None);
        let warning = loader_warning("4.6.0 NVIDIA 550.54", (4, 6), Version::new(4, 1));
        assert_eq!(warning, None);
    }

    #[test]
    fn test_loader_missing_version() {
        let warning = loader_warning("", (0, 0), Version::new(4, 1));
        assert!(warning.unwrap().contains("no version string"));
    }

    #[test]
    fn test_loader_old_version() {
        let warning = loader_warning("3.3 Mesa", (3, 3), Version::new(4, 1)).unwrap();
        assert!(warning.contains("3.3"));
        assert!(warning.contains("4.1"));
    }
}
