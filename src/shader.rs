use std::rc::Rc;

use anyhow::bail;
use glow::HasContext;

use crate::resource::{ShaderObject, ShaderProgram};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
    Link,
}
impl ShaderStage {
    fn header(&self) -> &'static str {
        match self {
            Self::Vertex => "Vertex Shader",
            Self::Fragment => "Fragment Shader",
            Self::Link => "Compile",
        }
    }

    fn done(&self) -> &'static str {
        match self {
            Self::Vertex => "Vertex done",
            Self::Fragment => "Fragment done",
            Self::Link => "Compile done",
        }
    }

    fn shader_type(&self) -> Option<u32> {
        match self {
            Self::Vertex => Some(glow::VERTEX_SHADER),
            Self::Fragment => Some(glow::FRAGMENT_SHADER),
            Self::Link => None,
        }
    }
}

/// What one compile or link step has to say.
///
/// Any non-empty info log is reported, whether or not the step succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageReport {
    Done(ShaderStage),
    Diagnostics {
        stage: ShaderStage,
        success: bool,
        log: String,
    },
}
impl StageReport {
    pub fn new(stage: ShaderStage, success: bool, log: &str) -> Self {
        let log = log.trim_end_matches(|c: char| c == '\0' || c.is_whitespace());
        if log.is_empty() {
            return Self::Done(stage);
        }
        Self::Diagnostics {
            stage,
            success,
            log: log.to_string(),
        }
    }

    pub fn emit(&self) {
        match self {
            Self::Done(_) => tracing::info!("{self}"),
            Self::Diagnostics { success: true, .. } => tracing::warn!("{self}"),
            Self::Diagnostics { success: false, .. } => tracing::error!("{self}"),
        }
    }
}
impl core::fmt::Display for StageReport {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Done(stage) => write!(f, "{}", stage.done()),
            Self::Diagnostics { stage, log, .. } => write!(f, "{}\n{log}", stage.header()),
        }
    }
}

/// Compiles both stages and links them into a program.
///
/// Compile failures are reported and fall through to the link, which then fails. Only a failed
/// link deletes the program and returns an error. The shader objects are deleted on every path.
pub fn load_shaders(
    gl: &Rc<glow::Context>,
    vertex_source: &str,
    fragment_source: &str,
) -> anyhow::Result<ShaderProgram> {
    let vertex = compile(gl, ShaderStage::Vertex, vertex_source)?;
    let fragment = compile(gl, ShaderStage::Fragment, fragment_source)?;

    let program = ShaderProgram::new(gl)?;
    let (success, log) = unsafe {
        gl.attach_shader(program.name(), vertex.name());
        gl.attach_shader(program.name(), fragment.name());
        gl.link_program(program.name());
        let success = gl.get_program_link_status(program.name());
        let log = gl.get_program_info_log(program.name());
        gl.detach_shader(program.name(), vertex.name());
        gl.detach_shader(program.name(), fragment.name());
        (success, log)
    };
    let report = StageReport::new(ShaderStage::Link, success, &log);
    report.emit();
    if !success {
        bail!("failed to link shader program: {}", log.trim());
    }
    Ok(program)
}

fn compile(gl: &Rc<glow::Context>, stage: ShaderStage, source: &str) -> anyhow::Result<ShaderObject> {
    let Some(shader_type) = stage.shader_type() else {
        bail!("{stage:?} is not a compile stage");
    };
    let shader = ShaderObject::new(gl, shader_type)?;
    let (success, log) = unsafe {
        gl.shader_source(shader.name(), source);
        gl.compile_shader(shader.name());
        let success = gl.get_shader_compile_status(shader.name());
        let log = gl.get_shader_info_log(shader.name());
        (success, log)
    };
    StageReport::new(stage, success, &log).emit();
    Ok(shader)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_logs_are_done() {
        let cases = [
            (ShaderStage::Vertex, "Vertex done"),
            (ShaderStage::Fragment, "Fragment done"),
            (ShaderStage::Link, "Compile done"),
        ];
        for (stage, expected) in cases {
            let report = StageReport::new(stage, true, "");
            assert_eq!(report, StageReport::Done(stage));
            assert_eq!(report.to_string(), expected);
        }
    }

    #[test]
    fn test_trailing_nul_is_empty() {
        let report = StageReport::new(ShaderStage::Vertex, true, "\0");
        assert_eq!(report, StageReport::Done(ShaderStage::Vertex));
    }

    #[test]
    fn test_log_reported_on_success() {
        let report = StageReport::new(ShaderStage::Fragment, true, "warning: unused\n");
        assert_eq!(
            report,
            StageReport::Diagnostics {
                stage: ShaderStage::Fragment,
                success: true,
                log: "warning: unused".to_string(),
            }
        );
        assert_eq!(report.to_string(), "Fragment Shader\nwarning: unused");
    }

    #[test]
    fn test_log_reported_on_failure() {
        let log = "ERROR: 0:3: 'vec5' : undeclared identifier";
        let report = StageReport::new(ShaderStage::Vertex, false, log);
        assert_eq!(report.to_string(), format!("Vertex Shader\n{log}"));

        let report = StageReport::new(ShaderStage::Link, false, "link failed");
        assert_eq!(report.to_string(), "Compile\nlink failed");
    }

    #[test]
    fn test_shader_types() {
        assert_eq!(ShaderStage::Vertex.shader_type(), Some(glow::VERTEX_SHADER));
        assert_eq!(ShaderStage::Fragment.shader_type(), Some(glow::FRAGMENT_SHADER));
        assert_eq!(ShaderStage::Link.shader_type(), None);
    }
}
