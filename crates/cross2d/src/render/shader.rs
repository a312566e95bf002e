use crate::device::{check_gl, Device, GlApi, ProgramId, ShaderId, ShaderStage};

/// A linked vertex + fragment program.
///
/// Construction never fails: a stage that does not compile, or a program that
/// does not link, yields an unavailable shader carrying the driver's
/// diagnostic. Availability is decided once, at construction.
pub struct Shader {
    name: String,
    device: Device,
    program: Option<ProgramId>,
    available: bool,
    diagnostic: Option<String>,
    vertex_source: String,
    fragment_source: String,
}

impl Shader {
    /// Compiles both stages and links them.
    ///
    /// Failures are logged and recorded in [`diagnostic`](Self::diagnostic).
    /// With an unavailable device no GL call is made.
    pub fn compile(device: &Device, name: impl Into<String>, vertex: &str, fragment: &str) -> Self {
        let mut shader = Self {
            name: name.into(),
            device: device.clone(),
            program: None,
            available: false,
            diagnostic: None,
            vertex_source: vertex.to_string(),
            fragment_source: fragment.to_string(),
        };

        let Some(gl) = device.gl() else {
            log::debug!("shader `{}`: GPU unavailable, not compiled", shader.name);
            shader.diagnostic = Some("GPU device unavailable".to_string());
            return shader;
        };

        match build_program(&*gl, vertex, fragment) {
            Ok(program) => {
                log::debug!("shader `{}`: linked program {}", shader.name, program.0);
                shader.program = Some(program);
                shader.available = true;
            }
            Err(diagnostic) => {
                log::error!("shader `{}`: {diagnostic}", shader.name);
                shader.diagnostic = Some(diagnostic);
            }
        }

        shader
    }

    /// An unavailable shader with no program and no sources.
    pub fn placeholder(device: &Device, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            device: device.clone(),
            program: None,
            available: false,
            diagnostic: None,
            vertex_source: String::new(),
            fragment_source: String::new(),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn is_available(&self) -> bool {
        self.available
    }

    #[inline]
    pub fn program(&self) -> Option<ProgramId> {
        self.program
    }

    /// Compiler or linker output when the shader is unavailable.
    pub fn diagnostic(&self) -> Option<&str> {
        self.diagnostic.as_deref()
    }

    pub fn vertex_source(&self) -> &str {
        &self.vertex_source
    }

    pub fn fragment_source(&self) -> &str {
        &self.fragment_source
    }

    /// Releases the program. Idempotent; no GL call for a shader that never
    /// linked or whose device is gone.
    pub fn destroy(&mut self) {
        self.available = false;
        let Some(program) = self.program.take() else {
            return;
        };
        if let Some(gl) = self.device.gl() {
            gl.delete_program(program);
            check_gl(&*gl, "Shader::destroy");
            log::debug!("shader `{}`: deleted program {}", self.name, program.0);
        }
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        self.destroy();
    }
}

impl std::fmt::Debug for Shader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shader")
            .field("name", &self.name)
            .field("program", &self.program)
            .field("available", &self.available)
            .field("diagnostic", &self.diagnostic)
            .finish()
    }
}

fn compile_stage(gl: &dyn GlApi, stage: ShaderStage, source: &str) -> Result<ShaderId, String> {
    let id = gl
        .create_shader(stage)
        .map_err(|e| format!("cannot create {} shader: {e}", stage.label()))?;

    if gl.compile_shader(id, source) {
        return Ok(id);
    }

    let log = gl.shader_info_log(id);
    gl.delete_shader(id);
    Err(format!("{} stage failed to compile: {}", stage.label(), or_no_log(&log)))
}

fn build_program(gl: &dyn GlApi, vertex: &str, fragment: &str) -> Result<ProgramId, String> {
    let vs = compile_stage(gl, ShaderStage::Vertex, vertex)?;
    let fs = match compile_stage(gl, ShaderStage::Fragment, fragment) {
        Ok(fs) => fs,
        Err(e) => {
            gl.delete_shader(vs);
            return Err(e);
        }
    };

    let program = match gl.create_program() {
        Ok(p) => p,
        Err(e) => {
            gl.delete_shader(vs);
            gl.delete_shader(fs);
            return Err(format!("cannot create program: {e}"));
        }
    };

    gl.attach_shader(program, vs);
    gl.attach_shader(program, fs);
    let linked = gl.link_program(program);

    // Stage objects are not needed after the link attempt.
    gl.detach_shader(program, vs);
    gl.detach_shader(program, fs);
    gl.delete_shader(vs);
    gl.delete_shader(fs);

    if !linked {
        let log = gl.program_info_log(program);
        gl.delete_program(program);
        return Err(format!("program failed to link: {}", or_no_log(&log)));
    }

    check_gl(gl, "Shader::link");
    Ok(program)
}

fn or_no_log(log: &str) -> &str {
    let trimmed = log.trim();
    if trimmed.is_empty() { "(no driver log)" } else { trimmed }
}
