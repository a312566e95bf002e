use super::gl::GlApi;

/// Upper bound on codes drained per check; a lost context can report forever.
const MAX_DRAINED: usize = 16;

/// Drains the GL error queue after the call made at `site`.
///
/// Each pending code is logged by name. Returns `true` when the queue was
/// clean. Never panics; callers decide whether a dirty site matters.
pub fn check_gl(gl: &dyn GlApi, site: &str) -> bool {
    let mut clean = true;

    for _ in 0..MAX_DRAINED {
        let code = gl.get_error();
        if code == glow::NO_ERROR {
            return clean;
        }
        clean = false;
        log::error!("{site}: {} (0x{code:04x})", gl_error_name(code));
    }

    clean
}

/// Symbolic name of a `glGetError` code.
pub fn gl_error_name(code: u32) -> &'static str {
    match code {
        glow::NO_ERROR => "GL_NO_ERROR",
        glow::INVALID_ENUM => "GL_INVALID_ENUM",
        glow::INVALID_VALUE => "GL_INVALID_VALUE",
        glow::INVALID_OPERATION => "GL_INVALID_OPERATION",
        glow::INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
        glow::OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
        glow::STACK_UNDERFLOW => "GL_STACK_UNDERFLOW",
        glow::STACK_OVERFLOW => "GL_STACK_OVERFLOW",
        _ => "unknown GL error",
    }
}
