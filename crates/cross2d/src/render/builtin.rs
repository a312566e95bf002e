//! Embedded GLSL 330 core sources for the default shader pack.
//!
//! Attribute locations match [`Vertex::ATTRIBUTES`](super::Vertex::ATTRIBUTES):
//! 0 = position, 1 = color, 2 = texture coordinates.
//! Uniforms: `projMtx` (projection) and `mdlvMtx` (model-view).

/// Flat vertex color.
pub const COLOR_VERTEX: &str = r#"
#version 330 core

layout (location = 0) in vec2 aPos;
layout (location = 1) in vec4 aColor;

out vec4 vColor;

uniform mat4 mdlvMtx;
uniform mat4 projMtx;

void main()
{
    gl_Position = projMtx * mdlvMtx * vec4(aPos, 0.0, 1.0);
    vColor = aColor;
}
"#;

pub const COLOR_FRAGMENT: &str = r#"
#version 330 core

in vec4 vColor;
out vec4 fragColor;

void main()
{
    fragColor = vColor;
}
"#;

/// Texture sampled at the vertex texture coordinates, tinted by vertex color.
pub const TEXTURE_VERTEX: &str = r#"
#version 330 core

layout (location = 0) in vec2 aPos;
layout (location = 1) in vec4 aColor;
layout (location = 2) in vec2 aTexCoord;

out vec4 vColor;
out vec2 vTexCoord;

uniform mat4 mdlvMtx;
uniform mat4 projMtx;

void main()
{
    gl_Position = projMtx * mdlvMtx * vec4(aPos, 0.0, 1.0);
    vColor = aColor;
    vTexCoord = aTexCoord;
}
"#;

pub const TEXTURE_FRAGMENT: &str = r#"
#version 330 core

in vec4 vColor;
in vec2 vTexCoord;
out vec4 fragColor;

uniform sampler2D tex;

void main()
{
    fragColor = texture(tex, vTexCoord) * vColor;
}
"#;
