//! GLSL shader sources
//!
//! Two tiny programs: lit triangles (bivector plane fills) and flat lines
//! (arrows, grid).

pub const LIT_VERTEX_SHADER: &str = r#"
#version 330 core

layout (location = 0) in vec3 position;
layout (location = 1) in vec3 normal;
layout (location = 2) in vec4 color;

uniform mat4 mvp_matrix;

out vec3 frag_normal;
out vec4 frag_color;

void main() {
    gl_Position = mvp_matrix * vec4(position, 1.0);
    frag_normal = normal;
    frag_color = color;
}
"#;

pub const LIT_FRAGMENT_SHADER: &str = r#"
#version 330 core

in vec3 frag_normal;
in vec4 frag_color;

uniform vec3 light_direction;
uniform vec3 light_color;
uniform vec3 ambient_color;
uniform vec4 material_color;

out vec4 out_color;

void main() {
    vec3 n = normalize(frag_normal);
    // two-sided: plane fills are visible from both directions
    float diffuse = abs(dot(n, -light_direction));
    vec3 lit = ambient_color + light_color * diffuse;
    vec4 base = frag_color * material_color;
    out_color = vec4(base.rgb * lit, base.a);
}
"#;

pub const LINE_VERTEX_SHADER: &str = r#"
#version 330 core

layout (location = 0) in vec3 position;
layout (location = 1) in vec3 normal;
layout (location = 2) in vec4 color;

uniform mat4 mvp_matrix;

out vec4 frag_color;

void main() {
    gl_Position = mvp_matrix * vec4(position, 1.0);
    frag_color = color;
}
"#;

pub const LINE_FRAGMENT_SHADER: &str = r#"
#version 330 core

in vec4 frag_color;

uniform vec4 material_color;

out vec4 out_color;

void main() {
    out_color = frag_color * material_color;
}
"#;
