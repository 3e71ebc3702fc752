//! OpenGL mesh renderer
//!
//! Owns every GL resource the scene allocates: two shader programs and one
//! VAO/VBO/EBO triple per uploaded mesh. Uploads and deletions are explicit
//! and keyed by [`MeshId`]; the registry drives them so that live GPU
//! buffers always correspond exactly to registered primitives. Disposal
//! problems are logged and skipped, never propagated.

use crate::entity::MeshId;
use crate::error::{Result, SceneError};
use crate::primitives::{MeshTopology, RenderableMesh};
use crate::shaders::{
    LINE_FRAGMENT_SHADER, LINE_VERTEX_SHADER, LIT_FRAGMENT_SHADER, LIT_VERTEX_SHADER,
};
use glam::{Mat4, Vec3};
use glow::HasContext;
use std::collections::HashMap;
use tracing::error;

/// Lighting parameters for the lit (triangle) program
#[derive(Debug, Clone)]
pub struct LightingParams {
    /// Light direction (normalized).
    pub light_direction: Vec3,
    /// Light color (RGB).
    pub light_color: Vec3,
    /// Ambient light color (RGB).
    pub ambient_color: Vec3,
}

impl Default for LightingParams {
    fn default() -> Self {
        Self {
            light_direction: Vec3::new(-0.3, -1.0, -0.7).normalize(),
            light_color: Vec3::new(1.0, 1.0, 1.0),
            ambient_color: Vec3::new(0.35, 0.35, 0.35),
        }
    }
}

/// GL resources for a single uploaded mesh
#[derive(Debug)]
struct MeshGpu {
    vao: glow::VertexArray,
    vbo: glow::Buffer,
    ebo: glow::Buffer,
    index_count: i32,
    topology: MeshTopology,
    color: [f32; 4],
    lit: bool,
}

/// glow-based renderer for scene meshes
pub struct MeshRenderer {
    gl: glow::Context,
    lit_program: glow::Program,
    line_program: glow::Program,
    resources: HashMap<MeshId, MeshGpu>,
    lighting: LightingParams,
}

impl MeshRenderer {
    /// Create a renderer on an existing GL context
    pub fn new(gl: glow::Context) -> Result<Self> {
        let lit_program = compile_program(&gl, LIT_VERTEX_SHADER, LIT_FRAGMENT_SHADER)?;
        let line_program = compile_program(&gl, LINE_VERTEX_SHADER, LINE_FRAGMENT_SHADER)?;

        Ok(Self {
            gl,
            lit_program,
            line_program,
            resources: HashMap::new(),
            lighting: LightingParams::default(),
        })
    }

    /// Set lighting parameters
    pub fn set_lighting(&mut self, lighting: LightingParams) {
        self.lighting = lighting;
    }

    /// Number of meshes currently resident on the GPU
    pub fn resident_count(&self) -> usize {
        self.resources.len()
    }

    /// Upload mesh data to the GPU, replacing any prior upload under `id`
    pub fn upload_mesh(&mut self, id: MeshId, mesh: &RenderableMesh) -> Result<()> {
        if let Some(old) = self.resources.remove(&id) {
            self.release(&old);
        }

        if mesh.is_empty() {
            return Ok(());
        }

        unsafe {
            let vao = self.gl.create_vertex_array().map_err(SceneError::Buffer)?;
            self.gl.bind_vertex_array(Some(vao));

            let vbo = self.gl.create_buffer().map_err(SceneError::Buffer)?;
            self.gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            self.gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(&mesh.vertices),
                glow::STATIC_DRAW,
            );

            let ebo = self.gl.create_buffer().map_err(SceneError::Buffer)?;
            self.gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ebo));
            self.gl.buffer_data_u8_slice(
                glow::ELEMENT_ARRAY_BUFFER,
                bytemuck::cast_slice(&mesh.indices),
                glow::STATIC_DRAW,
            );

            // position (location 0), normal (1), color (2); 40-byte stride
            self.gl.vertex_attrib_pointer_f32(0, 3, glow::FLOAT, false, 40, 0);
            self.gl.enable_vertex_attrib_array(0);
            self.gl.vertex_attrib_pointer_f32(1, 3, glow::FLOAT, false, 40, 12);
            self.gl.enable_vertex_attrib_array(1);
            self.gl.vertex_attrib_pointer_f32(2, 4, glow::FLOAT, false, 40, 24);
            self.gl.enable_vertex_attrib_array(2);

            self.gl.bind_vertex_array(None);
            self.gl.bind_buffer(glow::ARRAY_BUFFER, None);
            self.gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, None);

            self.resources.insert(
                id,
                MeshGpu {
                    vao,
                    vbo,
                    ebo,
                    index_count: mesh.indices.len() as i32,
                    topology: mesh.topology,
                    color: mesh.material.color,
                    lit: mesh.material.lit,
                },
            );
        }

        Ok(())
    }

    /// Delete the GPU resources of a mesh; no-op when not resident
    pub fn remove_mesh(&mut self, id: MeshId) {
        if let Some(gpu) = self.resources.remove(&id) {
            self.release(&gpu);
        }
    }

    /// Delete every resident mesh
    pub fn clear_all_meshes(&mut self) {
        let drained: Vec<_> = self.resources.drain().collect();
        for (_, gpu) in drained {
            self.release(&gpu);
        }
    }

    /// Draw every resident mesh with the given view/projection
    pub fn render(&self, view: &Mat4, projection: &Mat4) {
        let mvp = *projection * *view;
        unsafe {
            self.gl.enable(glow::DEPTH_TEST);

            for gpu in self.resources.values() {
                if gpu.index_count == 0 {
                    continue;
                }

                let program = if gpu.lit {
                    self.lit_program
                } else {
                    self.line_program
                };
                self.gl.use_program(Some(program));

                self.set_uniform_mat4(program, "mvp_matrix", &mvp);
                self.set_uniform_vec4(program, "material_color", [1.0, 1.0, 1.0, 1.0]);
                if gpu.lit {
                    self.set_uniform_vec3(program, "light_direction", self.lighting.light_direction);
                    self.set_uniform_vec3(program, "light_color", self.lighting.light_color);
                    self.set_uniform_vec3(program, "ambient_color", self.lighting.ambient_color);
                }

                let blended = gpu.color[3] < 1.0;
                if blended {
                    self.gl.enable(glow::BLEND);
                    self.gl.blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA);
                }

                self.gl.bind_vertex_array(Some(gpu.vao));
                match gpu.topology {
                    MeshTopology::Lines => {
                        self.gl.line_width(2.0);
                        self.gl
                            .draw_elements(glow::LINES, gpu.index_count, glow::UNSIGNED_INT, 0);
                    }
                    MeshTopology::Triangles => {
                        self.gl
                            .draw_elements(glow::TRIANGLES, gpu.index_count, glow::UNSIGNED_INT, 0);
                    }
                }
                self.gl.bind_vertex_array(None);

                if blended {
                    self.gl.disable(glow::BLEND);
                }
            }
        }
    }

    /// Delete one mesh's buffers, logging (and continuing past) any GL
    /// error the disposal raises.
    fn release(&self, gpu: &MeshGpu) {
        unsafe {
            self.gl.delete_vertex_array(gpu.vao);
            self.gl.delete_buffer(gpu.vbo);
            self.gl.delete_buffer(gpu.ebo);
            let status = self.gl.get_error();
            if status != glow::NO_ERROR {
                error!(gl_error = status, "mesh disposal reported a GL error; continuing");
            }
        }
    }

    fn set_uniform_mat4(&self, program: glow::Program, name: &str, matrix: &Mat4) {
        unsafe {
            if let Some(loc) = self.gl.get_uniform_location(program, name) {
                self.gl
                    .uniform_matrix_4_f32_slice(Some(&loc), false, &matrix.to_cols_array());
            }
        }
    }

    fn set_uniform_vec3(&self, program: glow::Program, name: &str, vec: Vec3) {
        unsafe {
            if let Some(loc) = self.gl.get_uniform_location(program, name) {
                self.gl.uniform_3_f32(Some(&loc), vec.x, vec.y, vec.z);
            }
        }
    }

    fn set_uniform_vec4(&self, program: glow::Program, name: &str, vec: [f32; 4]) {
        unsafe {
            if let Some(loc) = self.gl.get_uniform_location(program, name) {
                self.gl
                    .uniform_4_f32(Some(&loc), vec[0], vec[1], vec[2], vec[3]);
            }
        }
    }
}

impl Drop for MeshRenderer {
    fn drop(&mut self) {
        self.clear_all_meshes();
        unsafe {
            self.gl.delete_program(self.lit_program);
            self.gl.delete_program(self.line_program);
        }
    }
}

fn compile_program(
    gl: &glow::Context,
    vs_source: &str,
    fs_source: &str,
) -> Result<glow::Program> {
    unsafe {
        let vs = gl
            .create_shader(glow::VERTEX_SHADER)
            .map_err(SceneError::Shader)?;
        gl.shader_source(vs, vs_source);
        gl.compile_shader(vs);
        if !gl.get_shader_compile_status(vs) {
            let info = gl.get_shader_info_log(vs);
            gl.delete_shader(vs);
            return Err(SceneError::Shader(format!("vertex shader: {}", info)));
        }

        let fs = gl
            .create_shader(glow::FRAGMENT_SHADER)
            .map_err(SceneError::Shader)?;
        gl.shader_source(fs, fs_source);
        gl.compile_shader(fs);
        if !gl.get_shader_compile_status(fs) {
            let info = gl.get_shader_info_log(fs);
            gl.delete_shader(vs);
            gl.delete_shader(fs);
            return Err(SceneError::Shader(format!("fragment shader: {}", info)));
        }

        let program = gl.create_program().map_err(SceneError::Shader)?;
        gl.attach_shader(program, vs);
        gl.attach_shader(program, fs);
        gl.link_program(program);

        let linked = gl.get_program_link_status(program);
        gl.delete_shader(vs);
        gl.delete_shader(fs);
        if !linked {
            let info = gl.get_program_info_log(program);
            gl.delete_program(program);
            return Err(SceneError::Shader(format!("program linking: {}", info)));
        }

        Ok(program)
    }
}
