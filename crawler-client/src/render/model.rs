//! Imported models, placed instances and the point light that shades them.

use std::{path::Path, sync::Arc};

use glam::{EulerRot, Mat3, Mat4, Quat, Vec2, Vec3};

use crate::abs::{Mesh, ShaderProgram, Texture, TextureError, Vertex, Wrap, float_attrib};

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Failed to import {path}: {source}")]
    Import {
        path: String,
        #[source]
        source: gltf::Error,
    },

    #[error("Primitive {0} has no positions")]
    MissingPositions(usize),

    #[error("Failed to create mesh: {0}")]
    Mesh(String),

    #[error(transparent)]
    Texture(#[from] TextureError),
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(C)]
pub struct ModelVertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
}

impl Vertex for ModelVertex {
    fn vertex_attribs(gl: &glow::Context) {
        let vec3 = std::mem::size_of::<Vec3>();
        unsafe {
            float_attrib::<ModelVertex>(gl, 0, 3, 0);
            float_attrib::<ModelVertex>(gl, 1, 3, vec3);
            float_attrib::<ModelVertex>(gl, 2, 2, vec3 * 2);
        }
    }
}

/// One drawable part of a model with its diffuse texture.
pub struct ModelMesh {
    mesh: Mesh,
    texture: Texture,
}

impl ModelMesh {
    pub fn new(
        gl: &Arc<glow::Context>,
        vertices: &[ModelVertex],
        indices: &[u32],
        texture: Texture,
    ) -> Result<Self, ModelError> {
        let mesh = Mesh::new(gl, vertices, indices, glow::TRIANGLES).map_err(ModelError::Mesh)?;
        Ok(Self { mesh, texture })
    }

    pub fn draw(&self) {
        self.texture.bind(0);
        self.mesh.draw();
    }
}

pub struct Model {
    pub meshes: Vec<ModelMesh>,
}

impl Model {
    /// Imports every mesh of the default scene of a glTF file.
    ///
    /// Node transforms are baked into the vertices. Primitives without a
    /// usable base colour texture are drawn with a white one.
    pub fn load(gl: &Arc<glow::Context>, path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let (document, buffers, images) = gltf::import(path).map_err(|source| ModelError::Import {
            path: path.display().to_string(),
            source,
        })?;

        let scene = document.default_scene().or_else(|| document.scenes().next());
        let mut parts = Vec::new();
        if let Some(scene) = scene {
            for node in scene.nodes() {
                collect_node(&node, Mat4::IDENTITY, &buffers, &mut parts)?;
            }
        }

        let mut meshes = Vec::with_capacity(parts.len());
        for part in parts {
            let decoded = part
                .image
                .and_then(|(i, wrap)| Some((to_image(images.get(i)?)?, wrap)));
            let texture = match decoded {
                Some((image, wrap)) => Texture::new(gl, &image, wrap)?,
                None => Texture::white(gl)?,
            };
            meshes.push(ModelMesh::new(gl, &part.vertices, &part.indices, texture)?);
        }

        log::info!("Loaded model {} ({} meshes)", path.display(), meshes.len());
        Ok(Self { meshes })
    }

    /// A textured unit cube with per-face normals.
    pub fn cube(gl: &Arc<glow::Context>, texture: Texture) -> Result<Self, ModelError> {
        let (vertices, indices) = cube_geometry();
        Ok(Self {
            meshes: vec![ModelMesh::new(gl, &vertices, &indices, texture)?],
        })
    }

    pub fn draw(&self) {
        for mesh in &self.meshes {
            mesh.draw();
        }
    }
}

struct Part {
    vertices: Vec<ModelVertex>,
    indices: Vec<u32>,
    image: Option<(usize, Wrap)>,
}

fn collect_node(
    node: &gltf::Node,
    parent: Mat4,
    buffers: &[gltf::buffer::Data],
    parts: &mut Vec<Part>,
) -> Result<(), ModelError> {
    let transform = parent * Mat4::from_cols_array_2d(&node.transform().matrix());

    if let Some(mesh) = node.mesh() {
        let normal_matrix = Mat3::from_mat4(transform).inverse().transpose();
        for primitive in mesh.primitives() {
            let reader =
                primitive.reader(|buffer| buffers.get(buffer.index()).map(|data| data.0.as_slice()));

            let positions: Vec<Vec3> = reader
                .read_positions()
                .ok_or(ModelError::MissingPositions(primitive.index()))?
                .map(Vec3::from)
                .collect();
            let normals: Vec<Vec3> = reader
                .read_normals()
                .map(|n| n.map(Vec3::from).collect())
                .unwrap_or_default();
            let uvs: Vec<Vec2> = reader
                .read_tex_coords(0)
                .map(|uv| uv.into_f32().map(Vec2::from).collect())
                .unwrap_or_default();

            let vertices = positions
                .iter()
                .enumerate()
                .map(|(i, &position)| ModelVertex {
                    position: transform.transform_point3(position),
                    normal: (normal_matrix * normals.get(i).copied().unwrap_or(Vec3::Y))
                        .normalize_or_zero(),
                    uv: uvs.get(i).copied().unwrap_or(Vec2::ZERO),
                })
                .collect();
            let indices = match reader.read_indices() {
                Some(indices) => indices.into_u32().collect(),
                None => (0..positions.len() as u32).collect(),
            };
            let image = primitive
                .material()
                .pbr_metallic_roughness()
                .base_color_texture()
                .map(|info| {
                    let texture = info.texture();
                    (texture.source().index(), sampler_wrap(texture.sampler().wrap_s()))
                });

            parts.push(Part {
                vertices,
                indices,
                image,
            });
        }
    }

    for child in node.children() {
        collect_node(&child, transform, buffers, parts)?;
    }
    Ok(())
}

/// Clamped samplers keep their clamp, every other mode repeats.
fn sampler_wrap(mode: gltf::texture::WrappingMode) -> Wrap {
    match mode {
        gltf::texture::WrappingMode::ClampToEdge => Wrap::ClampToEdge,
        _ => Wrap::Repeat,
    }
}

fn to_image(data: &gltf::image::Data) -> Option<image::DynamicImage> {
    use gltf::image::Format;

    match data.format {
        Format::R8G8B8A8 => image::RgbaImage::from_raw(data.width, data.height, data.pixels.clone())
            .map(image::DynamicImage::ImageRgba8),
        Format::R8G8B8 => image::RgbImage::from_raw(data.width, data.height, data.pixels.clone())
            .map(image::DynamicImage::ImageRgb8),
        other => {
            log::warn!("Unsupported glTF image format {other:?}, using white");
            None
        }
    }
}

/// Vertices and indices of a unit cube centred on the origin.
pub fn cube_geometry() -> (Vec<ModelVertex>, Vec<u32>) {
    const FACES: [(Vec3, Vec3, Vec3); 6] = [
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    ];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (normal, u, v) in FACES {
        let base = vertices.len() as u32;
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            vertices.push(ModelVertex {
                position: (normal + u * su + v * sv) * 0.5,
                normal,
                uv: Vec2::new((su + 1.0) * 0.5, (sv + 1.0) * 0.5),
            });
        }
        indices.extend([base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    (vertices, indices)
}

/// A placement of a model in the world.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModelInstance {
    pub position: Vec3,
    /// Euler angles in degrees: pitch about X, yaw about Y, roll about Z.
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for ModelInstance {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl ModelInstance {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Translation, then scale, then yaw-pitch-roll rotation.
    pub fn transform(&self) -> Mat4 {
        let rotation = Quat::from_euler(
            EulerRot::YXZ,
            self.rotation.y.to_radians(),
            self.rotation.x.to_radians(),
            self.rotation.z.to_radians(),
        );
        Mat4::from_translation(self.position) * Mat4::from_scale(self.scale) * Mat4::from_quat(rotation)
    }

    pub fn draw(&self, shader: &ShaderProgram, model: &Model) {
        shader.set_uniform("model", self.transform());
        model.draw();
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    /// Constant, linear and quadratic falloff terms.
    pub attenuation: Vec3,
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            ambient: Vec3::splat(0.2),
            diffuse: Vec3::splat(0.5),
            specular: Vec3::ONE,
            attenuation: Vec3::new(1.0, 0.09, 0.032),
        }
    }
}

impl PointLight {
    pub fn apply(&self, shader: &ShaderProgram) {
        shader.set_uniform("light.position", self.position);
        shader.set_uniform("light.ambient", self.ambient);
        shader.set_uniform("light.diffuse", self.diffuse);
        shader.set_uniform("light.specular", self.specular);
        shader.set_uniform("light.constant", self.attenuation.x);
        shader.set_uniform("light.linear", self.attenuation.y);
        shader.set_uniform("light.quadratic", self.attenuation.z);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_default_instance_is_identity() {
        assert!(ModelInstance::default().transform().abs_diff_eq(Mat4::IDENTITY, 1e-6));
    }

    #[test]
    fn test_transform_rotates_before_scaling_and_translating() {
        let instance = ModelInstance {
            position: Vec3::new(1.0, 2.0, 3.0),
            rotation: Vec3::new(0.0, 90.0, 0.0),
            scale: Vec3::new(2.0, 1.0, 1.0),
        };
        // Yaw 90 takes +X to -Z, where the X scale no longer applies.
        let p = instance.transform().transform_point3(Vec3::X);
        assert!(close(p, Vec3::new(1.0, 2.0, 2.0)));
        // +Z lands on +X and gets stretched.
        let q = instance.transform().transform_point3(Vec3::Z);
        assert!(close(q, Vec3::new(3.0, 2.0, 3.0)));
    }

    #[test]
    fn test_yaw_applies_outside_pitch() {
        let instance = ModelInstance {
            rotation: Vec3::new(90.0, 90.0, 0.0),
            ..Default::default()
        };
        // Pitch takes +Y to +Z, then yaw takes +Z to +X.
        let p = instance.transform().transform_point3(Vec3::Y);
        assert!(close(p, Vec3::X));
    }

    #[test]
    fn test_sampler_wrap() {
        use gltf::texture::WrappingMode;

        assert_eq!(sampler_wrap(WrappingMode::ClampToEdge), Wrap::ClampToEdge);
        assert_eq!(sampler_wrap(WrappingMode::Repeat), Wrap::Repeat);
        assert_eq!(sampler_wrap(WrappingMode::MirroredRepeat), Wrap::Repeat);
    }

    #[test]
    fn test_bundled_crate_model_parses() {
        let settings = crate::settings::Settings::default();
        let (document, buffers, images) =
            gltf::import(settings.asset("models/crate.gltf")).unwrap();
        let mut parts = Vec::new();
        for node in document.default_scene().unwrap().nodes() {
            collect_node(&node, Mat4::IDENTITY, &buffers, &mut parts).unwrap();
        }
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].vertices.len(), 24);
        assert_eq!(parts[0].indices.len(), 36);
        // The sampler leaves wrapS unset, which means repeat.
        let (image, wrap) = parts[0].image.unwrap();
        assert_eq!(wrap, Wrap::Repeat);
        assert!(to_image(&images[image]).is_some());
    }

    #[test]
    fn test_cube_geometry() {
        let (vertices, indices) = cube_geometry();
        assert_eq!(vertices.len(), 24);
        assert_eq!(indices.len(), 36);
        for vertex in &vertices {
            assert!(vertex.position.abs().max_element() <= 0.5 + 1e-6);
            // Every corner sits on the face its normal points through.
            assert!((vertex.position.dot(vertex.normal) - 0.5).abs() < 1e-6);
        }
        // Triangles wind counter-clockwise seen from outside.
        for tri in indices.chunks(3) {
            let [a, b, c] = [0, 1, 2].map(|i| vertices[tri[i] as usize]);
            let n = (b.position - a.position).cross(c.position - a.position);
            assert!(n.dot(a.normal) > 0.0);
        }
    }
}
