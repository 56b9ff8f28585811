//! Structs and functions for handling textures.
//!
//! The module provides the [`Texture`] struct which is a CPU representation of a GPU texture.

use std::{path::Path, sync::Arc};

use glow::HasContext;
use image::{DynamicImage, GenericImageView};

/// Errors that can occur while loading a texture from disk.
#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    #[error("Failed to decode image {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to allocate texture: {0}")]
    Create(String),
}

/// How texture coordinates outside `[0, 1]` are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wrap {
    Repeat,
    ClampToEdge,
}

impl Wrap {
    fn gl(self) -> i32 {
        match self {
            Wrap::Repeat => glow::REPEAT as i32,
            Wrap::ClampToEdge => glow::CLAMP_TO_EDGE as i32,
        }
    }
}

/// Represents a texture stored on the GPU side.
pub struct Texture {
    gl: Arc<glow::Context>,
    id: glow::Texture,
}

impl Texture {
    /// Creates a new texture from the given [`image::DynamicImage`].
    pub fn new(gl: &Arc<glow::Context>, image: &DynamicImage, wrap: Wrap) -> Result<Self, TextureError> {
        let (width, height) = image.dimensions();
        let data = image.to_rgba8().into_raw();
        Self::new_from_data(gl, width, height, &data, wrap)
    }

    /// Creates a new mipmapped texture from the given raw RGBA data.
    pub fn new_from_data(
        gl: &Arc<glow::Context>,
        width: u32,
        height: u32,
        data: &[u8],
        wrap: Wrap,
    ) -> Result<Self, TextureError> {
        unsafe {
            let texture = gl.create_texture().map_err(TextureError::Create)?;
            gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA as i32,
                width as i32,
                height as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(Some(data)),
            );
            gl.generate_mipmap(glow::TEXTURE_2D);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, wrap.gl());
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, wrap.gl());
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                glow::LINEAR_MIPMAP_LINEAR as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MAG_FILTER,
                glow::NEAREST as i32,
            );
            gl.bind_texture(glow::TEXTURE_2D, None);

            Ok(Self {
                gl: Arc::clone(gl),
                id: texture,
            })
        }
    }

    /// Decodes an image file and uploads it. Rows are flipped so that the
    /// first row of the file ends up at `v = 1`.
    pub fn load(gl: &Arc<glow::Context>, path: impl AsRef<Path>, wrap: Wrap) -> Result<Self, TextureError> {
        let path = path.as_ref();
        let image = image::open(path).map_err(|source| TextureError::Decode {
            path: path.display().to_string(),
            source,
        })?;
        let (width, height) = image.dimensions();
        log::debug!("Loaded texture {} ({width}x{height})", path.display());
        Self::new(gl, &image.flipv(), wrap)
    }

    /// A single white texel, used in place of textures that failed to load.
    pub fn white(gl: &Arc<glow::Context>) -> Result<Self, TextureError> {
        Self::new_from_data(gl, 1, 1, &[255, 255, 255, 255], Wrap::Repeat)
    }

    /// Loads a texture, logging the error and falling back to [`Texture::white`].
    pub fn load_or_white(
        gl: &Arc<glow::Context>,
        path: impl AsRef<Path>,
        wrap: Wrap,
    ) -> Result<Self, TextureError> {
        Self::load(gl, path, wrap).or_else(|e| {
            log::error!("{e}");
            Self::white(gl)
        })
    }

    /// Binds the texture to the specified texture unit.
    pub fn bind(&self, unit: u32) {
        unsafe {
            self.gl.active_texture(glow::TEXTURE0 + unit);
            self.gl.bind_texture(glow::TEXTURE_2D, Some(self.id));
        }
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_texture(self.id);
        }
    }
}
