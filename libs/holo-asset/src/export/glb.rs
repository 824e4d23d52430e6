//! # Binary glTF
//!
//! Writes a [`HologramAsset`] as a single-mesh GLB container:
//!
//! ```text
//! header   magic "glTF" | version 2 | total length
//! chunk 0  JSON (space padded to 4 bytes)
//! chunk 1  BIN  positions | normals | uvs | indices | PNG images (zero padded)
//! ```

use super::AssetEncoder;
use crate::error::{AssetError, AssetResult};
use crate::material::{HologramAsset, Material};
use image::{ImageFormat, RgbImage};
use log::debug;
use serde_json::{json, Map, Value};
use std::io::Cursor;

/// `glTF` in little-endian.
pub const GLB_MAGIC: u32 = 0x4654_6C67;
pub const GLB_VERSION: u32 = 2;
pub const CHUNK_JSON: u32 = 0x4E4F_534A;
pub const CHUNK_BIN: u32 = 0x004E_4942;

const GLB_HEADER_LEN: usize = 12;
const CHUNK_HEADER_LEN: usize = 8;

// glTF enums
const FLOAT: u32 = 5126;
const UNSIGNED_INT: u32 = 5125;
const ARRAY_BUFFER: u32 = 34962;
const ELEMENT_ARRAY_BUFFER: u32 = 34963;
const LINEAR: u32 = 9729;
const CLAMP_TO_EDGE: u32 = 33071;
const TRIANGLES: u32 = 4;

/// Encoder for binary glTF 2.0.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlbEncoder;

impl AssetEncoder for GlbEncoder {
    fn extension(&self) -> &'static str {
        "glb"
    }

    fn encode(&self, asset: &HologramAsset) -> AssetResult<Vec<u8>> {
        encode_glb(asset)
    }
}

/// Accumulates the BIN chunk and its buffer views.
#[derive(Default)]
struct BinBuilder {
    data: Vec<u8>,
    views: Vec<Value>,
}

impl BinBuilder {
    /// Appends 4-byte aligned data and returns its buffer view index.
    fn push(&mut self, bytes: &[u8], target: Option<u32>) -> usize {
        let offset = self.data.len();
        self.data.extend_from_slice(bytes);
        pad_to_four(&mut self.data, 0);

        let mut view = Map::new();
        view.insert("buffer".into(), json!(0));
        view.insert("byteOffset".into(), json!(offset));
        view.insert("byteLength".into(), json!(bytes.len()));
        if let Some(target) = target {
            view.insert("target".into(), json!(target));
        }
        self.views.push(Value::Object(view));
        self.views.len() - 1
    }
}

/// Encodes an asset as GLB bytes.
pub fn encode_glb(asset: &HologramAsset) -> AssetResult<Vec<u8>> {
    let mesh = asset.mesh();
    let material = asset.material();

    let positions = mesh.vertices_f32();
    let normals: Vec<f32> = mesh
        .compute_normals()
        .iter()
        .flat_map(|n| [n.x as f32, n.y as f32, n.z as f32])
        .collect();
    let uvs = mesh.uvs_f32();
    let indices = mesh.indices_u32();
    let (min, max) = position_bounds(&positions);

    let mut bin = BinBuilder::default();
    let position_view = bin.push(&f32_bytes(&positions), Some(ARRAY_BUFFER));
    let normal_view = bin.push(&f32_bytes(&normals), Some(ARRAY_BUFFER));
    let uv_view = bin.push(&f32_bytes(&uvs), Some(ARRAY_BUFFER));
    let index_view = bin.push(&u32_bytes(&indices), Some(ELEMENT_ARRAY_BUFFER));

    let mut images = vec![json!({
        "bufferView": bin.push(&encode_png(&material.base_color)?, None),
        "mimeType": "image/png",
    })];
    if let Some(normal_map) = &material.normal_map {
        images.push(json!({
            "bufferView": bin.push(&encode_png(normal_map)?, None),
            "mimeType": "image/png",
        }));
    }
    let image_count = images.len();
    let textures: Vec<Value> = (0..image_count)
        .map(|source| json!({ "sampler": 0, "source": source }))
        .collect();

    let vertex_count = mesh.vertex_count();
    let document = json!({
        "asset": { "version": "2.0", "generator": "holo-asset" },
        "scene": 0,
        "scenes": [{ "nodes": [0] }],
        "nodes": [{ "mesh": 0, "name": "hologram" }],
        "meshes": [{
            "name": "hologram",
            "primitives": [{
                "attributes": { "POSITION": 0, "NORMAL": 1, "TEXCOORD_0": 2 },
                "indices": 3,
                "material": 0,
                "mode": TRIANGLES,
            }],
        }],
        "accessors": [
            {
                "bufferView": position_view,
                "componentType": FLOAT,
                "count": vertex_count,
                "type": "VEC3",
                "min": min,
                "max": max,
            },
            {
                "bufferView": normal_view,
                "componentType": FLOAT,
                "count": vertex_count,
                "type": "VEC3",
            },
            {
                "bufferView": uv_view,
                "componentType": FLOAT,
                "count": vertex_count,
                "type": "VEC2",
            },
            {
                "bufferView": index_view,
                "componentType": UNSIGNED_INT,
                "count": indices.len(),
                "type": "SCALAR",
            },
        ],
        "bufferViews": bin.views,
        "buffers": [{ "byteLength": bin.data.len() }],
        "images": images,
        "samplers": [{
            "magFilter": LINEAR,
            "minFilter": LINEAR,
            "wrapS": CLAMP_TO_EDGE,
            "wrapT": CLAMP_TO_EDGE,
        }],
        "textures": textures,
        "materials": [material_json(material)],
    });

    let mut json_bytes = serde_json::to_vec(&document)?;
    pad_to_four(&mut json_bytes, b' ');

    let total = GLB_HEADER_LEN
        + CHUNK_HEADER_LEN
        + json_bytes.len()
        + CHUNK_HEADER_LEN
        + bin.data.len();
    let total_u32 = u32::try_from(total)
        .map_err(|_| AssetError::invalid_mesh(format!("GLB of {total} bytes exceeds 4 GiB")))?;

    let mut out = Vec::with_capacity(total);
    out.extend_from_slice(&GLB_MAGIC.to_le_bytes());
    out.extend_from_slice(&GLB_VERSION.to_le_bytes());
    out.extend_from_slice(&total_u32.to_le_bytes());
    write_chunk(&mut out, CHUNK_JSON, &json_bytes);
    write_chunk(&mut out, CHUNK_BIN, &bin.data);

    debug!(
        "glb: {} vertices, {} triangles, {} image(s), {} bytes",
        vertex_count,
        mesh.triangle_count(),
        image_count,
        out.len()
    );
    Ok(out)
}

fn material_json(material: &Material) -> Value {
    let mut value = json!({
        "name": material.name,
        "pbrMetallicRoughness": {
            "baseColorTexture": { "index": 0 },
            "metallicFactor": material.metallic,
            "roughnessFactor": material.roughness,
        },
        "doubleSided": material.double_sided,
    });
    if material.normal_map.is_some() {
        value["normalTexture"] = json!({ "index": 1 });
    }
    value
}

/// Splits a GLB stream and parses its JSON chunk.
pub fn read_glb_json(bytes: &[u8]) -> AssetResult<Value> {
    let word = |offset: usize| -> AssetResult<u32> {
        bytes
            .get(offset..offset + 4)
            .and_then(|b| b.try_into().ok())
            .map(u32::from_le_bytes)
            .ok_or_else(|| AssetError::malformed_glb(format!("truncated at byte {offset}")))
    };

    if word(0)? != GLB_MAGIC {
        return Err(AssetError::malformed_glb("bad magic"));
    }
    if word(4)? != GLB_VERSION {
        return Err(AssetError::malformed_glb("unsupported version"));
    }
    if word(8)? as usize != bytes.len() {
        return Err(AssetError::malformed_glb("header length does not match stream"));
    }
    let json_len = word(12)? as usize;
    if word(16)? != CHUNK_JSON {
        return Err(AssetError::malformed_glb("first chunk is not JSON"));
    }
    let start = GLB_HEADER_LEN + CHUNK_HEADER_LEN;
    let json = bytes
        .get(start..start + json_len)
        .ok_or_else(|| AssetError::malformed_glb("JSON chunk overruns stream"))?;
    Ok(serde_json::from_slice(json)?)
}

fn write_chunk(out: &mut Vec<u8>, kind: u32, data: &[u8]) {
    out.extend_from_slice(&(data.len() as u32).to_le_bytes());
    out.extend_from_slice(&kind.to_le_bytes());
    out.extend_from_slice(data);
}

fn pad_to_four(bytes: &mut Vec<u8>, fill: u8) {
    while bytes.len() % 4 != 0 {
        bytes.push(fill);
    }
}

fn encode_png(image: &RgbImage) -> AssetResult<Vec<u8>> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

fn f32_bytes(values: &[f32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

fn u32_bytes(values: &[u32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

fn position_bounds(positions: &[f32]) -> ([f32; 3], [f32; 3]) {
    let mut min = [f32::INFINITY; 3];
    let mut max = [f32::NEG_INFINITY; 3];
    for p in positions.chunks_exact(3) {
        for k in 0..3 {
            min[k] = min[k].min(p[k]);
            max[k] = max[k].max(p[k]);
        }
    }
    (min, max)
}
