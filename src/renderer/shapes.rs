//! Triangle generation for the draw primitives

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH};
use crate::draw::{Color, Font, Rect};
use crate::platform::DrawTarget;

/// 2D vertex in normalized device coordinates with a linear color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Field coordinates (origin top-left, y down) to NDC (origin centre, y up).
/// The field is stretched over the whole viewport.
#[inline]
pub fn field_to_ndc(p: Vec2) -> Vec2 {
    Vec2::new(p.x / FIELD_WIDTH * 2.0 - 1.0, 1.0 - p.y / FIELD_HEIGHT * 2.0)
}

/// Two triangles covering a rectangle
pub fn rect(rect: &Rect, color: [f32; 4]) -> [Vertex; 6] {
    let tl = field_to_ndc(rect.min);
    let br = field_to_ndc(rect.max());
    let tr = Vec2::new(br.x, tl.y);
    let bl = Vec2::new(tl.x, br.y);

    [
        Vertex::new(tl.x, tl.y, color),
        Vertex::new(bl.x, bl.y, color),
        Vertex::new(tr.x, tr.y, color),
        Vertex::new(tr.x, tr.y, color),
        Vertex::new(bl.x, bl.y, color),
        Vertex::new(br.x, br.y, color),
    ]
}

/// A text label the GPU path leaves to the host
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub font: Font,
    /// Field coordinates of the baseline origin
    pub pos: Vec2,
    pub color: Color,
}

/// Collects one frame's geometry and labels
#[derive(Debug, Default)]
pub struct FrameBuilder {
    pub vertices: Vec<Vertex>,
    pub labels: Vec<Label>,
}

impl FrameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.labels.clear();
    }
}

impl DrawTarget for FrameBuilder {
    fn fill_rect(&mut self, r: Rect, color: Color) {
        self.vertices.extend_from_slice(&rect(&r, color.to_linear()));
    }

    fn draw_text(&mut self, text: &str, font: Font, pos: Vec2, color: Color) {
        self.labels.push(Label {
            text: text.to_string(),
            font,
            pos,
            color,
        });
    }
}
