// SPDX-License-Identifier: MIT
//
// tile-grid — cell compositing and packed layers for tilegrid.
//
// The pipeline, one frame:
//
//   DataBuffer.draw / draw_sprite / fill     paint mixers (symbolic colors)
//       │
//       ▼
//   Layer.copy / copy_baked                  resolve glyphs, bake jitter,
//       │                                    quantize to 12-bit, fan out
//       ▼                                    to 6 vertices per tile
//   Surface.request_render                   dirty flag; the renderer
//                                            paints on its next frame
//
// `Layer.copy_to` runs the pipeline backwards for read-back. A `Buffer`
// bundles a DataBuffer with its Layer for the common case of one grid per
// layer. Pixels, shaders and font atlases belong to whatever implements
// `Surface`; this crate never touches them.

pub mod bound;
pub mod buffer;
pub mod config;
pub mod diff;
pub mod error;
pub mod glyph;
pub mod layer;
pub mod mixer;
pub mod surface;

pub use bound::Buffer;
pub use buffer::DataBuffer;
pub use config::GridConfig;
pub use error::GridError;
pub use glyph::{Glyph, GlyphMap, GlyphResolver};
pub use layer::{Layer, VERTICES_PER_TILE};
pub use mixer::{BakedCell, Mixer, Sprite};
pub use surface::{HeadlessSurface, RenderFlag, Surface};
