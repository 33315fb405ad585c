// SPDX-License-Identifier: MIT
//
// Buffer — a DataBuffer bound to a Layer.
//
// Paint through the buffer (it derefs to its DataBuffer), then `render` to
// pack it into the layer. `load` goes the other way and replaces the
// buffer's content with what the layer holds.

use std::ops::{Deref, DerefMut};

use tile_color::RandomSource;

use crate::buffer::DataBuffer;
use crate::error::Result;
use crate::layer::Layer;

/// A [`DataBuffer`] kept in sync with one [`Layer`].
#[derive(Debug)]
pub struct Buffer {
    data: DataBuffer,
    layer: Layer,
}

impl Buffer {
    /// Bind a fresh buffer of the layer's size, loaded from the layer.
    #[must_use]
    pub fn new(layer: Layer) -> Self {
        let mut data = DataBuffer::new(layer.width(), layer.height());
        layer.copy_to(&mut data);
        Self { data, layer }
    }

    /// Push the buffer into the layer.
    ///
    /// # Errors
    ///
    /// See [`Layer::copy`].
    pub fn render(&mut self) -> Result<()> {
        self.layer.copy(&self.data)
    }

    /// Push the buffer into the layer with jitter realized.
    ///
    /// # Errors
    ///
    /// See [`Layer::copy_baked`].
    pub fn render_baked<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> Result<()> {
        self.layer.copy_baked(&self.data, rng)
    }

    /// Replace the buffer's content with the layer's.
    pub fn load(&mut self) {
        self.layer.copy_to(&mut self.data);
    }

    #[must_use]
    pub const fn layer(&self) -> &Layer {
        &self.layer
    }

    /// Mutable access to the layer, e.g. to detach it.
    pub fn layer_mut(&mut self) -> &mut Layer {
        &mut self.layer
    }

    /// Unbind, handing back both halves.
    #[must_use]
    pub fn into_parts(self) -> (DataBuffer, Layer) {
        (self.data, self.layer)
    }
}

impl Deref for Buffer {
    type Target = DataBuffer;

    fn deref(&self) -> &DataBuffer {
        &self.data
    }
}

impl DerefMut for Buffer {
    fn deref_mut(&mut self) -> &mut DataBuffer {
        &mut self.data
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::error::GridError;
    use crate::glyph::Glyph;
    use crate::surface::HeadlessSurface;
    use pretty_assertions::assert_eq;
    use tile_color::Color;

    fn bound(width: u16, height: u16) -> (Buffer, Rc<HeadlessSurface>) {
        let surface = Rc::new(HeadlessSurface::default());
        let layer = Layer::new(width, height, surface.clone());
        (Buffer::new(layer), surface)
    }

    #[test]
    fn new_loads_the_layer() {
        let surface = Rc::new(HeadlessSurface::default());
        let mut layer = Layer::new(2, 1, surface);
        layer.set(1, 42, 0xf00, 0x0f0).unwrap();

        let buf = Buffer::new(layer);
        assert_eq!(buf.size(), (2, 1));
        let cell = buf.get(1, 0).unwrap();
        assert_eq!(cell.ch, Some(Glyph::Index(42)));
        assert_eq!(cell.fg.to_int(), 0xf00);
        assert_eq!(cell.bg.to_int(), 0x0f0);
    }

    #[test]
    fn render_packs_and_requests() {
        let (mut buf, surface) = bound(2, 2);
        buf.draw(1, 1, Some(Glyph::Char('Z')), Some(Color::WHITE), None)
            .unwrap();
        buf.render().unwrap();
        assert_eq!(buf.layer().tile(3), Some((90, 0xfff, 0)));
        assert!(surface.flag.take());
    }

    #[test]
    fn load_discards_unrendered_paint() {
        let (mut buf, _) = bound(1, 1);
        buf.draw(0, 0, Some(Glyph::Index(8)), None, None).unwrap();
        buf.render().unwrap();
        buf.draw(0, 0, Some(Glyph::Index(9)), None, None).unwrap();
        buf.load();
        assert_eq!(buf.get(0, 0).unwrap().ch, Some(Glyph::Index(8)));
    }

    #[test]
    fn render_baked_uses_the_source() {
        let (mut buf, _) = bound(1, 1);
        let dancing = Color::BLACK.dancing(0.0, 20.0, 0.0, 0.0);
        buf.fill(Some(Glyph::Index(1)), Some(dancing), None);
        let mut rng = tile_color::random::Sequence::new(vec![0.99]);
        buf.render_baked(&mut rng).unwrap();
        assert_eq!(buf.layer().tile(0), Some((1, 0x300, 0)));
    }

    #[test]
    fn detached_layer_fails_render() {
        let (mut buf, _) = bound(1, 1);
        buf.layer_mut().detach();
        assert!(matches!(buf.render(), Err(GridError::Detached)));
        let (data, layer) = buf.into_parts();
        assert_eq!(data.size(), (1, 1));
        assert!(layer.is_detached());
    }
}
