// SPDX-License-Identifier: MIT
//
// tilegrid — headless preview of the tile compositor.
//
// Wires both crates together the way a real front end would, with the GPU
// swapped for the terminal:
//
//   tile-color → colors, palette, jitter source
//   tile-grid  → mixers, buffer, packed layer, headless surface
//
// Each frame:
//
//   scene (painted once, symbolic colors)
//       → Buffer::render_baked   jitter realized, packed into the layer
//       → AnsiRenderer::paint    24-bit SGR, only while a render is pending
//       → Layer::copy_to + diff  how much of the frame actually moved
//
// The scene is a sky over dancing water with a sun sprite blended on top
// and a caption whose colors are pushed apart until legible.

mod render;

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Context;
use clap::Parser;
use log::info;

use tile_color::{Color, Palette, SeparateParams};
use tile_grid::diff;
use tile_grid::{Buffer, DataBuffer, Glyph, GridConfig, HeadlessSurface, Layer, Sprite};

use crate::render::AnsiRenderer;

const CAPTION: &str = "tilegrid";

#[derive(Parser)]
#[command(name = "tilegrid", about = "Render a composited tile scene as ANSI text")]
struct Cli {
    /// Grid columns (overrides the config file)
    #[arg(long)]
    width: Option<u16>,
    /// Grid rows (overrides the config file)
    #[arg(long)]
    height: Option<u16>,
    /// Number of frames to bake and print
    #[arg(long, default_value_t = 3)]
    frames: u32,
    /// Seed for the color jitter (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,
    /// JSON grid config
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let palette = config.palette()?;
    info!(
        "tilegrid: {}x{} grid, {} frames",
        config.width, config.height, cli.frames
    );

    let surface = Rc::new(HeadlessSurface::default());
    let layer = Layer::new(config.width, config.height, surface.clone());
    let mut buffer = Buffer::new(layer);
    paint_scene(&mut buffer, &palette, &config.separate)?;

    let renderer = AnsiRenderer::new(surface);
    let mut rng = config.random_source();
    let mut out = BufWriter::new(io::stdout().lock());
    let mut frame = config.data_buffer();
    let mut prev: Option<DataBuffer> = None;

    for n in 0..cli.frames {
        buffer.render_baked(&mut rng)?;
        renderer.paint(buffer.layer(), &mut out)?;
        writeln!(out)?;

        buffer.layer().copy_to(&mut frame);
        if let Some(prev) = &prev {
            let stats = diff::stats(prev, &frame)?;
            info!(
                "frame {n}: {} of {} cells changed",
                stats.changed,
                stats.total()
            );
        }
        prev = Some(frame.clone());
    }

    out.flush()?;
    Ok(())
}

fn load_config(cli: &Cli) -> anyhow::Result<GridConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            GridConfig::from_json(&json).with_context(|| format!("parsing {}", path.display()))?
        }
        None => GridConfig::default(),
    };
    if let Some(width) = cli.width {
        config.width = width;
    }
    if let Some(height) = cli.height {
        config.height = height;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    Ok(config)
}

// ─── Scene ───────────────────────────────────────────────────────────────────

fn paint_scene(
    buf: &mut DataBuffer,
    palette: &Palette,
    params: &SeparateParams,
) -> anyhow::Result<()> {
    let (width, height) = buf.size();
    if width == 0 || height == 0 {
        return Ok(());
    }
    let horizon = height / 2;

    let sky = palette.make("sky", false)?;
    let water = palette.make("blue", false)?;
    let foam = palette.make("cyan", false)?;
    let sun = palette.make("yellow", false)?;

    buf.nullify_all();

    // Sky: dark at the top, brightening toward the horizon.
    for y in 0..horizon {
        let t = 100.0 * f32::from(y + 1) / f32::from(horizon);
        let shade = Color::BLACK.mix(sky, t * 0.6);
        for x in 0..width {
            buf.draw(x, y, Some(Glyph::Char(' ')), Some(shade), Some(shade))?;
        }
    }

    // Water: shimmering waves, darker with depth.
    for y in horizon..height {
        let depth = 100.0 * f32::from(y - horizon) / f32::from(height - horizon);
        let bg = water.darken(30.0 + depth * 0.5).dancing(6.0, 0.0, 0.0, 4.0);
        let fg = foam.darken(depth * 0.4).dancing(0.0, 0.0, 12.0, 12.0);
        for x in 0..width {
            let ch = if (u32::from(x) + u32::from(y)) % 3 == 0 { '≈' } else { '~' };
            buf.draw(x, y, Some(Glyph::Char(ch)), Some(fg), Some(bg))?;
        }
    }

    // Sun: a glow sprite fading out from its center, plus a tint on the
    // water straight below it.
    let cx = f32::from(width) * 0.75;
    let cy = f32::from(horizon) * 0.5;
    let radius = f32::from(width.min(height.saturating_mul(2))) / 4.0;
    let glow = Sprite::new(None, sun, sun);
    for (x, y) in cells(width, height) {
        // Cells are about twice as tall as they are wide.
        let dx = (f32::from(x) - cx) / 2.0;
        let dy = f32::from(y) - cy;
        let d = dx.hypot(dy);
        if y < horizon && d < radius {
            let opacity = 100.0 * (1.0 - d / radius);
            buf.draw_sprite(x, y, &glow, Some(opacity))?;
        } else if y >= horizon && dx.abs() < radius / 2.0 {
            buf.get_mut(x, y)?.add(sun, 0.0, 15.0);
        }
    }

    // Caption on the horizon line, close to its background, then separated.
    let caption_width = u16::try_from(CAPTION.len()).unwrap_or(u16::MAX);
    if caption_width <= width && horizon > 0 {
        let x0 = (width - caption_width) / 2;
        let y = horizon - 1;
        for (x, ch) in (x0..).zip(CAPTION.chars()) {
            let cell = buf.get_mut(x, y)?;
            let fg = cell.bg.lighten(10.0);
            cell.draw(Some(Glyph::Char(ch)), Some(fg), None);
            cell.separate(params);
        }
    }

    Ok(())
}

fn cells(width: u16, height: u16) -> impl Iterator<Item = (u16, u16)> {
    (0..height).flat_map(move |y| (0..width).map(move |x| (x, y)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_fits_small_grids() {
        let palette = Palette::default();
        for (w, h) in [(0, 0), (1, 1), (3, 2), (20, 6)] {
            let mut buf = DataBuffer::new(w, h);
            paint_scene(&mut buf, &palette, &SeparateParams::default()).unwrap();
        }
    }

    #[test]
    fn scene_handles_very_tall_grids() {
        let mut buf = DataBuffer::new(1, u16::MAX);
        paint_scene(&mut buf, &Palette::default(), &SeparateParams::default()).unwrap();
        assert!(buf.get(0, u16::MAX - 1).unwrap().ch.is_some());
    }
}
