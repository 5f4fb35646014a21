use std::sync::mpsc;

use anyhow::{bail, Context as _, Result};
use lumen_engine::core::{Context, Example};
use lumen_engine::device::Gpu;

use crate::common::{clear_pass, upload_rgba8, Blitter, CLEAR_COLOR};

const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;
const BYTES_PER_PIXEL: u32 = 4;

/// GPU-side copies checked against the CPU.
///
/// At init the image is copied texture to texture with its left and right
/// halves swapped, then texture to buffer and buffer to buffer into a mappable
/// buffer. The mapped bytes must match the swapped image exactly. Every frame
/// draws the copied texture.
pub struct CopyAndReadback {
    blitter: Blitter,
    source: wgpu::BindGroup,
    _texture: wgpu::Texture,
}

impl Example<Gpu> for CopyAndReadback {
    fn init(ctx: &mut Context<'_, Gpu>) -> Result<Self> {
        let gpu = &*ctx.gpu;
        let device = gpu.device();
        let blit_shader = ctx.assets.load_shader(device, "blit.wgsl")?;
        let image = ctx.assets.load_image("checker.bmp")?;
        let (width, height) = image.dimensions();
        if width % 2 != 0 {
            bail!("image width {width} is not even");
        }

        let original = upload_rgba8(
            device,
            gpu.queue(),
            "copy source",
            &image,
            FORMAT,
            1,
            wgpu::TextureUsages::COPY_SRC,
        );
        let size = original.size();
        let copy = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("copy destination"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: FORMAT,
            usage: wgpu::TextureUsages::COPY_DST
                | wgpu::TextureUsages::COPY_SRC
                | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });

        let row_bytes = width * BYTES_PER_PIXEL;
        let padded_row = padded_bytes_per_row(row_bytes);
        let buffer_size = u64::from(padded_row) * u64::from(height);
        let staging = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("copy staging"),
            size: buffer_size,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::COPY_SRC,
            mapped_at_creation: false,
        });
        let readback = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("copy readback"),
            size: buffer_size,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("copy encoder"),
        });

        let half = wgpu::Extent3d {
            width: width / 2,
            ..size
        };
        for (from, to) in [(0, width / 2), (width / 2, 0)] {
            encoder.copy_texture_to_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &original,
                    mip_level: 0,
                    origin: wgpu::Origin3d { x: from, y: 0, z: 0 },
                    aspect: wgpu::TextureAspect::All,
                },
                wgpu::TexelCopyTextureInfo {
                    texture: &copy,
                    mip_level: 0,
                    origin: wgpu::Origin3d { x: to, y: 0, z: 0 },
                    aspect: wgpu::TextureAspect::All,
                },
                half,
            );
        }

        encoder.copy_texture_to_buffer(
            copy.as_image_copy(),
            wgpu::TexelCopyBufferInfo {
                buffer: &staging,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded_row),
                    rows_per_image: Some(height),
                },
            },
            size,
        );
        encoder.copy_buffer_to_buffer(&staging, 0, &readback, 0, buffer_size);
        gpu.queue().submit(std::iter::once(encoder.finish()));

        let (tx, rx) = mpsc::channel();
        let slice = readback.slice(..);
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });
        device
            .poll(wgpu::PollType::wait_indefinitely())
            .context("waiting for the copies to finish")?;
        rx.recv()
            .context("readback mapping was never reported")?
            .context("mapping the readback buffer")?;

        let actual = {
            let mapped = slice.get_mapped_range();
            unpad_rows(&mapped, row_bytes as usize, padded_row as usize, height as usize)
        };
        readback.unmap();

        let expected = swap_halves(image.as_raw(), row_bytes as usize);
        if let Some(offset) = first_mismatch(&expected, &actual) {
            bail!("readback differs from the source at byte {offset}");
        }
        log::info!("readback of {width}x{height} copy matches ({} bytes)", actual.len());

        let blitter = Blitter::new(device, &blit_shader, gpu.surface_format());
        let view = copy.create_view(&wgpu::TextureViewDescriptor::default());
        let source = blitter.bind(device, &view);

        Ok(Self {
            blitter,
            source,
            _texture: copy,
        })
    }

    fn draw(&mut self, ctx: &mut Context<'_, Gpu>) -> Result<()> {
        ctx.render(|_, frame| {
            let mut rpass = clear_pass(&mut frame.encoder, &frame.view, "copy blit pass", CLEAR_COLOR);
            self.blitter.draw(&mut rpass, &self.source);
            Ok(())
        })
    }
}

/// Row pitch for texture/buffer copies.
fn padded_bytes_per_row(row_bytes: u32) -> u32 {
    row_bytes.div_ceil(wgpu::COPY_BYTES_PER_ROW_ALIGNMENT) * wgpu::COPY_BYTES_PER_ROW_ALIGNMENT
}

/// Drops the per-row padding of a copied image.
fn unpad_rows(data: &[u8], row_bytes: usize, padded_row: usize, rows: usize) -> Vec<u8> {
    data.chunks(padded_row)
        .take(rows)
        .flat_map(|row| &row[..row_bytes])
        .copied()
        .collect()
}

/// Each row with its left and right halves exchanged.
fn swap_halves(data: &[u8], row_bytes: usize) -> Vec<u8> {
    let half = row_bytes / 2;
    data.chunks(row_bytes)
        .flat_map(|row| row[half..].iter().chain(&row[..half]))
        .copied()
        .collect()
}

fn first_mismatch(expected: &[u8], actual: &[u8]) -> Option<usize> {
    if expected.len() != actual.len() {
        return Some(expected.len().min(actual.len()));
    }
    expected.iter().zip(actual).position(|(a, b)| a != b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_pitch_is_aligned() {
        assert_eq!(padded_bytes_per_row(256 * 4), 1024);
        assert_eq!(padded_bytes_per_row(4), 256);
        assert_eq!(padded_bytes_per_row(257 * 4), 1280);
    }

    #[test]
    fn padding_is_stripped_per_row() {
        // Two rows of three bytes in a pitch of five.
        let data = [1, 2, 3, 0, 0, 4, 5, 6, 0, 0];
        assert_eq!(unpad_rows(&data, 3, 5, 2), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn halves_swap_within_rows() {
        // 2x2 RGBA with one distinct byte value per pixel.
        let mut image = Vec::new();
        for pixel in [1u8, 2, 3, 4] {
            image.extend([pixel; 4]);
        }
        let swapped = swap_halves(&image, 8);
        assert_eq!(&swapped[..4], &[2; 4]);
        assert_eq!(&swapped[4..8], &[1; 4]);
        assert_eq!(&swapped[8..12], &[4; 4]);
        assert_eq!(&swapped[12..], &[3; 4]);
    }

    #[test]
    fn mismatch_reports_offset() {
        assert_eq!(first_mismatch(&[1, 2, 3], &[1, 2, 3]), None);
        assert_eq!(first_mismatch(&[1, 2, 3], &[1, 9, 3]), Some(1));
        assert_eq!(first_mismatch(&[1, 2, 3], &[1, 2]), Some(2));
    }
}
