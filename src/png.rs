use crate::error::{MapError, Result};
use crate::grid::Grid;
use image::{ImageBuffer, Rgba};
use rand::{Rng, SeedableRng};
use std::path::Path;

/// Картинка карты регионов: каждая клетка — квадрат `cell_size × cell_size`,
/// каждый регион окрашен в свой случайный цвет.
pub struct RegionImage<'a> {
    pub grid: &'a Grid,
    pub cell_size: u32,
}

impl<'a> RegionImage<'a> {
    #[must_use]
    pub fn new(grid: &'a Grid, cell_size: u32) -> Self {
        Self {
            grid,
            cell_size: cell_size.max(1),
        }
    }

    /// Цвет для каждого региона; индекс `i` соответствует региону `i + 1`
    fn palette(&self, seed: u64) -> Vec<[u8; 4]> {
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(seed);
        (0..self.grid.region_count())
            .map(|_| {
                [
                    rng.gen_range(40..230),
                    rng.gen_range(40..230),
                    rng.gen_range(40..230),
                    255,
                ]
            })
            .collect()
    }

    /// Размер картинки в пикселях.
    ///
    /// # Ошибки
    /// [`MapError::ImageTooLarge`], если размер или буфер RGBA не помещаются в память.
    pub fn dimensions(&self) -> Result<(u32, u32)> {
        let too_large = || MapError::ImageTooLarge {
            width: self.grid.width,
            height: self.grid.height,
            cell_size: self.cell_size,
        };
        let width = self.grid.width.checked_mul(self.cell_size).ok_or_else(too_large)?;
        let height = self.grid.height.checked_mul(self.cell_size).ok_or_else(too_large)?;
        (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(4))
            .ok_or_else(too_large)?;
        Ok((width, height))
    }

    pub fn to_rgba_image(&self, seed: u64) -> Result<ImageBuffer<Rgba<u8>, Vec<u8>>> {
        let (width, height) = self.dimensions()?;
        let colors = self.palette(seed);
        let size = self.cell_size;

        Ok(ImageBuffer::from_fn(width, height, |px, py| {
            let idx = (py / size) as usize * self.grid.width as usize + (px / size) as usize;
            let region = self.grid.data[idx] as usize;
            // Незанятые клетки (0) рисуются чёрным
            Rgba(
                region
                    .checked_sub(1)
                    .and_then(|i| colors.get(i))
                    .copied()
                    .unwrap_or([0, 0, 0, 255]),
            )
        }))
    }

    pub fn save_as_png(&self, path: impl AsRef<Path>, seed: u64) -> Result<()> {
        let path = path.as_ref();
        self.to_rgba_image(seed)?.save(path).map_err(|e| match e {
            image::ImageError::IoError(source) => MapError::WriteFile {
                path: path.to_path_buf(),
                source,
            },
            other => MapError::Image(other),
        })
    }
}
