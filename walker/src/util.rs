use image::{DynamicImage, GenericImageView};

use crate::grid::{Grid, Tile};

/// Builds a grid from a thresholded image: a pixel whose red channel is
/// below 128 becomes a wall, everything else is empty. No start or target
/// markers are derived.
pub fn parse_img(img: &DynamicImage) -> Result<Grid, anyhow::Error> {
    let width = img.width() as usize;
    let height = img.height() as usize;

    let mut tiles = vec![vec![Tile::Empty; width]; height];

    for row in 0..height {
        for col in 0..width {
            let p = img.get_pixel(col as u32, row as u32);

            if p.0[0] < 128 {
                tiles[row][col] = Tile::Wall;
            }
        }
    }

    Ok(Grid::from_parts(tiles, None, None))
}
