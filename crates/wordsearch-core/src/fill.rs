use crate::error::GridError;
use crate::grid::Grid;
use rand::Rng;

const ALPHABET: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Give every still-empty cell a uniformly random letter A-Z. Cells holding
/// placed letters are left alone. Returns how many cells were filled.
pub fn fill_empty_cells<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) -> Result<usize, GridError> {
    let empty: Vec<_> = grid
        .positions()
        .filter(|&pos| grid.get(pos).map(|c| c.is_empty()).unwrap_or(false))
        .collect();

    let mut filled = 0;
    for pos in empty {
        let letter = ALPHABET[rng.gen_range(0..ALPHABET.len())] as char;
        if grid.fill_empty(pos, letter)? {
            filled += 1;
        }
    }
    Ok(filled)
}
