//! Influence diffusion over the hex grid
//!
//! A source magnitude spreads from an origin cell to every cell within a
//! radius. Decay (`rolloff`) and combination (`aggregate`) are pluggable.

use crate::core::types::CellId;
use crate::grid::HexGrid;

/// Standard rolloff: magnitude halves with every hex of distance
pub fn halving_rolloff(magnitude: f32, distance: u32) -> f32 {
    magnitude / 2f32.powi(distance as i32)
}

/// Standard aggregate: contributions add up
pub fn sum_aggregate(current: f32, contribution: f32) -> f32 {
    current + contribution
}

/// Diffuse `magnitude` from `origin` into `field`
///
/// Touches every on-grid cell within `max_radius` (distance 0 included) and
/// nothing else. Cells whose index falls outside `field` are skipped.
pub fn apply<G, R, A>(
    magnitude: f32,
    field: &mut [f32],
    grid: &G,
    origin: CellId,
    max_radius: u32,
    rolloff: R,
    aggregate: A,
) where
    G: HexGrid + ?Sized,
    R: Fn(f32, u32) -> f32,
    A: Fn(f32, f32) -> f32,
{
    for cell in grid.cells_in_radius(origin, max_radius) {
        let Some(slot) = field.get_mut(cell.index()) else {
            continue;
        };
        let decayed = rolloff(magnitude, grid.distance(origin, cell));
        *slot = aggregate(*slot, decayed);
    }
}

/// `apply` with the standard halving rolloff and sum aggregate
pub fn apply_standard<G: HexGrid + ?Sized>(
    magnitude: f32,
    field: &mut [f32],
    grid: &G,
    origin: CellId,
    max_radius: u32,
) {
    apply(
        magnitude,
        field,
        grid,
        origin,
        max_radius,
        halving_rolloff,
        sum_aggregate,
    );
}
