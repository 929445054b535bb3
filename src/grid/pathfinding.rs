//! Dijkstra searches over a hex grid
//!
//! Costs come from a caller-supplied step function so unit-specific
//! movement rules stay with the host game.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use ahash::AHashMap;

use crate::core::types::CellId;
use crate::grid::HexGrid;

/// Node in the open set
#[derive(Debug, Clone)]
struct PathNode {
    cell: CellId,
    cost: f32,
}

impl PartialEq for PathNode {
    fn eq(&self, other: &Self) -> bool {
        self.cell == other.cell
    }
}

impl Eq for PathNode {}

impl Ord for PathNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap, cell id breaks ties deterministically
        other
            .cost
            .partial_cmp(&self.cost)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.cell.cmp(&self.cell))
    }
}

impl PartialOrd for PathNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Cheapest cost from `origin` to every cell it can reach
///
/// `step_cost(from, to)` returns `None` for a forbidden step.
pub fn cost_to_all<G, F>(grid: &G, origin: CellId, step_cost: F) -> AHashMap<CellId, f32>
where
    G: HexGrid + ?Sized,
    F: Fn(CellId, CellId) -> Option<f32>,
{
    search(grid, origin, f32::INFINITY, step_cost)
}

/// Cells reachable from `origin` spending at most `budget`, with their cost
pub fn reachable_within<G, F>(
    grid: &G,
    origin: CellId,
    budget: f32,
    step_cost: F,
) -> AHashMap<CellId, f32>
where
    G: HexGrid + ?Sized,
    F: Fn(CellId, CellId) -> Option<f32>,
{
    search(grid, origin, budget, step_cost)
}

fn search<G, F>(grid: &G, origin: CellId, budget: f32, step_cost: F) -> AHashMap<CellId, f32>
where
    G: HexGrid + ?Sized,
    F: Fn(CellId, CellId) -> Option<f32>,
{
    let mut costs: AHashMap<CellId, f32> = AHashMap::new();
    if grid.coord_of(origin).is_none() {
        return costs;
    }

    let mut open_set = BinaryHeap::new();
    costs.insert(origin, 0.0);
    open_set.push(PathNode {
        cell: origin,
        cost: 0.0,
    });

    while let Some(current) = open_set.pop() {
        let best = *costs.get(&current.cell).unwrap_or(&f32::INFINITY);
        if current.cost > best {
            continue;
        }

        for neighbor in grid.neighbors(current.cell) {
            let Some(step) = step_cost(current.cell, neighbor) else {
                continue;
            };
            if !step.is_finite() || step < 0.0 {
                continue;
            }

            let tentative = current.cost + step;
            if tentative > budget {
                continue;
            }

            let known = *costs.get(&neighbor).unwrap_or(&f32::INFINITY);
            if tentative < known {
                costs.insert(neighbor, tentative);
                open_set.push(PathNode {
                    cell: neighbor,
                    cost: tentative,
                });
            }
        }
    }

    costs
}
