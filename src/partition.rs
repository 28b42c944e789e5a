// src/partition.rs
//! Разбиение сетки на регионы случайным наращиванием (flood fill).
//!
//! Регионы строятся строго по очереди: из случайной свободной клетки регион
//! расширяется в соседние свободные клетки (вверх, вниз, влево, вправо), каждый
//! раз с вероятностью `growth_bias / 100`. Когда расти больше некуда, выбирается
//! затравка следующего региона. Генерация заканчивается, когда свободных клеток
//! не осталось.

use crate::adjacency::regions_are_connected;
use crate::available::AvailableSet;
use crate::config::MapParameters;
use crate::error::Result;
use crate::grid::{Coordinate, Direction, Grid, RegionId};
use crate::random::RandomSource;
use log::{debug, trace};

/// Генерирует полностью размеченную карту регионов.
///
/// # Ошибки
/// Возвращает ошибку проверки параметров до начала генерации; частично
/// заполненная карта никогда не возвращается.
pub fn generate_map<R: RandomSource + ?Sized>(
    params: &MapParameters,
    rng: &mut R,
) -> Result<Grid> {
    params.validate()?;

    let mut grid = Grid::new(params.width, params.height);
    let mut available = AvailableSet::full(params.width, params.height);
    let mut region: RegionId = 1;

    while !available.is_empty() {
        let seed = rng.pick_uniform(&available)?;
        let area = expand_region(
            &mut grid,
            &mut available,
            seed,
            region,
            params.growth_bias,
            rng,
        );
        trace!("region {region}: seed ({}, {}), {area} cells", seed.x, seed.y);
        region += 1;
    }

    debug_assert!(
        regions_are_connected(&grid),
        "generated region is split into several components"
    );
    debug!(
        "Generated {}x{} map with {} regions (growth bias {})",
        params.width,
        params.height,
        region - 1,
        params.growth_bias
    );
    Ok(grid)
}

fn claim(grid: &mut Grid, available: &mut AvailableSet, coord: Coordinate, region: RegionId) {
    grid.set(coord, region);
    available.remove(coord);
}

/// Наращивает регион из затравки; возвращает его площадь.
///
/// Явный стек кадров `(клетка, следующее направление)` повторяет порядок
/// рекурсивного обхода: соседи проверяются вверх, вниз, влево, вправо, и
/// следующий сосед проверяется только после полного роста из предыдущего.
/// Монета бросается только для свободных соседей.
fn expand_region<R: RandomSource + ?Sized>(
    grid: &mut Grid,
    available: &mut AvailableSet,
    seed: Coordinate,
    region: RegionId,
    growth_bias: u32,
    rng: &mut R,
) -> usize {
    claim(grid, available, seed, region);
    let mut area = 1;
    let mut stack = vec![(seed, 0_usize)];

    while let Some(frame) = stack.last_mut() {
        let (coord, next) = *frame;
        let Some(&direction) = Direction::ORDER.get(next) else {
            stack.pop();
            continue;
        };
        frame.1 += 1;

        let Some(neighbor) = grid.neighbor(coord, direction) else {
            continue;
        };
        if available.contains(neighbor) && rng.flip_loaded_coin(growth_bias) {
            claim(grid, available, neighbor, region);
            area += 1;
            stack.push((neighbor, 0));
        }
    }

    area
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MapError;
    use crate::grid::UNASSIGNED;
    use crate::random::{ScriptedRandom, SeededRandom};

    /// Рекурсивный вариант наращивания для сравнения порядка обхода
    fn expand_recursive(
        grid: &mut Grid,
        available: &mut AvailableSet,
        coord: Coordinate,
        region: RegionId,
        bias: u32,
        rng: &mut SeededRandom,
    ) {
        claim(grid, available, coord, region);
        for direction in Direction::ORDER {
            if let Some(n) = grid.neighbor(coord, direction) {
                if available.contains(n) && rng.flip_loaded_coin(bias) {
                    expand_recursive(grid, available, n, region, bias, rng);
                }
            }
        }
    }

    fn generate_recursive(params: &MapParameters, rng: &mut SeededRandom) -> Grid {
        let mut grid = Grid::new(params.width, params.height);
        let mut available = AvailableSet::full(params.width, params.height);
        let mut region = 1;
        while !available.is_empty() {
            let seed = rng.pick_uniform(&available).unwrap();
            expand_recursive(
                &mut grid,
                &mut available,
                seed,
                region,
                params.growth_bias,
                rng,
            );
            region += 1;
        }
        grid
    }

    #[test]
    fn explicit_stack_matches_recursive_order() {
        for (seed, bias) in [(1, 40), (2, 75), (3, 100), (4, 1), (5, 55)] {
            let params = MapParameters::new(9, 7, bias);
            let iterative = generate_map(&params, &mut SeededRandom::new(seed)).unwrap();
            let recursive = generate_recursive(&params, &mut SeededRandom::new(seed));
            assert_eq!(iterative, recursive, "seed {seed}, bias {bias}");
        }
    }

    #[test]
    fn every_cell_is_assigned() {
        let params = MapParameters::new(13, 8, 40);
        let grid = generate_map(&params, &mut SeededRandom::new(11)).unwrap();
        assert!(grid.data.iter().all(|&r| r != UNASSIGNED));
        assert_eq!(grid.region_sizes().iter().sum::<usize>(), 13 * 8);
    }

    #[test]
    fn always_succeeding_coin_fills_2x2_with_one_region() {
        let params = MapParameters::new(2, 2, 100);
        let grid = generate_map(&params, &mut ScriptedRandom::default()).unwrap();
        assert_eq!(grid.data, vec![1, 1, 1, 1]);
    }

    #[test]
    fn strip_with_full_bias_is_one_region() {
        for (w, h) in [(1, 12), (12, 1)] {
            let params = MapParameters::new(w, h, 100);
            let grid = generate_map(&params, &mut ScriptedRandom::default()).unwrap();
            assert_eq!(grid.region_count(), 1);

            let grid = generate_map(&params, &mut SeededRandom::new(9)).unwrap();
            assert_eq!(grid.region_count(), 1, "bias 100 on a {w}x{h} strip");
        }
    }

    #[test]
    fn failed_coin_flips_produce_singletons() {
        // Выбор (0,0), провал монеты вниз; затем выбор единственной клетки
        let params = MapParameters::new(1, 2, 1);
        let mut rng = ScriptedRandom::new([0, 100, 0]);
        let grid = generate_map(&params, &mut rng).unwrap();
        assert_eq!(grid.data, vec![1, 2]);
        assert_eq!(rng.remaining(), 0);
    }

    #[test]
    fn invalid_parameters_fail_before_generation() {
        let mut rng = ScriptedRandom::default();
        assert!(matches!(
            generate_map(&MapParameters::new(0, 3, 40), &mut rng),
            Err(MapError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            generate_map(&MapParameters::new(3, 3, 0), &mut rng),
            Err(MapError::InvalidGrowthBias(0))
        ));
    }

    #[test]
    fn low_bias_yields_more_regions_than_high_bias() {
        let low = generate_map(&MapParameters::new(20, 20, 5), &mut SeededRandom::new(8)).unwrap();
        let high =
            generate_map(&MapParameters::new(20, 20, 95), &mut SeededRandom::new(8)).unwrap();
        assert!(low.region_count() > high.region_count());
    }

    #[test]
    fn large_single_region_does_not_overflow_stack() {
        let params = MapParameters::new(400, 400, 100);
        let grid = generate_map(&params, &mut ScriptedRandom::default()).unwrap();
        assert_eq!(grid.region_count(), 1);
    }
}
