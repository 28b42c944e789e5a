// src/adjacency.rs
//! Смежность регионов.
//!
//! Каждая пара соседних регионов `(a, b)` хранится один раз: под ключом
//! `max(a, b)` в упорядоченном множестве лежит `min(a, b)`.

use crate::grid::{Coordinate, Direction, Grid, RegionId, UNASSIGNED};
use petgraph::graph::{NodeIndex, UnGraph};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjacencyMap {
    entries: BTreeMap<RegionId, BTreeSet<RegionId>>,
}

impl AdjacencyMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Добавляет пару соседей в каноническом виде; повторная вставка и пара
    /// региона с самим собой ничего не меняют.
    pub fn insert(&mut self, region: RegionId, other: RegionId) -> bool {
        if region == other {
            return false;
        }
        let (main, adjacent) = (region.max(other), region.min(other));
        self.entries.entry(main).or_default().insert(adjacent)
    }

    #[must_use]
    pub fn contains(&self, region: RegionId, other: RegionId) -> bool {
        let (main, adjacent) = (region.max(other), region.min(other));
        self.entries
            .get(&main)
            .is_some_and(|set| set.contains(&adjacent))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Количество различных пар соседей
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.entries.values().map(BTreeSet::len).sum()
    }

    /// Записи `(регион, меньшие соседи)` по возрастанию региона
    pub fn iter(&self) -> impl Iterator<Item = (RegionId, &BTreeSet<RegionId>)> {
        self.entries.iter().map(|(&region, set)| (region, set))
    }

    /// Все пары `(большой, меньший)` в каноническом порядке
    pub fn pairs(&self) -> impl Iterator<Item = (RegionId, RegionId)> + '_ {
        self.iter()
            .flat_map(|(main, set)| set.iter().map(move |&adjacent| (main, adjacent)))
    }

    /// Неориентированный граф регионов: вершина `i - 1` соответствует региону `i`.
    #[must_use]
    pub fn to_graph(&self, region_count: u32) -> UnGraph<RegionId, ()> {
        let mut graph = UnGraph::with_capacity(region_count as usize, self.pair_count());
        for region in 1..=region_count {
            graph.add_node(region);
        }
        // Регион 0 означает незанятую клетку и в граф не попадает
        for (main, adjacent) in self.pairs().filter(|&(_, adjacent)| adjacent != UNASSIGNED) {
            // Ключи могут выходить за region_count, если граф строится по чужой карте
            while graph.node_count() < main as usize {
                let next = graph.node_count() as RegionId + 1;
                graph.add_node(next);
            }
            graph.add_edge(
                NodeIndex::new(main as usize - 1),
                NodeIndex::new(adjacent as usize - 1),
                (),
            );
        }
        graph
    }
}

/// Строит карту смежности, сравнивая каждую клетку с правой и нижней соседкой.
#[must_use]
pub fn analyze_adjacency(grid: &Grid) -> AdjacencyMap {
    let mut adjacency = AdjacencyMap::new();

    for coord in grid.coordinates() {
        let region = grid.get(coord);
        for direction in [Direction::Right, Direction::Down] {
            if let Some(next) = grid.neighbor(coord, direction) {
                let other = grid.get(next);
                if other != region {
                    adjacency.insert(region, other);
                }
            }
        }
    }

    adjacency
}

/// Проверяет, что клетки каждого региона образуют одну 4-связную компоненту.
#[must_use]
pub fn regions_are_connected(grid: &Grid) -> bool {
    let mut seen = vec![false; grid.cell_count()];
    let mut visited_regions = BTreeSet::new();
    let index = |c: Coordinate| c.y as usize * grid.width as usize + c.x as usize;

    for start in grid.coordinates() {
        if seen[index(start)] {
            continue;
        }
        let region = grid.get(start);
        if !visited_regions.insert(region) {
            // Второй кусок уже встреченного региона
            return false;
        }

        seen[index(start)] = true;
        let mut stack = vec![start];
        while let Some(coord) = stack.pop() {
            for direction in Direction::ORDER {
                if let Some(next) = grid.neighbor(coord, direction) {
                    if !seen[index(next)] && grid.get(next) == region {
                        seen[index(next)] = true;
                        stack.push(next);
                    }
                }
            }
        }
    }
    true
}
