// src/battery.rs
//! Пакетная генерация серии карт.
//!
//! Каждая карта получает собственный источник случайности с сидом
//! `base_seed + index`, поэтому серия воспроизводима, а карты не влияют друг
//! на друга даже при параллельной генерации.

use crate::adjacency::{AdjacencyMap, analyze_adjacency};
use crate::config::{BatteryParameters, MapParameters};
use crate::error::{MapError, Result};
use crate::format::{GridStyle, adjacency_to_string, grid_to_string};
use crate::grid::Grid;
use crate::partition::generate_map;
use crate::random::SeededRandom;
use log::{debug, info};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Сгенерированная карта вместе со смежностью её регионов
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedMap {
    pub index: usize,
    pub seed: u64,
    pub parameters: MapParameters,
    pub grid: Grid,
    pub adjacency: AdjacencyMap,
}

impl GeneratedMap {
    /// Генерирует одну карту; без сида в параметрах берётся случайный.
    pub fn generate(index: usize, params: &MapParameters) -> Result<Self> {
        let seed = params.seed.unwrap_or_else(rand::random);
        let mut rng = SeededRandom::new(seed);
        let grid = generate_map(params, &mut rng)?;
        let adjacency = analyze_adjacency(&grid);

        Ok(Self {
            index,
            seed,
            parameters: MapParameters {
                seed: Some(seed),
                ..*params
            },
            grid,
            adjacency,
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Генерирует серию карт в порядке индексов.
pub fn generate_battery(params: &BatteryParameters) -> Result<Vec<GeneratedMap>> {
    params.validate()?;
    let base_seed = params.map.seed.unwrap_or_else(rand::random);
    info!(
        "Generating {} maps {}x{} (growth bias {}, base seed {base_seed})",
        params.number_of_maps, params.map.width, params.map.height, params.map.growth_bias
    );

    let build = |index: usize| {
        let map_params = params
            .map
            .with_seed(base_seed.wrapping_add(index as u64));
        GeneratedMap::generate(index, &map_params)
    };

    #[cfg(feature = "parallel")]
    let maps = (0..params.number_of_maps)
        .into_par_iter()
        .map(build)
        .collect::<Result<Vec<_>>>()?;

    #[cfg(not(feature = "parallel"))]
    let maps = (0..params.number_of_maps)
        .map(build)
        .collect::<Result<Vec<_>>>()?;

    Ok(maps)
}

/// Записывает серию в каталог: `map_<i>.txt` (компактная карта) и
/// `adj_<i>.txt` (смежность). Возвращает пути записанных файлов.
pub fn write_battery(maps: &[GeneratedMap], dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).map_err(|source| MapError::WriteFile {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut written = Vec::with_capacity(maps.len() * 2);
    for map in maps {
        let files = [
            (
                format!("map_{}.txt", map.index),
                grid_to_string(&map.grid, GridStyle::Compact { multiline: false }),
            ),
            (
                format!("adj_{}.txt", map.index),
                adjacency_to_string(&map.adjacency),
            ),
        ];
        for (name, contents) in files {
            let path = dir.join(name);
            fs::write(&path, contents).map_err(|source| MapError::WriteFile {
                path: path.clone(),
                source,
            })?;
            written.push(path);
        }
        debug!(
            "Map {} (seed {}): {} regions",
            map.index,
            map.seed,
            map.grid.region_count()
        );
    }
    Ok(written)
}
