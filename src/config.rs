// src/config.rs
//! Параметры генерации карт
//!
//! Этот модуль определяет входные параметры генератора:
//! - размеры сетки и склонность регионов к росту (`growth_bias`);
//! - параметры пакетной генерации (серии карт).
//!
//! Все структуры поддерживают загрузку из TOML. Проверка диапазонов выполняется
//! здесь, до запуска генерации: ядро не получает недопустимых параметров.

use crate::error::{MapError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Склонность к росту по умолчанию
pub const DEFAULT_GROWTH_BIAS: u32 = 40;

/// Допустимый диапазон склонности к росту (в процентах)
pub const GROWTH_BIAS_RANGE: std::ops::RangeInclusive<u32> = 1..=100;

/// Параметры генерации одной карты
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MapParameters {
    /// Ширина карты в клетках (> 0)
    pub width: u32,

    /// Высота карты в клетках (> 0)
    pub height: u32,

    /// Вероятность (1–100) того, что регион расширится в каждом из направлений:
    /// - `1` — почти все регионы из одной клетки,
    /// - `100` — регион растёт, пока не упрётся в границы или чужие клетки.
    #[serde(default = "default_growth_bias")]
    pub growth_bias: u32,

    /// Сид генератора случайных чисел (`None` — случайный сид)
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_growth_bias() -> u32 {
    DEFAULT_GROWTH_BIAS
}

impl MapParameters {
    #[must_use]
    pub fn new(width: u32, height: u32, growth_bias: u32) -> Self {
        Self {
            width,
            height,
            growth_bias,
            seed: None,
        }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Проверяет предусловия генератора.
    ///
    /// # Ошибки
    /// - [`MapError::InvalidDimensions`], если ширина или высота равна нулю;
    /// - [`MapError::InvalidGrowthBias`], если `growth_bias` вне `[1, 100]`.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(MapError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if !GROWTH_BIAS_RANGE.contains(&self.growth_bias) {
            return Err(MapError::InvalidGrowthBias(self.growth_bias));
        }
        Ok(())
    }

    /// Загружает и проверяет параметры из TOML-файла
    ///
    /// # Пример
    /// ```toml
    /// # map.toml
    /// width = 12
    /// height = 8
    /// growth_bias = 60
    /// seed = 42
    /// ```
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let params: Self = toml::from_str(&contents)?;
        params.validate()?;
        Ok(params)
    }
}

/// Параметры пакетной генерации (серии карт с одинаковыми настройками)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BatteryParameters {
    /// Количество карт в серии (> 0)
    pub number_of_maps: usize,

    /// Настройки каждой карты серии
    #[serde(flatten)]
    pub map: MapParameters,
}

impl BatteryParameters {
    pub fn validate(&self) -> Result<()> {
        if self.number_of_maps == 0 {
            return Err(MapError::InvalidBatchSize(self.number_of_maps));
        }
        self.map.validate()
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let params: Self = toml::from_str(&contents)?;
        params.validate()?;
        Ok(params)
    }
}
