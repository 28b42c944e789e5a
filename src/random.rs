//! Источник случайности генератора.
//!
//! Генератор никогда не обращается к глобальному ГСЧ: источник передаётся явно,
//! поэтому каждая генерация воспроизводима по сиду и независима от других.

use crate::available::AvailableSet;
use crate::error::{MapError, Result};
use crate::grid::Coordinate;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;

pub trait RandomSource {
    /// Равномерное целое из замкнутого диапазона `[min, max]`, `min <= max`.
    fn uniform_int(&mut self, min: u32, max: u32) -> u32;

    /// Равномерно выбирает клетку из непустого множества свободных клеток.
    ///
    /// # Ошибки
    /// [`MapError::EmptyAvailableSet`] — выбор из пустого множества означает
    /// нарушение инварианта генератора.
    fn pick_uniform(&mut self, available: &AvailableSet) -> Result<Coordinate> {
        if available.is_empty() {
            return Err(MapError::EmptyAvailableSet);
        }
        let last = u32::try_from(available.len() - 1).unwrap_or(u32::MAX);
        let position = self.uniform_int(0, last) as usize;
        available.get(position).ok_or(MapError::EmptyAvailableSet)
    }

    /// Бросок «нагруженной монеты»: успех с вероятностью `bias / 100`.
    fn flip_loaded_coin(&mut self, bias: u32) -> bool {
        self.uniform_int(1, 100) <= bias
    }
}

/// Источник на основе `ChaCha8Rng`
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: ChaCha8Rng,
}

impl SeededRandom {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn uniform_int(&mut self, min: u32, max: u32) -> u32 {
        debug_assert!(min <= max, "empty range [{min}, {max}]");
        self.rng.gen_range(min..=max)
    }
}

/// Воспроизводит заранее заданную последовательность значений.
///
/// Каждое значение прижимается к запрошенному диапазону; после исчерпания
/// последовательности возвращается нижняя граница диапазона. Используется для
/// детерминированных сценариев: `ScriptedRandom::default()` всегда выбирает
/// первую свободную клетку, а монета с любым `bias >= 1` всегда выпадает удачно.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    values: VecDeque<u32>,
}

impl ScriptedRandom {
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }

    /// Сколько заданных значений ещё не использовано
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl RandomSource for ScriptedRandom {
    fn uniform_int(&mut self, min: u32, max: u32) -> u32 {
        self.values.pop_front().map_or(min, |v| v.clamp(min, max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_int_stays_in_range() {
        let mut rng = SeededRandom::new(42);
        for _ in 0..1000 {
            let v = rng.uniform_int(3, 7);
            assert!((3..=7).contains(&v));
        }
        assert_eq!(rng.uniform_int(5, 5), 5);
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = SeededRandom::new(7);
        let mut b = SeededRandom::new(7);
        let xs: Vec<u32> = (0..20).map(|_| a.uniform_int(1, 100)).collect();
        let ys: Vec<u32> = (0..20).map(|_| b.uniform_int(1, 100)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn coin_with_full_bias_always_succeeds() {
        let mut rng = SeededRandom::new(1);
        assert!((0..500).all(|_| rng.flip_loaded_coin(100)));
    }

    #[test]
    fn picking_from_empty_set_is_an_error() {
        let mut set = AvailableSet::full(1, 1);
        set.remove(Coordinate::new(0, 0));
        let mut rng = SeededRandom::new(0);
        assert!(matches!(
            rng.pick_uniform(&set),
            Err(MapError::EmptyAvailableSet)
        ));
    }

    #[test]
    fn pick_covers_every_cell() {
        let set = AvailableSet::full(2, 2);
        let mut rng = SeededRandom::new(3);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(rng.pick_uniform(&set).unwrap());
        }
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn scripted_values_are_clamped_then_default_to_min() {
        let mut rng = ScriptedRandom::new([0, 250, 4]);
        assert_eq!(rng.uniform_int(1, 100), 1);
        assert_eq!(rng.uniform_int(1, 100), 100);
        assert_eq!(rng.remaining(), 1);
        assert_eq!(rng.uniform_int(0, 9), 4);
        assert_eq!(rng.uniform_int(2, 9), 2);
    }
}
