use crate::grid::Coordinate;

/// Множество ещё не занятых клеток.
///
/// Вектор координат плюс обратный индекс «клетка → позиция в векторе»:
/// проверка принадлежности, выборка по позиции и удаление работают за O(1)
/// (удаление переставляет последний элемент на место удалённого).
#[derive(Debug, Clone)]
pub struct AvailableSet {
    width: u32,
    height: u32,
    cells: Vec<Coordinate>,
    slots: Vec<Option<usize>>,
}

impl AvailableSet {
    /// Создаёт множество, содержащее все клетки карты в построчном порядке
    #[must_use]
    pub fn full(width: u32, height: u32) -> Self {
        let total = width as usize * height as usize;
        let mut cells = Vec::with_capacity(total);
        for y in 0..height {
            for x in 0..width {
                cells.push(Coordinate::new(x, y));
            }
        }
        let slots = (0..total).map(Some).collect();

        Self {
            width,
            height,
            cells,
            slots,
        }
    }

    #[inline]
    fn slot_index(&self, coord: Coordinate) -> Option<usize> {
        (coord.x < self.width && coord.y < self.height)
            .then(|| coord.y as usize * self.width as usize + coord.x as usize)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[must_use]
    pub fn contains(&self, coord: Coordinate) -> bool {
        self.slot_index(coord)
            .is_some_and(|idx| self.slots[idx].is_some())
    }

    /// Элемент на позиции `position` (порядок внутри множества произвольный)
    #[must_use]
    pub fn get(&self, position: usize) -> Option<Coordinate> {
        self.cells.get(position).copied()
    }

    /// Удаляет клетку; возвращает `false`, если её уже не было.
    pub fn remove(&mut self, coord: Coordinate) -> bool {
        let Some(idx) = self.slot_index(coord) else {
            return false;
        };
        let Some(position) = self.slots[idx].take() else {
            return false;
        };

        self.cells.swap_remove(position);
        if let Some(&moved) = self.cells.get(position) {
            if let Some(moved_idx) = self.slot_index(moved) {
                self.slots[moved_idx] = Some(position);
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_every_cell() {
        let set = AvailableSet::full(3, 2);
        assert_eq!(set.len(), 6);
        assert_eq!(set.get(0), Some(Coordinate::new(0, 0)));
        assert_eq!(set.get(5), Some(Coordinate::new(2, 1)));
        assert!(set.contains(Coordinate::new(1, 1)));
        assert!(!set.contains(Coordinate::new(3, 0)));
    }

    #[test]
    fn remove_keeps_index_consistent() {
        let mut set = AvailableSet::full(2, 2);
        assert!(set.remove(Coordinate::new(0, 0)));
        assert!(!set.remove(Coordinate::new(0, 0)));
        assert!(!set.contains(Coordinate::new(0, 0)));

        // Последняя клетка заняла освободившуюся позицию
        assert_eq!(set.get(0), Some(Coordinate::new(1, 1)));
        assert!(set.remove(Coordinate::new(1, 1)));
        assert!(set.remove(Coordinate::new(1, 0)));
        assert!(set.remove(Coordinate::new(0, 1)));
        assert!(set.is_empty());
    }

    #[test]
    fn out_of_bounds_is_never_available() {
        let mut set = AvailableSet::full(1, 1);
        assert!(!set.remove(Coordinate::new(0, 1)));
        assert_eq!(set.len(), 1);
    }
}
