use crate::error::{MapError, Result};
use serde::{Deserialize, Serialize};

/// Идентификатор региона: 1, 2, 3, … (0 — клетка ещё не занята)
pub type RegionId = u32;

/// Значение незанятой клетки
pub const UNASSIGNED: RegionId = 0;

/// Координата клетки: `x` — столбец, `y` — строка
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: u32,
    pub y: u32,
}

impl Coordinate {
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Направления расширения региона в фиксированном порядке обхода
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Порядок обхода соседей: вверх, вниз, влево, вправо
    pub const ORDER: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];
}

/// Прямоугольная карта регионов, хранится построчно
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub width: u32,
    pub height: u32,
    pub data: Vec<RegionId>,
}

impl Grid {
    /// Создаёт карту, в которой все клетки ещё не заняты
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![UNASSIGNED; width as usize * height as usize],
        }
    }

    /// Строит карту из строк; все строки должны быть одной непустой длины,
    /// а каждая клетка должна принадлежать региону (id >= 1).
    pub fn from_rows(rows: &[Vec<RegionId>]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if width == 0 || height == 0 {
            return Err(MapError::InvalidDimensions {
                width: width as u32,
                height: height as u32,
            });
        }
        if let Some(bad) = rows.iter().position(|row| row.len() != width) {
            return Err(MapError::MalformedGrid(format!(
                "row {bad} has {} cells, expected {width}",
                rows[bad].len()
            )));
        }
        if let Some((y, x)) = rows.iter().enumerate().find_map(|(y, row)| {
            row.iter()
                .position(|&region| region == UNASSIGNED)
                .map(|x| (y, x))
        }) {
            return Err(MapError::MalformedGrid(format!(
                "cell ({x}, {y}) has no region, ids start at 1"
            )));
        }

        Ok(Self {
            width: width as u32,
            height: height as u32,
            data: rows.concat(),
        })
    }

    #[inline]
    fn index(&self, coord: Coordinate) -> usize {
        coord.y as usize * self.width as usize + coord.x as usize
    }

    #[must_use]
    pub fn contains(&self, coord: Coordinate) -> bool {
        coord.x < self.width && coord.y < self.height
    }

    #[must_use]
    pub fn get(&self, coord: Coordinate) -> RegionId {
        self.data[self.index(coord)]
    }

    pub fn set(&mut self, coord: Coordinate, region: RegionId) {
        let idx = self.index(coord);
        self.data[idx] = region;
    }

    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.data.len()
    }

    /// Соседняя клетка в заданном направлении, если она внутри карты
    #[must_use]
    pub fn neighbor(&self, coord: Coordinate, direction: Direction) -> Option<Coordinate> {
        let Coordinate { x, y } = coord;
        let next = match direction {
            Direction::Up => Coordinate::new(x, y.checked_sub(1)?),
            Direction::Down => Coordinate::new(x, y + 1),
            Direction::Left => Coordinate::new(x.checked_sub(1)?, y),
            Direction::Right => Coordinate::new(x + 1, y),
        };
        self.contains(next).then_some(next)
    }

    /// Все координаты карты в построчном порядке
    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> + use<> {
        let (width, height) = (self.width, self.height);
        (0..height).flat_map(move |y| (0..width).map(move |x| Coordinate::new(x, y)))
    }

    /// Строки карты; у карты нулевой ширины строк нет
    pub fn rows(&self) -> impl Iterator<Item = &[RegionId]> {
        self.data.chunks(self.width.max(1) as usize)
    }

    /// Количество регионов (наибольший идентификатор на карте)
    #[must_use]
    pub fn region_count(&self) -> u32 {
        self.data.iter().copied().max().unwrap_or(UNASSIGNED)
    }

    /// Площадь каждого региона; индекс `i` соответствует региону `i + 1`
    #[must_use]
    pub fn region_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.region_count() as usize];
        for &region in &self.data {
            if region != UNASSIGNED {
                sizes[region as usize - 1] += 1;
            }
        }
        sizes
    }
}
