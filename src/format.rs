// src/format.rs
//! Текстовый формат карт и смежности для внешнего инструмента проверки.
//!
//! Форматы должны совпадать побайтно:
//! - `Pretty`: `[[1, 1],\n[2, 3]]`
//! - `Compact`: `[[1,1],[2,3]]` (или с `\n` после запятой между строками)
//! - смежность: `[(2,[1]),(3,[1,2])]`

use crate::adjacency::AdjacencyMap;
use crate::error::Result;
use crate::grid::{Grid, RegionId};

/// Стиль записи карты
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridStyle {
    /// `", "` внутри строки, строки разделены `",\n"`
    #[default]
    Pretty,
    /// `","` внутри строки, строки разделены `","` и, при `multiline`, переводом строки
    Compact { multiline: bool },
}

impl GridStyle {
    fn cell_separator(self) -> &'static str {
        match self {
            GridStyle::Pretty => ", ",
            GridStyle::Compact { .. } => ",",
        }
    }

    fn row_separator(self) -> &'static str {
        match self {
            GridStyle::Pretty | GridStyle::Compact { multiline: true } => ",\n",
            GridStyle::Compact { multiline: false } => ",",
        }
    }
}

fn join<I>(items: I, separator: &str) -> String
where
    I: IntoIterator,
    I::Item: std::fmt::Display,
{
    items
        .into_iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(separator)
}

#[must_use]
pub fn grid_to_string(grid: &Grid, style: GridStyle) -> String {
    let rows = grid
        .rows()
        .map(|row| format!("[{}]", join(row, style.cell_separator())));
    format!("[{}]", join(rows, style.row_separator()))
}

#[must_use]
pub fn adjacency_to_string(adjacency: &AdjacencyMap) -> String {
    let entries = adjacency
        .iter()
        .map(|(region, adjacent)| format!("({region},[{}])", join(adjacent, ",")));
    format!("[{}]", join(entries, ","))
}

/// Разбирает карту в любом из стилей обратно в [`Grid`].
///
/// Оба стиля — корректный JSON-массив массивов, поэтому разбор делегируется
/// `serde_json`; пробелы и переводы строк между элементами игнорируются.
pub fn parse_grid(text: &str) -> Result<Grid> {
    let rows: Vec<Vec<RegionId>> = serde_json::from_str(text)?;
    Grid::from_rows(&rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adjacency::analyze_adjacency;
    use crate::error::MapError;

    fn sample() -> Grid {
        Grid::from_rows(&[vec![1, 1, 2], vec![3, 3, 2]]).unwrap()
    }

    #[test]
    fn pretty_style() {
        assert_eq!(
            grid_to_string(&sample(), GridStyle::Pretty),
            "[[1, 1, 2],\n[3, 3, 2]]"
        );
    }

    #[test]
    fn compact_styles() {
        assert_eq!(
            grid_to_string(&sample(), GridStyle::Compact { multiline: false }),
            "[[1,1,2],[3,3,2]]"
        );
        assert_eq!(
            grid_to_string(&sample(), GridStyle::Compact { multiline: true }),
            "[[1,1,2],\n[3,3,2]]"
        );
    }

    #[test]
    fn single_cell_grid() {
        let grid = Grid::from_rows(&[vec![1]]).unwrap();
        assert_eq!(grid_to_string(&grid, GridStyle::Pretty), "[[1]]");
    }

    #[test]
    fn zero_width_grid_is_empty_list() {
        assert_eq!(grid_to_string(&Grid::new(0, 3), GridStyle::Pretty), "[]");
    }

    #[test]
    fn adjacency_syntax() {
        let adjacency = analyze_adjacency(&sample());
        assert_eq!(adjacency_to_string(&adjacency), "[(2,[1]),(3,[1,2])]");
        assert_eq!(adjacency_to_string(&AdjacencyMap::new()), "[]");
    }

    #[test]
    fn parses_every_style() {
        for style in [
            GridStyle::Pretty,
            GridStyle::Compact { multiline: false },
            GridStyle::Compact { multiline: true },
        ] {
            let text = grid_to_string(&sample(), style);
            assert_eq!(parse_grid(&text).unwrap(), sample(), "{style:?}");
        }
    }

    #[test]
    fn rejects_malformed_text() {
        assert!(parse_grid("").is_err());
        assert!(parse_grid("[[1,2],[3]]").is_err());
        assert!(parse_grid("[[1,x]]").is_err());
        assert!(parse_grid("[[1,2]] tail").is_err());
        assert!(matches!(parse_grid("[1]"), Err(MapError::Json(_))));
        assert!(matches!(
            parse_grid("[[1,2],[3]]"),
            Err(MapError::MalformedGrid(_))
        ));
        assert!(matches!(
            parse_grid("[[0,1]]"),
            Err(MapError::MalformedGrid(_))
        ));
    }
}
