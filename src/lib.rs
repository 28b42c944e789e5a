pub mod adjacency;
pub mod available;
pub mod battery;
pub mod config;
pub mod error;
pub mod format;
pub mod grid;
pub mod partition;
pub mod png;
pub mod random;

pub use adjacency::{AdjacencyMap, analyze_adjacency};
pub use battery::{GeneratedMap, generate_battery};
pub use config::{BatteryParameters, DEFAULT_GROWTH_BIAS, MapParameters};
pub use error::{MapError, Result};
pub use format::{GridStyle, adjacency_to_string, grid_to_string, parse_grid};
pub use grid::{Coordinate, Grid, RegionId};
pub use partition::generate_map;
pub use random::{RandomSource, ScriptedRandom, SeededRandom};
