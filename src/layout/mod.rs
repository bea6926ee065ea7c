mod geometry;
pub use geometry::*;
mod table;
pub use table::*;
mod day_grid;
pub use day_grid::*;
mod week_grid;
pub use week_grid::*;
