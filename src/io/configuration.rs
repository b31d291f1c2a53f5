//! Named constants and runtime configuration defaults

/// Suffix appended to a chiral piece's name for its mirrored family
pub const MIRRORED_SUFFIX: &str = "-mirrored";

// Pentomino defaults: the classic 6x10 box
/// Default rectangle width for square-lattice puzzles
pub const DEFAULT_RECTANGLE_WIDTH: usize = 10;
/// Default rectangle height for square-lattice puzzles
pub const DEFAULT_RECTANGLE_HEIGHT: usize = 6;

// Progress display settings
/// Search nodes between progress refreshes
pub const PROGRESS_REFRESH_NODES: u64 = 4096;
/// Spinner tick interval in milliseconds
pub const PROGRESS_TICK_MS: u64 = 120;

// Rendering settings
/// Pixels per lattice unit in rendered images
pub const CELL_PIXELS: u32 = 32;
/// Blank border around rendered images, in pixels
pub const IMAGE_MARGIN: u32 = 8;
/// Colour of region cells left uncovered
pub const UNCOVERED_COLOR: [u8; 4] = [220, 220, 220, 255];
/// Colour drawn along cell edges
pub const EDGE_COLOR: [u8; 4] = [40, 40, 40, 255];
/// Width of cell edges in pixels
pub const EDGE_PIXELS: f64 = 1.0;

// Output settings
/// File name prefix for rendered covers
pub const OUTPUT_PREFIX: &str = "cover";
/// Character marking uncovered cells in text renderings
pub const EMPTY_CELL_CHAR: char = '.';
