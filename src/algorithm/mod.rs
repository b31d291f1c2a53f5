/// Dense bitset over row and key indices
pub mod bitset;
/// Pipeline orchestration from catalogue and region to covers
pub mod executor;
/// Exact-cover matrix construction
pub mod matrix;
/// Symmetry-distinct orientations of a shape
pub mod orientation;
/// Placement enumeration and mirror handling
pub mod placement;
/// Pruning policies: 2x2 blocks and ray clues
pub mod pruning;
/// Depth-first exact-cover search
pub mod search;
/// Raw solutions to piece-to-cells covers
pub mod translation;
