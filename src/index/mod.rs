pub mod constants;
mod indexing;
mod resolution;

pub use constants::{
    DEFAULT_FINEST_RESOLUTION, DEFAULT_RESOLUTION_STEPS, DEFAULT_RING_RADIUS, SF_LAND_BOUNDARY,
    SF_SEED_POINTS,
};
pub use indexing::{cell_center, cell_to_polygon, lat_lng_to_cell, parse_hex_id, to_resolution};
pub use resolution::{
    ResolutionSelector, ResolutionStep, default_resolution_steps, resolution_for_zoom,
};
