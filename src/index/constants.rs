/// Flood-fill ring distance around each seed cell
pub const DEFAULT_RING_RADIUS: u32 = 30;

/// Zoom breakpoints as `(max_zoom, resolution, inclusive)`:
/// below 9 → 7, up to 11 → 8, up to 13 → 9, below 15 → 10
pub const DEFAULT_RESOLUTION_STEPS: [(f64, u8, bool); 4] = [
    (9.0, 7, false),
    (11.0, 8, true),
    (13.0, 9, true),
    (15.0, 10, false),
];

/// Resolution used above the last breakpoint
pub const DEFAULT_FINEST_RESOLUTION: u8 = 11;

/// Simplified San Francisco land boundary as a closed `(lng, lat)` ring
pub const SF_LAND_BOUNDARY: [(f64, f64); 5] = [
    (-122.513272, 37.708075),
    (-122.513272, 37.811749),
    (-122.346582, 37.811749),
    (-122.346582, 37.708075),
    (-122.513272, 37.708075),
];

/// Representative `(lat, lng)` locations spread across San Francisco
pub const SF_SEED_POINTS: [(f64, f64); 10] = [
    (37.7749, -122.4194),  // City center
    (37.789, -122.401),    // Financial District
    (37.774, -122.419),    // Hayes Valley
    (37.761, -122.435),    // Mission District
    (37.779, -122.433),    // Lower Haight
    (37.799, -122.407),    // North Beach
    (37.786, -122.44),     // Japantown
    (37.7759, -122.4733),  // Inner Sunset
    (37.8025, -122.4382),  // Pacific Heights
    (37.7575, -122.3927),  // Potrero Hill
];
