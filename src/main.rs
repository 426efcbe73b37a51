use hexbin311::{
    GeoPoint, HexbinError, PointCsvConfig, ViewportBounds, bin_points_to_hexagons,
    read_points_csv,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_ZOOM: f64 = 11.5;

fn parse_zoom(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(zoom) if zoom.is_finite() => zoom,
        _ => {
            warn!(value = raw, default = DEFAULT_ZOOM, "unparseable zoom, using default");
            DEFAULT_ZOOM
        }
    }
}

// usage: hexbin311 [points.csv] [zoom]
fn main() -> Result<(), HexbinError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let points = match args.next() {
        Some(path) => read_points_csv(&path, &PointCsvConfig::default())?,
        None => vec![
            GeoPoint::at("demo-1", 37.7749, -122.4194),
            GeoPoint::at("demo-2", 37.7897, -122.3981),
            GeoPoint::new("demo-3", None, None),
        ],
    };
    let zoom = match args.next() {
        Some(raw) => parse_zoom(&raw),
        None => DEFAULT_ZOOM,
    };

    let bounds = ViewportBounds::new(37.811749, 37.708075, -122.346582, -122.513272);
    let bins = bin_points_to_hexagons(&points, &bounds, zoom);

    info!(
        zoom,
        resolution = u8::from(bins.resolution),
        cells = bins.len(),
        binned = bins.total_count(),
        points = points.len(),
        "binned points"
    );
    println!("{}", bins.to_geojson_string());

    Ok(())
}
