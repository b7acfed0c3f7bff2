//! Run a nearby-shop query from the terminal.

use gully_bazaar_core::{DEFAULT_NEARBY_RADIUS_M, GeoPoint};
use gully_bazaar_server::appwrite::AppwriteClient;
use gully_bazaar_server::config::ServerConfig;
use gully_bazaar_server::geo::directory::AppwriteShopDirectory;
use gully_bazaar_server::geo::location::{
    EnvLocationSource, FixedLocationSource, LocationSample, LocationSource,
};
use gully_bazaar_server::geo::locator::{LinearScanLocator, ShopLocator};

/// Query nearby shops and print the ranked result.
///
/// With `--lat`/`--lng` the position is taken as given; otherwise the
/// device-position source is consulted, and a refused permission aborts the
/// command with its message — no retry.
///
/// # Errors
///
/// Fails when the position is unavailable or the query fails.
pub async fn run(
    lat: Option<f64>,
    lng: Option<f64>,
    radius: Option<f64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;

    let source: Box<dyn LocationSource> = match (lat, lng) {
        (Some(lat), Some(lng)) => Box::new(FixedLocationSource(LocationSample {
            point: GeoPoint::new(lat, lng),
            accuracy_m: 0.0,
        })),
        _ => Box::new(EnvLocationSource),
    };

    let sample = source.current_position().await?;
    let radius_m = radius.unwrap_or(DEFAULT_NEARBY_RADIUS_M);

    let client = AppwriteClient::new(&config.appwrite);
    let directory = AppwriteShopDirectory::new(client, &config.appwrite);
    let locator = LinearScanLocator::new(directory);

    let ranked = locator.nearby(sample.point, radius_m).await?;

    print_results(sample.point, radius_m, &ranked);
    Ok(())
}

#[allow(clippy::print_stdout)] // terminal report is this command's output
fn print_results(center: GeoPoint, radius_m: f64, ranked: &[gully_bazaar_core::RankedShop]) {
    println!(
        "{} shop(s) within {:.0} m of ({:.4}, {:.4})",
        ranked.len(),
        radius_m,
        center.latitude,
        center.longitude
    );

    for entry in ranked {
        println!(
            "  {:>7.2} km  {}  [{}]  {}",
            entry.distance_km, entry.shop.name, entry.shop.category, entry.shop.address
        );
    }
}
