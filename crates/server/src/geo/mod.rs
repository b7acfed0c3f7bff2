//! Geospatial query plumbing: candidate-set retrieval and the locator seam.
//!
//! The distance math and ranking are pure functions in
//! `gully_bazaar_core::geo`; this module supplies the I/O around them — a
//! `ShopDirectory` that fetches the candidate set from the hosted backend, a
//! `ShopLocator` that runs the scan, and a `LocationSource` that stands in
//! for the device location sensor.

pub mod directory;
pub mod location;
pub mod locator;

pub use directory::{AppwriteShopDirectory, ShopDirectory, ShopRecord};
pub use location::{LocationError, LocationSample, LocationSource};
pub use locator::{LinearScanLocator, QueryError, ShopLocator};
