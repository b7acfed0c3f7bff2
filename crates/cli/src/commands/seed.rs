//! Seed the backend with demo shops and products.
//!
//! Writes straight to the document collections with the server API key; no
//! accounts are created, so seeded shops have no owning login. Good enough
//! for exercising the nearby query and the catalog endpoints locally.

use chrono::Utc;
use rust_decimal::Decimal;

use gully_bazaar_core::GeoPoint;
use gully_bazaar_server::appwrite::{AppwriteClient, Auth};
use gully_bazaar_server::config::ServerConfig;
use gully_bazaar_server::geo::directory::{RawCoords, ShopRecord};
use gully_bazaar_server::services::catalog::ProductRecord;

/// One degree of latitude in meters under the spherical model.
const METERS_PER_DEGREE: f64 = 6_371_000.0 * std::f64::consts::PI / 180.0;

struct DemoShop {
    name: &'static str,
    owner: &'static str,
    category: &'static str,
    /// Offset from the seed center, in meters (north, east).
    offset_m: Option<(f64, f64)>,
    products: &'static [(&'static str, &'static str, u32)],
}

/// Demo dataset: a handful of shops inside the default radius, one outside
/// it, and one without a position (which must never rank in nearby results).
const DEMO_SHOPS: &[DemoShop] = &[
    DemoShop {
        name: "Sai Kirana Stores",
        owner: "S. Patil",
        category: "General Store",
        offset_m: Some((400.0, 150.0)),
        products: &[
            ("Basmati Rice 5kg", "549.00", 40),
            ("Toor Dal 1kg", "165.00", 60),
            ("Sunflower Oil 1L", "139.00", 32),
        ],
    },
    DemoShop {
        name: "Laxmi Medical & General",
        owner: "R. Shah",
        category: "Pharmacy",
        offset_m: Some((-900.0, 600.0)),
        products: &[("Paracetamol 500mg", "30.50", 120), ("ORS Sachet", "21.00", 80)],
    },
    DemoShop {
        name: "Anand Dairy",
        owner: "A. Yadav",
        category: "Dairy",
        offset_m: Some((1800.0, -1200.0)),
        products: &[("Full Cream Milk 1L", "66.00", 25), ("Paneer 200g", "95.00", 18)],
    },
    DemoShop {
        name: "New Poona Bakery",
        owner: "F. Irani",
        category: "Bakery",
        offset_m: Some((5200.0, 2500.0)),
        products: &[("Brun Maska", "35.00", 50)],
    },
    DemoShop {
        name: "Gupta General Store",
        owner: "V. Gupta",
        category: "General Store",
        offset_m: None,
        products: &[("Washing Soap", "28.00", 70)],
    },
];

/// Create the demo dataset around the given center.
///
/// # Errors
///
/// Fails on the first rejected write; already-seeded data is left in place.
pub async fn run(lat: f64, lng: f64) -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;
    let client = AppwriteClient::new(&config.appwrite);
    let center = GeoPoint::new(lat, lng);

    for demo in DEMO_SHOPS {
        let coords = demo.offset_m.map(|(north_m, east_m)| {
            let lat_offset = north_m / METERS_PER_DEGREE;
            let lng_offset =
                east_m / (METERS_PER_DEGREE * center.latitude.to_radians().cos());
            GeoPoint::new(center.latitude + lat_offset, center.longitude + lng_offset)
        });

        let slug = demo.name.to_lowercase().replace(' ', "");
        let record = ShopRecord {
            shop_name: demo.name.to_owned(),
            owner_name: demo.owner.to_owned(),
            email: format!("{slug}@example.com"),
            phone: String::new(),
            location: format!("Near {lat:.4}, {lng:.4}"),
            location_coords: coords.map(RawCoords::from),
            registration_date: Utc::now(),
            is_active: true,
            shop_type: demo.category.to_owned(),
        };

        let doc = client
            .create_document::<ShopRecord, ShopRecord>(
                &config.appwrite.database_id,
                &config.appwrite.shops_collection_id,
                record,
                Auth::ServerKey,
            )
            .await?;

        tracing::info!(shop = %doc.id, name = %demo.name, "seeded shop");

        for (product_name, price, stock) in demo.products {
            let product = ProductRecord {
                shop_id: doc.id.clone(),
                name: (*product_name).to_owned(),
                price: price.parse::<Decimal>()?,
                description: String::new(),
                image_url: String::new(),
                category: demo.category.to_owned(),
                sku: String::new(),
                stock_quantity: *stock,
            };

            client
                .create_document::<ProductRecord, ProductRecord>(
                    &config.appwrite.database_id,
                    &config.appwrite.products_collection_id,
                    product,
                    Auth::ServerKey,
                )
                .await?;
        }

        tracing::info!(
            name = %demo.name,
            products = demo.products.len(),
            "seeded products"
        );
    }

    tracing::info!(count = DEMO_SHOPS.len(), "seeding complete");
    Ok(())
}
