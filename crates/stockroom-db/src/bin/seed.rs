//! # Seed Data Generator
//!
//! Populates the database with sample inventory for development.
//!
//! ## Usage
//! ```bash
//! # Generate 500 products (default)
//! cargo run -p stockroom-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p stockroom-db --bin seed -- --count 2000
//!
//! # Specify database path
//! cargo run -p stockroom-db --bin seed -- --db ./data/stockroom.db
//! ```
//!
//! ## Generated Products
//! Names combine a department item with a variant, e.g. `Claw Hammer 16oz`.
//! Once every combination is used the list starts over with a batch
//! suffix (`Claw Hammer 16oz #2`), so any count can be generated.
//! Prices run from $0.99 upward, stock from 0 to 100.

use std::env;

use stockroom_core::{Money, ProductInput};
use stockroom_db::{Database, DbConfig, ProductStore};

/// Department items for realistic test data
const DEPARTMENTS: &[(&str, &[&str])] = &[
    (
        "Hardware",
        &[
            "Claw Hammer",
            "Screwdriver Set",
            "Adjustable Wrench",
            "Tape Measure",
            "Utility Knife",
            "Wood Screws",
            "Wall Anchors",
            "Sandpaper",
        ],
    ),
    (
        "Garden",
        &[
            "Garden Hose",
            "Pruning Shears",
            "Potting Soil",
            "Seed Tray",
            "Watering Can",
            "Leaf Rake",
        ],
    ),
    (
        "Electrical",
        &[
            "Extension Cord",
            "LED Bulb",
            "Light Switch",
            "Wire Nuts",
            "Outlet Cover",
            "Battery Pack",
        ],
    ),
    (
        "Paint",
        &[
            "Paint Roller",
            "Angled Brush",
            "Drop Cloth",
            "Painter's Tape",
            "Primer",
            "Wood Stain",
        ],
    ),
];

/// Variants with their price add-on in cents
const VARIANTS: &[(&str, i64)] = &[
    ("Small", 0),
    ("Medium", 150),
    ("Large", 300),
    ("Pro", 900),
    ("16oz", 100),
    ("Twin Pack", 450),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 500;
    let mut db_path = String::from("./stockroom.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(500);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Stockroom Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of products to generate (default: 500)");
                println!("  -d, --db <PATH>    Database file path (default: ./stockroom.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Stockroom Seed Data Generator");
    println!("=============================");
    println!("Database: {}", db_path);
    println!("Products: {}", count);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    let store = db.products();

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = store.count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Generating products...");

    let candidates: Vec<(&str, &str, &str, i64)> = DEPARTMENTS
        .iter()
        .flat_map(|(department, items)| {
            items.iter().flat_map(move |item| {
                VARIANTS
                    .iter()
                    .map(move |(variant, addon)| (*department, *item, *variant, *addon))
            })
        })
        .collect();

    println!("  {} base combinations", candidates.len());

    let mut generated = 0;
    let start = std::time::Instant::now();

    for seed in 0..count {
        let (department, item, variant, addon) = candidates[seed % candidates.len()];
        let batch = seed / candidates.len() + 1;
        let input = generate_product(department, item, variant, addon, batch, seed);

        if let Err(e) = store.save(None, &input).await {
            eprintln!("Failed to insert {}: {}", input.name, e);
            continue;
        }

        generated += 1;
        if generated % 100 == 0 {
            println!("  Generated {} products...", generated);
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!("✓ Generated {} products in {:?}", generated, elapsed);

    println!();
    println!("Verifying search...");
    let hits = store.find_by_name_containing_ignore_case("hammer").await?;
    println!("  Search 'hammer': {} results", hits.len());

    db.close().await;

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Builds one product from its department, item and variant.
///
/// `batch` counts passes over the combinations, starting at 1; later
/// passes get a `#N` suffix so names stay distinct.
fn generate_product(
    department: &str,
    item: &str,
    variant: &str,
    price_addon: i64,
    batch: usize,
    seed: usize,
) -> ProductInput {
    // Base $0.99 - $24.98 plus the variant add-on
    let base_price = 99 + ((seed * 37) % 2400) as i64;

    let name = if batch == 1 {
        format!("{} {}", item, variant)
    } else {
        format!("{} {} #{}", item, variant, batch)
    };

    ProductInput {
        name,
        description: Some(format!("{} department", department)),
        price: Money::from_cents(base_price + price_addon),
        quantity: (seed % 101) as i64,
    }
}
