//! # Seed Data Generator
//!
//! Populates a catalog database with Northwind-style sample data.
//!
//! ## Usage
//! ```bash
//! # Seed ./catalog_dev.db
//! cargo run -p catalog-db --bin seed
//!
//! # Specify database path
//! cargo run -p catalog-db --bin seed -- --db ./data/catalog.db
//! ```
//!
//! Category 1 (Beverages) holds 12 products, so three more adds fill it
//! and the category product limit can be exercised by hand.

use anyhow::Context;
use std::env;
use tracing::{info, warn};

use catalog_core::{Category, Money, Product};
use catalog_db::{Database, DbConfig};

const CATEGORIES: &[(i64, &str)] = &[
    (1, "Beverages"),
    (2, "Condiments"),
    (3, "Confections"),
    (4, "Dairy Products"),
    (5, "Grains/Cereals"),
    (6, "Meat/Poultry"),
    (7, "Produce"),
    (8, "Seafood"),
];

/// (category_id, name, unit price in cents, units in stock)
const PRODUCTS: &[(i64, &str, i64, i32)] = &[
    (1, "Chai", 1800, 39),
    (1, "Chang", 1900, 17),
    (2, "Aniseed Syrup", 1000, 13),
    (2, "Chef Anton's Cajun Seasoning", 2200, 53),
    (2, "Chef Anton's Gumbo Mix", 2135, 0),
    (2, "Grandma's Boysenberry Spread", 2500, 120),
    (7, "Uncle Bob's Organic Dried Pears", 3000, 15),
    (2, "Northwoods Cranberry Sauce", 4000, 6),
    (6, "Mishi Kobe Niku", 9700, 29),
    (8, "Ikura", 3100, 31),
    (4, "Queso Cabrales", 2100, 22),
    (4, "Queso Manchego La Pastora", 3800, 86),
    (8, "Konbu", 600, 24),
    (7, "Tofu", 2325, 35),
    (2, "Genen Shouyu", 1550, 39),
    (3, "Pavlova", 1745, 29),
    (6, "Alice Mutton", 3900, 0),
    (8, "Carnarvon Tigers", 6250, 42),
    (3, "Teatime Chocolate Biscuits", 920, 25),
    (3, "Sir Rodney's Marmalade", 8100, 40),
    (3, "Sir Rodney's Scones", 1000, 3),
    (5, "Gustaf's Knäckebröd", 2100, 104),
    (5, "Tunnbröd", 900, 61),
    (1, "Guaraná Fantástica", 450, 20),
    (3, "NuNuCa Nuß-Nougat-Creme", 1400, 76),
    (3, "Gumbär Gummibärchen", 3123, 15),
    (3, "Schoggi Schokolade", 4390, 49),
    (7, "Rössle Sauerkraut", 4560, 26),
    (6, "Thüringer Rostbratwurst", 12379, 0),
    (8, "Nord-Ost Matjeshering", 2589, 10),
    (4, "Gorgonzola Telino", 1250, 0),
    (4, "Mascarpone Fabioli", 3200, 9),
    (4, "Geitost", 250, 112),
    (1, "Sasquatch Ale", 1400, 111),
    (1, "Steeleye Stout", 1800, 20),
    (8, "Inlagd Sill", 1900, 112),
    (8, "Gravad lax", 2600, 11),
    (1, "Côte de Blaye", 26350, 17),
    (1, "Chartreuse verte", 1800, 69),
    (8, "Boston Crab Meat", 1840, 123),
    (8, "Jack's New England Clam Chowder", 965, 85),
    (5, "Singaporean Hokkien Fried Mee", 1400, 26),
    (1, "Ipoh Coffee", 4600, 17),
    (2, "Gula Malacca", 1945, 27),
    (8, "Rogede sild", 950, 5),
    (8, "Spegesild", 1200, 95),
    (3, "Zaanse koeken", 950, 36),
    (3, "Chocolade", 1275, 15),
    (3, "Maxilaku", 2000, 10),
    (3, "Valkoinen suklaa", 1625, 65),
    (7, "Manjimup Dried Apples", 5300, 20),
    (5, "Filo Mix", 700, 38),
    (6, "Perth Pasties", 3280, 0),
    (6, "Tourtière", 745, 21),
    (6, "Pâté chinois", 2400, 115),
    (5, "Gnocchi di nonna Alice", 3800, 21),
    (5, "Ravioli Angelo", 1950, 36),
    (8, "Escargots de Bourgogne", 1325, 62),
    (4, "Raclette Courdavault", 5500, 79),
    (4, "Camembert Pierrot", 3400, 19),
    (2, "Sirop d'érable", 2850, 113),
    (3, "Tarte au sucre", 4930, 17),
    (2, "Vegie-spread", 4390, 24),
    (5, "Wimmers gute Semmelknödel", 3325, 22),
    (2, "Louisiana Fiery Hot Pepper Sauce", 2105, 76),
    (2, "Louisiana Hot Spiced Okra", 1700, 4),
    (1, "Laughing Lumberjack Lager", 1400, 52),
    (3, "Scottish Longbreads", 1250, 6),
    (4, "Gudbrandsdalsost", 3600, 26),
    (1, "Outback Lager", 1500, 15),
    (4, "Flotemysost", 2150, 26),
    (4, "Mozzarella di Giovanni", 3480, 14),
    (8, "Röd Kaviar", 1500, 101),
    (7, "Longlife Tofu", 1000, 4),
    (1, "Rhönbräu Klosterbier", 775, 125),
    (1, "Lakkalikööri", 1800, 57),
    (2, "Original Frankfurter grüne Soße", 1300, 32),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let args: Vec<String> = env::args().collect();
    let mut db_path = String::from("./catalog_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Catalog Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./catalog_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            other => warn!(arg = other, "Ignoring unknown argument"),
        }
        i += 1;
    }

    let db = Database::new(DbConfig::new(&db_path))
        .await
        .with_context(|| format!("opening {db_path}"))?;

    let existing = db.products().count().await?;
    if existing > 0 {
        warn!(existing, "Database already has products, skipping seed");
        return Ok(());
    }

    let categories = db.categories();
    for (id, name) in CATEGORIES {
        categories.add(&Category::new(*id, *name)).await?;
    }

    let products = db.products();
    for (idx, (category_id, name, cents, stock)) in PRODUCTS.iter().enumerate() {
        let product = Product::new(idx as i64 + 1, *category_id, *name, Money::from_cents(*cents))
            .with_units_in_stock(*stock);
        products
            .add(&product)
            .await
            .with_context(|| format!("inserting {name}"))?;
    }

    info!(
        path = %db_path,
        categories = categories.count().await?,
        products = products.count().await?,
        "Seed complete"
    );

    Ok(())
}
