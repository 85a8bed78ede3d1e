//! # Catalog Command Line
//!
//! Runs product service operations against a SQLite catalog and prints the
//! result as JSON.
//!
//! ## Usage
//! ```bash
//! catalog [--config PATH] [--role ROLE] <COMMAND>
//!
//! catalog list
//! catalog details
//! catalog categories
//! catalog category 1
//! catalog get 1
//! catalog range 10.00 20.00
//! catalog --role admin add 78 1 "Chai Latte" 12.50
//! catalog --role admin update 1 1 "Chai" 18.00
//! catalog --role admin add-transactional 79 2 "Tonic" 5.00
//! ```
//!
//! Seed a database first with `cargo run -p catalog-db --bin seed`.

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use serde::Serialize;
use tracing::info;

use catalog_core::{Money, Product};
use catalog_db::Database;
use catalog_service::logging::init_tracing;
use catalog_service::{
    maintenance, secured_product_service, CatalogConfig, CategoryManager, CategoryService,
    MemoryCacheManager, ProductManager, ProductService, UserClaims,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut args: Vec<String> = env::args().skip(1).collect();

    let config_path = take_option(&mut args, "--config").map(PathBuf::from);
    let roles: Vec<String> = take_option(&mut args, "--role").into_iter().collect();

    let config = CatalogConfig::load(config_path)?;
    init_tracing(&config.logging)?;

    let Some(command) = args.first().cloned() else {
        print_usage();
        return Ok(());
    };
    let rest = &args[1..];

    let db = Database::new(config.database.to_db_config())
        .await
        .context("opening catalog database")?;
    info!(path = %config.database.path.display(), "Catalog database ready");

    let categories: Arc<dyn CategoryService> =
        Arc::new(CategoryManager::new(Arc::new(db.categories())));
    let manager = ProductManager::new(Arc::new(db.products()), categories.clone())
        .with_limits(config.rules)
        .with_maintenance(maintenance::from_settings(&config.maintenance));
    let cache = Arc::new(MemoryCacheManager::new(config.cache.ttl()));
    let service =
        secured_product_service(Arc::new(manager), cache, UserClaims::new("cli", roles));

    match command.as_str() {
        "list" => print_json(&service.get_all().await?)?,
        "details" => print_json(&service.get_product_details().await?)?,
        "categories" => print_json(&categories.get_all().await?)?,
        "category" => {
            let id = parse_arg(rest, 0, "category id")?;
            print_json(&service.get_all_by_category_id(id).await?)?
        }
        "get" => {
            let id = parse_arg(rest, 0, "product id")?;
            print_json(&service.get_by_id(id).await?)?
        }
        "range" => {
            let min: Money = parse_arg(rest, 0, "min price")?;
            let max: Money = parse_arg(rest, 1, "max price")?;
            print_json(&service.get_by_unit_price(min, max).await?)?
        }
        "add" => print_json(&service.add(&product_from(rest)?).await?)?,
        "update" => print_json(&service.update(&product_from(rest)?).await?)?,
        "add-transactional" => {
            print_json(&service.add_transactional_test(&product_from(rest)?).await?)?
        }
        other => {
            print_usage();
            bail!("unknown command '{other}'");
        }
    }

    db.close().await;
    Ok(())
}

/// Removes `--flag VALUE` from `args` and returns VALUE.
fn take_option(args: &mut Vec<String>, flag: &str) -> Option<String> {
    let idx = args.iter().position(|a| a == flag)?;
    if idx + 1 >= args.len() {
        args.remove(idx);
        return None;
    }
    let value = args.remove(idx + 1);
    args.remove(idx);
    Some(value)
}

fn parse_arg<T>(args: &[String], idx: usize, what: &str) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = args.get(idx).with_context(|| format!("missing {what}"))?;
    raw.parse()
        .map_err(|e| anyhow::anyhow!("invalid {what} '{raw}': {e}"))
}

/// `<id> <category_id> <name> <price>`
fn product_from(args: &[String]) -> anyhow::Result<Product> {
    let id = parse_arg(args, 0, "product id")?;
    let category_id = parse_arg(args, 1, "category id")?;
    let name: String = parse_arg(args, 2, "product name")?;
    let price: Money = parse_arg(args, 3, "unit price")?;
    Ok(Product::new(id, category_id, name, price))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_usage() {
    println!("Catalog");
    println!();
    println!("Usage: catalog [--config PATH] [--role ROLE] <COMMAND>");
    println!();
    println!("Commands:");
    println!("  list                              All products (refused during maintenance)");
    println!("  details                           Products with category names");
    println!("  categories                        All categories");
    println!("  category <ID>                     Products in a category");
    println!("  get <ID>                          One product");
    println!("  range <MIN> <MAX>                 Products priced MIN..=MAX");
    println!("  add <ID> <CAT> <NAME> <PRICE>     Add a product (needs role product.add or admin)");
    println!("  update <ID> <CAT> <NAME> <PRICE>  Update a product (not supported)");
    println!("  add-transactional <ID> <CAT> <NAME> <PRICE>");
}
