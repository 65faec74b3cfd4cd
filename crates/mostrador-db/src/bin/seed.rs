//! # Seed Data Generator
//!
//! Populates a database with development clients and products.
//!
//! ## Usage
//! ```bash
//! # Default: 200 products, 20 clients into ./mostrador_dev.db
//! cargo run -p mostrador-db --bin seed
//!
//! # Custom amount and path
//! cargo run -p mostrador-db --bin seed -- --count 1000 --db ./data/pos.db
//! ```

use chrono::Utc;
use std::env;
use tracing::info;
use uuid::Uuid;

use mostrador_core::{Client, Product};
use mostrador_db::{Database, DbConfig};

/// Product families for realistic test data: (sku prefix, names).
const FAMILIES: &[(&str, &[&str])] = &[
    (
        "CAFE",
        &["Café Molido 250g", "Café Molido 500g", "Café en Grano 1kg", "Café Instantáneo"],
    ),
    (
        "PAN",
        &["Pan Campesino", "Pan Integral", "Arepa de Maíz x5", "Tostadas x10"],
    ),
    (
        "LACT",
        &["Leche Entera 1L", "Leche Deslactosada 1L", "Queso Campesino 500g", "Yogur Natural"],
    ),
    (
        "ASEO",
        &["Jabón en Barra", "Detergente 1kg", "Limpiador Multiusos", "Papel Higiénico x4"],
    ),
    (
        "BEB",
        &["Gaseosa 1.5L", "Agua con Gas 600ml", "Jugo de Mango 1L", "Té Frío 500ml"],
    ),
];

const CLIENT_NAMES: &[&str] = &[
    "Ana Torres",
    "Luis Prada",
    "Marta Quintero",
    "Jorge Salazar",
    "Paula Reyes",
    "Andrés Cano",
    "Lucía Herrera",
    "Camilo Vega",
    "Sofía Mendoza",
    "Ricardo Lamus",
];

/// Tax rates in basis points: exempt, reduced, standard VAT.
const TAX_RATES: &[u32] = &[0, 500, 1900];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    let mut count: usize = 200;
    let mut db_path = String::from("./mostrador_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(200);
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
                println!("Mostrador Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of products to generate (default: 200)");
                println!("  -d, --db <PATH>    Database file path (default: ./mostrador_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    info!(db = %db_path, products = count, "Seeding development database");

    let db = Database::new(DbConfig::new(&db_path)).await?;

    let existing = db.products().count().await?;
    if existing > 0 {
        info!(existing, "Database already has products; skipping seed");
        return Ok(());
    }

    let clients = db.clients();
    for name in CLIENT_NAMES {
        let client = Client {
            id: Uuid::new_v4().to_string(),
            name: (*name).to_string(),
            email: Some(format!(
                "{}@example.com",
                name.to_lowercase().replace(' ', ".")
            )),
            is_active: true,
            created_at: Utc::now(),
        };
        clients.insert(&client).await?;
    }
    info!(clients = CLIENT_NAMES.len(), "Clients seeded");

    let products = db.products();
    let mut generated = 0usize;
    'outer: loop {
        for (family_idx, (prefix, names)) in FAMILIES.iter().enumerate() {
            for (name_idx, name) in names.iter().enumerate() {
                if generated >= count {
                    break 'outer;
                }

                let seed = generated + family_idx * 31 + name_idx * 7;
                let now = Utc::now();
                let product = Product {
                    id: Uuid::new_v4().to_string(),
                    sku: format!("{}-{:04}", prefix, generated),
                    name: format!("{} #{}", name, generated / (FAMILIES.len() * 4) + 1),
                    // $1.99 - $99.99 range
                    unit_price_cents: 199 + ((seed * 137) % 9_800) as i64,
                    tax_rate_bps: TAX_RATES[seed % TAX_RATES.len()],
                    stock: (seed % 120) as i64,
                    is_active: true,
                    created_at: now,
                    updated_at: now,
                };

                products.insert(&product).await?;
                generated += 1;
            }
        }
    }

    info!(products = generated, "Seed complete");
    Ok(())
}
