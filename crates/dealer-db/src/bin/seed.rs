//! # Seed Data Generator
//!
//! Populates the database with a sample dealership for development.
//!
//! ## Usage
//! ```bash
//! # Seed the configured database (dealer.toml / DEALER_DB_PATH / default)
//! cargo run -p dealer-db --bin seed
//!
//! # Custom amount of stock
//! cargo run -p dealer-db --bin seed -- --cars 60
//!
//! # Specify database path
//! cargo run -p dealer-db --bin seed -- --db ./data/dealer.db
//! ```
//!
//! ## Generated Data
//! - Stock: `C{n}` cars cycling through common local models and variants
//! - Staff: five employees on the standard commission rate
//! - Customers: eight walk-in customers
//! - Login: `admin` / `admin123`
//! - Sales: every fourth car sold through the id-allocating transaction
//!
//! Prints the sales summary and the first employee's commission report
//! when done.

use chrono::{Duration, NaiveDate};
use std::env;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use dealer_core::{Car, Customer, Employee, Money, SaleDraft};
use dealer_db::{services, Database, Settings};

/// (model, variants, base price in whole rupees, body type, kerb weight kg)
const MODELS: &[(&str, &[&str], i64, &str, f64)] = &[
    ("Corolla", &["XLi", "GLi", "Altis 1.6", "Altis Grande"], 5_900_000, "Sedan", 1_250.0),
    ("Civic", &["Standard", "Oriel", "RS Turbo"], 8_200_000, "Sedan", 1_320.0),
    ("City", &["1.2 MT", "1.5 Aspire"], 4_600_000, "Sedan", 1_110.0),
    ("Cultus", &["VXR", "VXL", "AGS"], 3_900_000, "Hatchback", 830.0),
    ("Alto", &["VX", "VXR", "VXL AGS"], 2_300_000, "Hatchback", 700.0),
    ("Sportage", &["Alpha", "FWD", "AWD"], 8_600_000, "SUV", 1_600.0),
    ("Fortuner", &["2.7 G", "Legender"], 15_500_000, "SUV", 2_100.0),
];

const COLORS: &[&str] = &["White", "Silver", "Black", "Grey", "Red", "Blue"];

const EMPLOYEES: &[(&str, &str, i64)] = &[
    ("E1", "Usman Tariq", 85_000),
    ("E2", "Sana Iqbal", 90_000),
    ("E3", "Hamza Sheikh", 75_000),
    ("E4", "Maryam Raza", 80_000),
    ("E5", "Bilal Ahmed", 70_000),
];

const CUSTOMERS: &[(&str, &str)] = &[
    ("CU1", "Ayesha Siddiqui"),
    ("CU2", "Faisal Mehmood"),
    ("CU3", "Zainab Akhtar"),
    ("CU4", "Omar Farooq"),
    ("CU5", "Hira Nadeem"),
    ("CU6", "Kamran Javed"),
    ("CU7", "Nida Hussain"),
    ("CU8", "Saad Qureshi"),
];

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,dealer=debug,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    let mut car_count: usize = 40;
    let mut db_path: Option<PathBuf> = None;
    let mut config_path: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--cars" | "-n" => {
                if i + 1 < args.len() {
                    car_count = args[i + 1].parse().unwrap_or(car_count);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Dealer Desk Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -n, --cars <N>       Number of cars to generate (default: 40)");
                println!("  -d, --db <PATH>      Database file path (overrides settings)");
                println!("  -c, --config <PATH>  Settings file (default: platform config dir)");
                println!("  -h, --help           Show this help message");
                return Ok(());
            }
            other => warn!(arg = %other, "Ignoring unknown argument"),
        }
        i += 1;
    }

    let mut settings = Settings::load(config_path)?;
    if db_path.is_some() {
        settings.database.path = db_path;
    }
    let path = settings.ensure_database_dir()?;
    info!(path = %path.display(), cars = car_count, "Seeding dealership");

    let db = Database::new(settings.to_db_config()).await?;

    let existing = db.cars().count().await?;
    if existing > 0 {
        println!("Database already has {} cars", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    for &(id, name, salary) in EMPLOYEES {
        db.employees()
            .add(&Employee::new(id, name, Money::from_units(salary, 0)))
            .await?;
    }

    for (n, &(id, name)) in CUSTOMERS.iter().enumerate() {
        db.customers()
            .add(&Customer {
                id: id.to_string(),
                name: name.to_string(),
                phone: format!("0300-55501{:02}", n),
                email: format!("{}@example.com", name.split(' ').next().unwrap_or(id).to_lowercase()),
            })
            .await?;
    }

    if db.users().get_by_username("admin").await?.is_none() {
        db.users().add_user("admin", "admin123").await?;
    }

    let start = std::time::Instant::now();
    let cars: Vec<Car> = (1..=car_count).map(generate_car).collect();
    for car in &cars {
        if let Err(e) = db.cars().add(car).await {
            warn!(id = %car.id, error = %e, "Failed to insert car");
        }
    }
    info!(count = cars.len(), elapsed = ?start.elapsed(), "Cars inserted");

    let first_day = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap_or_default();
    for (n, car) in cars.iter().enumerate().filter(|(n, _)| n % 4 == 0) {
        let draft = SaleDraft {
            car_id: car.id.clone(),
            customer_id: CUSTOMERS[n % CUSTOMERS.len()].0.to_string(),
            employee_id: EMPLOYEES[n % EMPLOYEES.len()].0.to_string(),
            // Sold a little under sticker.
            amount: Money::from_cents(car.price.cents() / 100 * 97),
            date: first_day + Duration::days(n as i64 * 3),
        };
        db.sales().record_sale(draft).await?;
    }

    let currency = settings.reports.currency_symbol.as_str();

    println!();
    println!("{}", services::sales_report(&db).await?.render_text(settings.reports.layout));
    println!("{}", services::commission_report(&db, EMPLOYEES[0].0).await?.render_text(currency));
    println!();
    println!(
        "Seed complete: {} cars ({} available), {} sales. Next id: {}",
        db.cars().count().await?,
        db.cars().list_available().await?.len(),
        db.sales().count().await?,
        db.sales().next_sale_id().await?,
    );

    db.close().await;
    Ok(())
}

/// Builds the `n`th car (1-based) deterministically.
fn generate_car(n: usize) -> Car {
    let (model, variants, base_price, car_type, weight) = MODELS[n % MODELS.len()];
    let variant = variants[n % variants.len()];

    // Higher trims cost more; every car gets a small deterministic spread.
    let trim_premium = (n % variants.len()) as i64 * 350_000;
    let spread = ((n * 7919) % 90) as i64 * 1_000;
    let price = Money::from_units(base_price + trim_premium + spread, 0);

    Car {
        id: format!("C{n}"),
        model: model.to_string(),
        variant: variant.to_string(),
        price,
        mileage: ((n * 137) % 40) as f64 * 1_000.0,
        color: COLORS[n % COLORS.len()].to_string(),
        car_type: car_type.to_string(),
        weight,
        number_plate: format!("LE{}-{:02}-{:04}", (b'A' + (n % 26) as u8) as char, 20 + n % 5, 1000 + n),
        chassis_number: format!("{}-{:07}", model.to_uppercase().chars().take(3).collect::<String>(), 3_000_000 + n),
    }
}
