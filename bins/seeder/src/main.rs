//! Database seeder for BizLink development and testing.
//!
//! Seeds a demo owner, a demo company with a few services, and backfills
//! credit accounts for every company that has none. Prints a bearer token for
//! the demo owner so the API can be exercised right away.
//!
//! Usage: cargo run --bin seeder

use std::str::FromStr;

use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use uuid::Uuid;

use bizlink_db::entities::{companies, users};
use bizlink_db::repositories::CreateServiceInput;
use bizlink_db::{CatalogRepository, CreditRepository};
use bizlink_shared::{AppConfig, JwtConfig, JwtService};

const DEMO_EMAIL: &str = "owner@bizlink.dev";
const DEMO_COMPANY: &str = "Demo Studio";

/// Title, price and category of each demo service.
const DEMO_SERVICES: [(&str, &str, &str); 3] = [
    ("Logo design", "350.00", "design"),
    ("Website audit", "120.00", "consulting"),
    ("Monthly bookkeeping", "90.00", "finance"),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;

    println!("Connecting to database...");
    let db = bizlink_db::connect(&config.database).await?;

    println!("Seeding demo owner...");
    let owner = seed_owner(&db).await?;

    println!("Seeding demo company...");
    let company_id = seed_company(&db, owner.id).await?;

    println!("Backfilling credit accounts...");
    let created = CreditRepository::new(db.clone())
        .initialize_missing_accounts()
        .await?;
    println!("  Created {created} credit account(s)");

    let token = JwtService::new(JwtConfig::from(&config.jwt)).generate_access_token(owner.id)?;

    println!("Seeding complete!");
    println!();
    println!("  owner id:   {}", owner.id);
    println!("  company id: {company_id}");
    println!("  token:      Bearer {token}");

    Ok(())
}

/// Seeds the demo owner, reusing it when it already exists.
async fn seed_owner(db: &DatabaseConnection) -> anyhow::Result<users::Model> {
    let catalog = CatalogRepository::new(db.clone());

    if let Some(user) = catalog.find_user_by_email(DEMO_EMAIL).await? {
        println!("  Demo owner already exists, skipping...");
        return Ok(user);
    }

    // Placeholder hash; this user never logs in through a password flow
    let user = catalog
        .create_user(DEMO_EMAIL, Some("Demo Owner"), "$argon2id$v=19$seed_hash")
        .await?;
    println!("  Created demo owner: {DEMO_EMAIL}");
    Ok(user)
}

/// Seeds the demo company and its services, reusing the company when present.
async fn seed_company(db: &DatabaseConnection, owner_id: Uuid) -> anyhow::Result<Uuid> {
    let existing = companies::Entity::find()
        .filter(companies::Column::Name.eq(DEMO_COMPANY))
        .one(db)
        .await?;

    if let Some(company) = existing {
        println!("  Demo company already exists, skipping...");
        return Ok(company.id);
    }

    let catalog = CatalogRepository::new(db.clone());
    let company = catalog
        .create_company(
            owner_id,
            DEMO_COMPANY,
            Some("Design and consulting studio used for local testing"),
        )
        .await?;
    println!("  Created demo company: {DEMO_COMPANY}");

    for (title, price, category) in DEMO_SERVICES {
        catalog
            .create_service(CreateServiceInput {
                company_id: company.id,
                title: title.to_string(),
                description: None,
                price: Some(Decimal::from_str(price)?),
                category: Some(category.to_string()),
            })
            .await?;
        println!("  Created service: {title}");
    }

    Ok(company.id)
}
