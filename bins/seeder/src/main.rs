//! Database seeder for Dompet development and testing.
//!
//! Seeds an `admin` role holding every page permission, an admin user and a
//! starter category tree. Safe to run repeatedly.
//!
//! Usage: cargo run --bin seeder
//!
//! Environment:
//!   DATABASE_URL          - target database (required)
//!   SEED_ADMIN_EMAIL      - defaults to admin@dompet.dev
//!   SEED_ADMIN_PASSWORD   - defaults to admin123

use anyhow::Context;
use dompet_core::auth::hash_password;
use dompet_core::category::{CategoryType, ValidCategory};
use dompet_core::role::ValidRole;
use dompet_core::user::NewUser;
use dompet_db::{CategoryRepository, RoleRepository, UserRepository};
use dompet_shared::config::default_route_access;
use sea_orm::DatabaseConnection;
use tracing::info;

const ADMIN_ROLE: &str = "admin";

/// Parent categories and their children.
const CATEGORIES: &[(&str, CategoryType, &[&str])] = &[
    ("Salary", CategoryType::Income, &[]),
    ("Food", CategoryType::Expense, &["Groceries", "Dining Out"]),
    ("Transport", CategoryType::Expense, &["Fuel", "Public Transport"]),
    ("Bills", CategoryType::Expense, &["Electricity", "Internet"]),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_target(false).init();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let db = dompet_db::connect(&database_url).await?;
    dompet_db::migrate(&db).await?;

    seed_admin_role(&db).await?;
    seed_admin_user(&db).await?;
    seed_categories(&db).await?;

    info!("Seeding complete");
    Ok(())
}

async fn seed_admin_role(db: &DatabaseConnection) -> anyhow::Result<()> {
    let access = default_route_access()
        .into_iter()
        .map(|entry| entry.permission)
        .collect();

    let role = RoleRepository::new(db.clone())
        .upsert(ValidRole {
            name: ADMIN_ROLE.to_string(),
            access,
        })
        .await?;
    info!(role = %role.name, access = ?role.access, "Seeded role");
    Ok(())
}

async fn seed_admin_user(db: &DatabaseConnection) -> anyhow::Result<()> {
    let email = std::env::var("SEED_ADMIN_EMAIL").unwrap_or_else(|_| "admin@dompet.dev".into());
    let password = std::env::var("SEED_ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".into());
    let users = UserRepository::new(db.clone());

    if users.find_by_email(&email).await?.is_some() {
        info!(%email, "Admin user already exists, skipping");
        return Ok(());
    }

    let hash = hash_password(&password)?;
    let user = users
        .create(
            NewUser {
                email,
                password,
                display_name: Some("Administrator".to_string()),
                role: ADMIN_ROLE.to_string(),
            },
            &hash,
        )
        .await?;
    info!(uid = %user.uid, email = %user.email, "Seeded admin user");
    Ok(())
}

async fn seed_categories(db: &DatabaseConnection) -> anyhow::Result<()> {
    let categories = CategoryRepository::new(db.clone());
    if !categories.list().await?.is_empty() {
        info!("Categories already exist, skipping");
        return Ok(());
    }

    for &(name, category_type, children) in CATEGORIES {
        let parent = categories
            .create(ValidCategory {
                name: name.to_string(),
                category_type,
                parent_id: None,
            })
            .await?;

        for child in children {
            categories
                .create(ValidCategory {
                    name: (*child).to_string(),
                    category_type,
                    parent_id: Some(parent.id),
                })
                .await?;
        }
    }
    info!(count = CATEGORIES.len(), "Seeded categories");
    Ok(())
}
