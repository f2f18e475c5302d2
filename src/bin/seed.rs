//! Seed the database with demo users.
//!
//! Idempotent: existing users (matched by email) are left untouched.

use anyhow::{Context, Result};

use lendwise_server::config::Config;
use lendwise_server::db;
use lendwise_server::models::UserRole;

struct DemoUser {
    name: &'static str,
    email: &'static str,
    // Raw role string as older clients sent it; normalized on insert.
    role: &'static str,
}

const DEMO_USERS: &[DemoUser] = &[
    DemoUser {
        name: "Alex Johnson",
        email: "student@university.edu",
        role: "Student",
    },
    DemoUser {
        name: "Sarah Lender",
        email: "lender@example.com",
        role: "Lender",
    },
    DemoUser {
        name: "John Smith",
        email: "user@example.com",
        role: "Non-student",
    },
];

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;

    let pool = db::create_pool(&config)
        .await
        .context("Failed to connect to database")?;

    db::run_migrations(&pool)
        .await
        .context("Failed to run migrations")?;

    for demo in DEMO_USERS {
        let role = UserRole::parse(demo.role)
            .with_context(|| format!("Unknown demo role: {}", demo.role))?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO users (name, email, simulated_auth_id, role)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (email) DO NOTHING
            "#,
        )
        .bind(demo.name)
        .bind(demo.email)
        .bind(format!("auth_{}", demo.email))
        .bind(role)
        .execute(&pool)
        .await
        .with_context(|| format!("Failed to insert demo user {}", demo.email))?;

        if inserted.rows_affected() > 0 {
            tracing::info!(email = demo.email, role = role.as_str(), "Created demo user");
        } else {
            tracing::info!(email = demo.email, "Demo user already exists");
        }
    }

    tracing::info!("Seeding completed");

    Ok(())
}
