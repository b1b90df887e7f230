mod domain;
mod clients;

mod app_system;
mod bulletins;

#[cfg(test)]
mod mock_framework;

mod actor_framework;
mod announcement_actor;
mod cart_actor;
mod product_actor;
mod program_actor;
mod query_actor;
mod registration_actor;

use chrono::Utc;
use tracing::{error, info, warn, Instrument};

use crate::app_system::{setup_tracing, PortalConfig, PortalError, PortalSystem};
use crate::domain::{
    AnnouncementCreate, ProductForm, ProductPatch, ProgramCreate, QueryCreate, RegistrationCreate,
    RegistrationOutcome, Role,
};

#[tokio::main]
async fn main() -> Result<(), PortalError> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = PortalConfig::from_env()?;
    info!("Starting agricultural portal");

    // Starts every store
    let system = PortalSystem::new(&config)?;

    // Supplier lists a product from the raw form
    let supplier = system
        .auth
        .login(
            "supplier_1",
            "Green Valley Inputs",
            Role::Supplier,
            Some(config.supplier_access_code.as_str()),
        )?;

    let span = tracing::info_span!("product_listing");
    let product_id = async {
        let form = ProductForm {
            name: "Maize seed".to_string(),
            description: "Hybrid, drought tolerant, 2kg bag".to_string(),
            price: "12.50".to_string(),
            quantity: "40".to_string(),
        };
        let params = form.into_create(supplier.user_id.clone())?;
        system.product_client.create_product(params).await
    }
    .instrument(span)
    .await?;
    info!(product_id = %product_id, "Product listed");
    system.auth.logout();

    // Farmer shops
    let farmer = system.auth.login("farmer_1", "Amina", Role::Farmer, None)?;

    let span = tracing::info_span!("shopping");
    async {
        system
            .storefront
            .add_product_to_cart(farmer.user_id.clone(), product_id.clone(), 3)
            .await
    }
    .instrument(span)
    .await?;
    system.auth.logout();

    // Price change reaches the farmer's cart copy
    system
        .auth
        .login(
            "supplier_1",
            "Green Valley Inputs",
            Role::Supplier,
            Some(config.supplier_access_code.as_str()),
        )?;
    let patch = ProductPatch {
        price: Some(11.0),
        ..Default::default()
    };
    system
        .product_client
        .update_product(supplier.user_id.clone(), product_id.clone(), patch)
        .await?;
    system.auth.logout();

    let view = system.storefront.view_cart(farmer.user_id.clone()).await?;
    match serde_json::to_string(&view) {
        Ok(json) => info!(cart = %json, "Cart after price change"),
        Err(e) => warn!(error = %e, "Could not render cart"),
    }

    // Extension officer publishes a program and an announcement
    let officer = system.auth.login(
        "officer_1",
        "District Extension Office",
        Role::ExtensionOfficer,
        Some(config.officer_access_code.as_str()),
    )?;
    system.auth.require_role(Role::ExtensionOfficer)?;

    let program_id = system
        .program_client
        .create_program(ProgramCreate {
            title: "Soil health field day".to_string(),
            description: "Composting and soil testing on the demo plot".to_string(),
            location: "Ward 4 demo plot".to_string(),
            starts_on: Utc::now().date_naive() + chrono::Duration::days(14),
            officer_id: officer.user_id.clone(),
        })
        .await?;
    system
        .announcement_client
        .post_announcement(AnnouncementCreate {
            title: "Registration open".to_string(),
            body: "Sign up for the soil health field day.".to_string(),
            author_id: officer.user_id.clone(),
        })
        .await?;
    system.auth.logout();

    // Farmer signs up twice and asks a question
    system.auth.login("farmer_1", "Amina", Role::Farmer, None)?;

    let span = tracing::info_span!("registration");
    async {
        for _ in 0..2 {
            let params = RegistrationCreate {
                program_id: program_id.clone(),
                farmer_id: farmer.user_id.clone(),
                farmer_name: farmer.display_name.clone(),
                contact: "0700 000 000".to_string(),
            };
            match system.registration_client.add_registration(params).await {
                Ok(RegistrationOutcome::Registered(registration)) => {
                    info!(registration_id = %registration.id, "Registered")
                }
                Ok(RegistrationOutcome::AlreadyRegistered { registration_id }) => {
                    info!(registration_id = %registration_id, "Already registered")
                }
                Err(e) => error!(error = %e, "Registration failed"),
            }
        }
    }
    .instrument(span)
    .await;

    let query_id = system
        .query_client
        .submit_query(QueryCreate {
            farmer_id: farmer.user_id.clone(),
            subject: "Yellowing leaves".to_string(),
            message: "Lower maize leaves are turning yellow from the tips.".to_string(),
        })
        .await?;
    system.auth.logout();

    system.auth.login(
        "officer_1",
        "District Extension Office",
        Role::ExtensionOfficer,
        Some(config.officer_access_code.as_str()),
    )?;
    system
        .query_client
        .respond_to_query(
            query_id,
            officer.user_id.clone(),
            "Likely nitrogen deficiency, top dress with CAN.".to_string(),
        )
        .await?;

    let bulletins = system.bulletins.fetch_pdf_links().await;
    info!(count = bulletins.len(), "Weather bulletins available");

    // Shutdown system gracefully
    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
