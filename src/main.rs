use anyhow::Context;
use chrono::Local;
use rust_decimal_macros::dec;
use tracing::{error, info, Instrument};

use orderdesk::app_system::{setup_tracing, DeskSystem};
use orderdesk::config::AppConfig;
use orderdesk::dashboard::{Dashboard, Period};
use orderdesk::domain::{ClientKind, ProductStatus, Unit};
use orderdesk::forms::{ClientForm, ProductForm};
use orderdesk::format::format_currency;
use orderdesk::notify::Notifier;
use orderdesk::pages::{ClientsPage, OrdersPage, ProductsPage, SubmitOutcome};
use orderdesk::shell::Shell;
use orderdesk::storage::Snapshot;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env().context("reading configuration")?;

    // Setup tracing once for the entire application
    setup_tracing(&config.log_filter);
    info!(?config, "Starting order desk");

    let seed = match &config.seed_file {
        Some(path) => Some(Snapshot::load(path).with_context(|| format!("loading {}", path.display()))?),
        None => None,
    };
    let system = DeskSystem::start(&config, seed).await?;
    let (notifier, mut notices) = Notifier::channel();
    let mut shell = Shell::sign_in("admin");

    if system.client_store.count_clients().await? == 0 {
        let span = tracing::info_span!("demo_seed");
        seed_demo_data(&system, &notifier).instrument(span).await?;
    }

    shell.navigate("/dashboard")?;
    let mut dashboard = Dashboard::new(
        system.order_store.clone(),
        system.client_store.clone(),
        system.product_store.clone(),
        notifier.clone(),
    );
    dashboard.refresh().await;
    let now = Local::now().naive_local();
    for period in Period::ALL {
        dashboard.set_period(period);
        let kpis = dashboard.kpis(now);
        info!(
            period = period.label(),
            orders = kpis.orders,
            revenue = %format_currency(kpis.revenue),
            products_sold = %kpis.products_sold,
            active_customers = kpis.active_customers,
            total_products = kpis.total_products,
            "KPIs"
        );
    }
    info!(open_orders = dashboard.open_orders().len(), "Open orders");

    for notice in notices.drain() {
        info!(title = %notice.title, variant = ?notice.variant, "Notice");
    }

    if let Some(path) = &config.snapshot_file {
        let snapshot = system.snapshot().await?;
        if let Err(e) = snapshot.save(path) {
            error!(error = %e, "Snapshot not written");
        }
    }

    shell.logout();
    system.shutdown().await?;
    info!("Application completed successfully");
    Ok(())
}

/// Fills an empty system through the same pages a user would drive.
async fn seed_demo_data(system: &DeskSystem, notifier: &Notifier) -> anyhow::Result<()> {
    let mut clients = ClientsPage::new(system.client_store.clone(), notifier.clone());
    for (kind, name, document, phone) in [
        (ClientKind::Individual, "João Silva", "123.456.789-01", "(11) 99999-1234"),
        (ClientKind::Organization, "Acme Ferramentas Ltda", "12.345.678/0001-99", "(11) 3333-4444"),
    ] {
        clients.open_create();
        if let Some(form) = clients.form_mut() {
            *form = ClientForm {
                kind,
                name: name.to_string(),
                document: document.to_string(),
                phone: phone.to_string(),
                ..ClientForm::new()
            };
        }
        expect_saved(clients.submit().await, name)?;
    }

    let mut products = ProductsPage::new(system.product_store.clone(), notifier.clone());
    for (description, unit, price, status) in [
        ("Notebook", Unit::Each, dec!(3500), ProductStatus::Active),
        ("Cabo de rede", Unit::Meter, dec!(2.5), ProductStatus::Active),
        ("Monitor CRT", Unit::Each, dec!(150), ProductStatus::Inactive),
    ] {
        products.open_create();
        if let Some(form) = products.form_mut() {
            *form = ProductForm {
                description: description.to_string(),
                unit,
                unit_price: price,
                status,
                ..ProductForm::new()
            };
        }
        expect_saved(products.submit().await, description)?;
    }

    let mut orders = OrdersPage::new(
        system.order_store.clone(),
        system.client_store.clone(),
        system.product_store.clone(),
        notifier.clone(),
    );
    orders.refresh().await;
    let today = Local::now().date_naive();
    let client_ids: Vec<_> = orders.clients().iter().map(|c| c.id).collect();
    let catalog: Vec<_> = orders.available_products().into_iter().cloned().collect();

    for (index, client_id) in client_ids.into_iter().enumerate() {
        orders.open_create(today);
        if let Some(form) = orders.form_mut() {
            form.client_id = Some(client_id);
            form.with_invoice = index % 2 == 0;
            for (line, product) in catalog.iter().enumerate() {
                if line > 0 {
                    form.add_item();
                }
                form.select_product(line, product)?;
                form.set_quantity(line, rust_decimal::Decimal::from(index as u64 + line as u64 + 1))?;
            }
        }
        expect_saved(orders.submit().await, "order")?;
    }

    if let Some(first) = orders.orders().last().map(|d| d.order.id) {
        if orders.request_close(first) {
            orders.confirm().await;
        }
    }
    Ok(())
}

fn expect_saved(outcome: SubmitOutcome, what: &str) -> anyhow::Result<()> {
    match outcome {
        SubmitOutcome::Saved => Ok(()),
        SubmitOutcome::Invalid(errors) => Err(anyhow::anyhow!("demo {what} rejected: {errors}")),
        other => Err(anyhow::anyhow!("demo {what} not saved: {other:?}")),
    }
}
