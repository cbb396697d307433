use std::sync::Arc;

use ecoboard_auth::{Account, Role, UserId};
use ecoboard_client::{
    AuthContext, ClientConfig, FileSessionStore, GateOutcome, ProtectedGate, Route, SessionStore,
};
use ecoboard_dashboard as dashboard;
use ecoboard_remote::{HttpIdentityGateway, IdentityGateway, InMemoryIdentityGateway};

const DEMO_EMAIL: &str = "admin@malabar.eco";
const DEMO_PASSWORD: &str = "password";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    ecoboard_observability::init();

    let config = ClientConfig::from_env();

    let demo_mode = config.api_url.is_none();
    let gateway: Arc<dyn IdentityGateway> = match &config.api_url {
        Some(url) => Arc::new(HttpIdentityGateway::new(url.clone(), config.api_key.clone())),
        None => {
            tracing::warn!("ECOBOARD_API_URL not set; using the built-in demo identity service");
            Arc::new(demo_gateway()?)
        }
    };

    let store: Arc<dyn SessionStore> = Arc::new(match &config.data_dir {
        Some(dir) => FileSessionStore::new(dir.join("user.json")),
        None => FileSessionStore::in_default_location()?,
    });

    let ctx = AuthContext::start(gateway, store).await;

    let gate = ProtectedGate::new();
    let mut outcome = gate.resolve(&ctx).await;

    // Nobody signed in: in demo mode, walk through the login flow the way
    // the login screen would.
    if demo_mode && outcome == GateOutcome::Redirect(Route::Login) {
        tracing::info!("signing in with the demo account {DEMO_EMAIL}");
        ctx.login(DEMO_EMAIL, DEMO_PASSWORD).await?;
        outcome = gate.resolve(&ctx).await;
    }

    match outcome {
        GateOutcome::Allow => {
            let user = ctx.current_user().expect("allowed gate implies a user");
            render_dashboard(&user);
        }
        GateOutcome::Redirect(route) => {
            println!("not signed in; redirecting to {}", route.path());
            if let Some(error) = ctx.snapshot().error {
                println!("last auth diagnostic: {error}");
            }
        }
        GateOutcome::Pending => println!("session sync still in flight"),
    }

    ctx.shutdown();
    Ok(())
}

/// Self-contained identity service so the binary runs without a backend.
fn demo_gateway() -> anyhow::Result<InMemoryIdentityGateway> {
    let hash = bcrypt::hash(DEMO_PASSWORD, 10)?;
    Ok(InMemoryIdentityGateway::with_accounts([Account {
        id: UserId::new(),
        email: DEMO_EMAIL.to_string(),
        password_hash: hash,
        role: Role::Admin,
        full_name: "Malabar Admin".to_string(),
    }]))
}

fn render_dashboard(user: &Account) {
    println!("{}", dashboard::BRAND);
    println!("Welcome back, {}!", user.full_name);
    println!("Here's an overview of Malabar Eco Solutions' operations\n");

    for card in dashboard::overview_stats() {
        println!("  {:<18} {:>10}  ({})", card.title, card.value, card.subtext);
    }

    println!("\nCollection Trend");
    for point in dashboard::collection_trend() {
        println!("  {}  ₹{:.1}", point.date, point.value);
    }

    println!("\nRecent Sales");
    for sale in dashboard::recent_sales() {
        println!(
            "  {:<12} {}  {}",
            sale.customer,
            sale.description,
            dashboard::format_inr(sale.amount)
        );
    }

    println!();
    for section in dashboard::sidebar() {
        if let Some(title) = section.title {
            println!("[{title}]");
        }
        let labels: Vec<_> = section.items.iter().map(|i| i.label).collect();
        println!("{}", labels.join(" | "));
    }

    println!("\nSigned in as {} ({})", user.full_name, user.role);
}
