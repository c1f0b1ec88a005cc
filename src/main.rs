// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{anyhow, bail, Context, Result};
use std::env;

// Use library instead of local modules
use roster_admin::money::MAX_INTEGER_DIGITS;
use roster_admin::{
    logging, AgentId, Config, EditForm, HttpCollection, MutationOutcome, RefreshOutcome,
    RemoteCollection, Roster,
};

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    let config = Config::load().context("Failed to load configuration")?;
    let _log_guard = logging::init(&config)?;

    let collection = HttpCollection::from_config(&config)
        .map_err(|e| anyhow!("Failed to build API client: {}", e))?;
    let roster = Roster::new(collection);

    tracing::info!(
        api_url = %config.api_url,
        version = roster_admin::VERSION,
        "Starting roster admin"
    );

    match args.get(1).map(String::as_str) {
        Some("list") => run_list(&roster).await,
        Some("set-compensation") => {
            let id = parse_id(args.get(2))?;
            let amount = args
                .get(3)
                .ok_or_else(|| anyhow!("Usage: roster-admin set-compensation <id> <amount>"))?;
            run_set_compensation(&roster, id, amount).await
        }
        Some("delete") => {
            let id = parse_id(args.get(2))?;
            run_delete(&roster, id).await
        }
        Some(other) => bail!(
            "Unknown command {:?}. Commands: list, set-compensation <id> <amount>, delete <id>",
            other
        ),
        // UI mode (default)
        None => run_ui_mode(roster),
    }
}

fn parse_id(arg: Option<&String>) -> Result<AgentId> {
    let arg = arg.ok_or_else(|| anyhow!("Missing agent id"))?;
    arg.parse()
        .with_context(|| format!("Invalid agent id {:?}", arg))
}

async fn load<C: RemoteCollection>(roster: &Roster<C>) -> Result<()> {
    match roster.refresh().await {
        RefreshOutcome::Failed(message) => bail!(message),
        _ => Ok(()),
    }
}

fn finish(outcome: MutationOutcome) -> Result<()> {
    match outcome {
        MutationOutcome::Completed => Ok(()),
        MutationOutcome::Failed(message) => bail!(message),
    }
}

async fn run_list<C: RemoteCollection>(roster: &Roster<C>) -> Result<()> {
    load(roster).await?;
    let snapshot = roster.snapshot();

    println!("🕵️  Agent Roster ({} agents)", snapshot.agents.len());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!(
        "{:>6}  {:<24} {:<18} {:>6}  {:>14}",
        "ID", "Name", "Category", "Years", "Compensation"
    );
    for agent in &snapshot.agents {
        println!(
            "{:>6}  {:<24} {:<18} {:>6}  {:>14}",
            agent.id,
            agent.name,
            agent.category,
            agent.tenure,
            agent.compensation_label()
        );
    }

    Ok(())
}

async fn run_set_compensation<C: RemoteCollection>(
    roster: &Roster<C>,
    id: AgentId,
    amount: &str,
) -> Result<()> {
    load(roster).await?;

    let snapshot = roster.snapshot();
    let agent = snapshot
        .agent(id)
        .ok_or_else(|| anyhow!("Agent {} not found", id))?;

    roster.begin_edit(id)?;

    // Same path as a paste into the edit field
    let mut form = EditForm::new(&agent.compensation);
    if !form.input_compensation(amount) {
        roster.cancel_edit(id)?;
        bail!(
            "Amount {:?} rejected (max {} digits before decimal); compensation left at {}",
            amount,
            MAX_INTEGER_DIGITS,
            agent.compensation
        );
    }

    let Some(change) = form.submit() else {
        roster.cancel_edit(id)?;
        bail!(form.error.unwrap_or_default());
    };

    if change.compensation != amount {
        println!("ℹ️  Amount normalized to {}", change.compensation);
    }

    finish(roster.update(id, change).await?)?;
    println!("✓ Updated compensation for {}", agent.name);
    Ok(())
}

async fn run_delete<C: RemoteCollection>(roster: &Roster<C>, id: AgentId) -> Result<()> {
    load(roster).await?;

    let name = roster
        .snapshot()
        .agent(id)
        .map(|a| a.name.clone())
        .ok_or_else(|| anyhow!("Agent {} not found", id))?;

    finish(roster.delete(id).await?)?;
    println!("✓ Deleted {}", name);
    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode(roster: Roster<HttpCollection>) -> Result<()> {
    println!("🖥️  Loading Roster Admin UI...\n");

    let mut app = ui::App::new(roster);
    ui::run_ui(&mut app)?;

    println!("\n✅ UI closed successfully");

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_roster: Roster<HttpCollection>) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or use: roster-admin list");
    std::process::exit(1);
}
