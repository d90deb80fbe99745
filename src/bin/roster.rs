use anyhow::{Result, anyhow};
use game_poll_bot::config::roster_path_from_env;
use game_poll_bot::storage::RosterStore;
use game_poll_bot::voting::{rank_participants, Participant, Tally};
use std::env;
use std::io;

fn main() -> Result<()> {
    // Initialize basic logging for the tool
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    dotenvy::dotenv().ok();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    let command = args.get(1).map(|s| s.as_str()).unwrap_or("check");

    match command {
        "check" => check_roster(),
        "show" => show_ranking(),
        "reset" => reset_history(),
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        _ => {
            eprintln!("Unknown command: {command}");
            print_help();
            std::process::exit(1);
        }
    }
}

fn open_store() -> RosterStore {
    let store = RosterStore::new(roster_path_from_env());
    println!("📄 Roster file: {}", store.path().display());
    store
}

fn check_roster() -> Result<()> {
    println!("🔍 Checking roster file...");

    let store = open_store();
    let parsed = store.load_detailed()
        .map_err(|e| anyhow!("Failed to read roster: {}", e))?;

    println!("✅ {} participants:", parsed.participants.len());
    for p in &parsed.participants {
        println!("  • {} ({} / {} / {})", p.mention(), p.history.yes, p.history.no, p.history.abstain);
    }

    if parsed.skipped.is_empty() {
        println!("\n🎯 No malformed lines.");
    } else {
        println!("\n⚠️  {} lines skipped (expected `<handle> <yes> <no> <abstain>`):", parsed.skipped.len());
        for line in &parsed.skipped {
            println!("  • line {}: {}", line.line_no, line.content);
        }
    }

    Ok(())
}

fn show_ranking() -> Result<()> {
    let store = open_store();
    let participants = store.load()?;

    println!("🏆 All-time attendance (yes / no / silent):");
    for (i, p) in rank_participants(&participants).iter().enumerate() {
        println!("  {:>2}. {:<24} {} / {} / {}", i + 1, p.key(), p.history.yes, p.history.no, p.history.abstain);
    }

    Ok(())
}

fn reset_history() -> Result<()> {
    println!("⚠️  WARNING: This will zero the vote history of every participant!");
    println!("🤔 Are you sure you want to continue? (yes/no)");

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    if input.trim().to_lowercase() != "yes" {
        println!("❌ Reset cancelled.");
        return Ok(());
    }

    let store = open_store();
    let cleared: Vec<Participant> = store.load()?
        .into_iter()
        .map(|p| Participant::new(p.handle, Tally::default()))
        .collect();
    store.save(&cleared)?;

    println!("✅ History reset for {} participants. Malformed lines were dropped.", cleared.len());

    Ok(())
}

fn print_help() {
    println!("🎲 Game Poll Bot - Roster Tool");
    println!();
    println!("USAGE:");
    println!("    roster [COMMAND]");
    println!();
    println!("COMMANDS:");
    println!("    check          List participants and malformed lines (default)");
    println!("    show           Print the all-time ranking");
    println!("    reset          Zero every participant's history - DESTRUCTIVE!");
    println!("    help           Show this help message");
    println!();
    println!("ENVIRONMENT:");
    println!("    ROSTER_PATH    Roster file (default: users)");
    println!();
    println!("EXAMPLES:");
    println!("    roster                     # Validate the roster");
    println!("    roster show                # Who shows up the most");
    println!("    roster reset               # Start counting from zero (careful!)");
    println!();
}
