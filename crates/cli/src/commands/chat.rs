//! `pathfinder chat` — the interactive advising loop.
//!
//! The terminal stands in for the original selector sidebar: slash
//! commands drive program/semester/focus, free text becomes user messages.
//! Every selector change re-resolves the profile and re-renders the
//! summary message in place.

use pathfinder_advisor::{AdvisorSession, SessionOptions};
use pathfinder_catalog::ReferenceCatalogs;
use pathfinder_config::AppConfig;
use pathfinder_core::error::{Error, ProviderError};
use pathfinder_core::message::{Message, Role};
use pathfinder_core::profile::Program;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{self, AsyncBufReadExt, BufReader};
use tracing::debug;

pub async fn run(
    message: Option<String>,
    program: Option<String>,
    semester: Option<u8>,
    focus: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    // Reference data is fatal at startup — the error names the file.
    let catalogs = Arc::new(ReferenceCatalogs::load(&config.data_dir).map_err(Error::from)?);
    let (modules, careers, regulations) = catalogs.entry_counts();
    debug!(
        dir = %config.data_dir.display(),
        modules,
        careers,
        regulations,
        "Reference catalogs loaded"
    );

    // A missing API key is deliberately NOT checked here: it surfaces as a
    // clear error when a completion is actually attempted.
    let provider = Arc::new(pathfinder_providers::build_from_config(&config));
    let mut session = AdvisorSession::new(provider, catalogs, SessionOptions::from_config(&config));

    // Apply selector presets from flags.
    if let Some(name) = program {
        let parsed = Program::parse(&name)
            .ok_or_else(|| format!("Unbekannter Studiengang: {name} (siehe /program)"))?;
        session.select_program(Some(parsed));
    }
    if let Some(n) = semester {
        session.select_semester(n)?;
    }
    if let Some(choice) = focus {
        session.select_focus(Some(&choice))?;
    }
    session.sync_profile();
    debug!(
        program = ?session.program(),
        semester = session.semester(),
        "Selector presets applied"
    );

    if let Some(text) = message {
        // Single message mode
        eprint!("  ...");
        let reply = session.ask(&text).await?;
        eprint!("\r     \r");
        println!("{reply}");
        return Ok(());
    }

    // Interactive mode
    println!();
    println!("  ╔═══════════════════════════════════════════════╗");
    println!("  ║   🎓 Path Finder — Studien- & Karriereberater  ║");
    println!("  ╚═══════════════════════════════════════════════╝");
    println!();
    println!("  Modell:   {}", config.model);
    println!("  Daten:    {}", config.data_dir.display());
    println!("  Befehle:  /help zeigt alle Befehle, 'exit' beendet.");

    for msg in session.transcript().messages() {
        render(msg);
    }
    prompt()?;

    let stdin = io::stdin();
    let reader = BufReader::new(stdin);
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim().to_string();
        if line.is_empty() {
            prompt()?;
            continue;
        }

        if matches!(line.as_str(), "exit" | "quit" | "/exit" | "/quit" | ":q") {
            break;
        }

        if line.starts_with('/') {
            handle_command(&mut session, &line);
        } else {
            eprint!("  ...");
            match session.ask(&line).await {
                Ok(reply) => {
                    eprint!("\r     \r");
                    println!();
                    for l in reply.lines() {
                        println!("  Path Finder > {l}");
                    }
                    println!();
                }
                Err(e) => {
                    eprint!("\r     \r");
                    render_failure(&e);
                }
            }
        }

        prompt()?;
    }

    println!();
    println!("  Bis bald — und viel Erfolg im Studium! 👋");
    println!();

    Ok(())
}

fn prompt() -> std::io::Result<()> {
    print!("  Du > ");
    std::io::stdout().flush()
}

fn render(msg: &Message) {
    let tag = match msg.role {
        Role::Assistant => "Path Finder",
        Role::User => "Du",
        Role::System => "System",
    };
    println!();
    for line in msg.content.lines() {
        println!("  {tag} > {line}");
    }
    println!();
}

/// The completion call failed: apologize, keep the transcript intact.
fn render_failure(err: &Error) {
    println!();
    println!("  Path Finder > Entschuldigung, ich kann dir gerade nicht antworten.");
    println!("  Path Finder > Deine Frage bleibt gespeichert — versuch es einfach nochmal.");
    if let Error::Provider(ProviderError::NotConfigured(hint)) = err {
        println!("  [Hinweis] {hint}");
    } else {
        println!("  [Fehler] {err}");
    }
    println!();
}

fn handle_command(session: &mut AdvisorSession, line: &str) {
    let (command, arg) = match line.split_once(char::is_whitespace) {
        Some((c, a)) => (c, a.trim()),
        None => (line, ""),
    };

    match command {
        "/help" => {
            println!();
            println!("  /program [Nr|Name]   Studiengang wählen (ohne Argument: Liste)");
            println!("  /semester <1-10>     Aktuelles Semester setzen");
            println!("  /focus [Name]        Schwerpunkt wählen (ohne Argument: Optionen)");
            println!("  /profile             Aktuelles Profil anzeigen");
            println!("  /modules             Modulkatalog zum Studiengang");
            println!("  /careers             Karriereprofile zum Studiengang");
            println!("  /transcript          Gesamten Verlauf erneut anzeigen");
            println!("  exit                 Beenden");
            println!();
        }
        "/program" => {
            if arg.is_empty() {
                println!();
                for (i, p) in Program::ALL.iter().enumerate() {
                    println!("  {}. {}", i + 1, p.name());
                }
                println!();
                return;
            }
            match Program::parse(arg) {
                Some(program) => {
                    session.select_program(Some(program));
                    sync_and_render(session);
                }
                None => println!("  Unbekannter Studiengang: {arg} (Liste mit /program)"),
            }
        }
        "/semester" => match arg.parse::<u8>() {
            Ok(n) => match session.select_semester(n) {
                Ok(()) => sync_and_render(session),
                Err(e) => println!("  {e}"),
            },
            Err(_) => println!("  Bitte eine Zahl zwischen 1 und 10 angeben."),
        },
        "/focus" => {
            if arg.is_empty() {
                match session.program() {
                    Some(p) if !p.focus_options().is_empty() => {
                        println!("  Schwerpunkte in {}: {}", p, p.focus_options().join(", "));
                    }
                    Some(p) => println!("  {p} bietet keine Schwerpunktwahl an."),
                    None => println!("  Bitte zuerst einen Studiengang wählen (/program)."),
                }
                return;
            }
            match session.select_focus(Some(arg)) {
                Ok(()) => sync_and_render(session),
                Err(e) => println!("  {e}"),
            }
        }
        "/profile" => {
            println!();
            match session.profile() {
                Some(p) => {
                    println!("  Studiengang:  {}", p.program);
                    println!("  Semester:     {}", p.semester);
                    println!("  Studienphase: {}", p.phase);
                    println!("  Schwerpunkt:  {}", p.specialization);
                }
                None => println!("  Noch kein Studiengang gewählt (/program)."),
            }
            println!();
        }
        "/modules" => render_catalog_entry(session, "Modulkatalog", |s, p| {
            s.catalogs().modules_for(p).cloned()
        }),
        "/careers" => render_catalog_entry(session, "Karriereprofile", |s, p| {
            s.catalogs().careers_for(p).cloned()
        }),
        "/transcript" => {
            for msg in session.transcript().messages() {
                render(msg);
            }
        }
        _ => println!("  Unbekannter Befehl: {command} (/help)"),
    }
}

/// Re-resolve after a selector change and show the (new or replaced)
/// summary message.
fn sync_and_render(session: &mut AdvisorSession) {
    if let Some(summary) = session.sync_profile() {
        let summary = summary.clone();
        render(&summary);
    }
}

fn render_catalog_entry(
    session: &AdvisorSession,
    label: &str,
    lookup: impl Fn(&AdvisorSession, Program) -> Option<serde_json::Value>,
) {
    let Some(program) = session.program() else {
        println!("  Bitte zuerst einen Studiengang wählen (/program).");
        return;
    };
    match lookup(session, program) {
        Some(entry) => {
            println!();
            println!("  {label} für {program}:");
            let pretty = serde_json::to_string_pretty(&entry).unwrap_or_default();
            for line in pretty.lines() {
                println!("  {line}");
            }
            println!();
        }
        None => println!("  Keine Daten zu {program} im {label}."),
    }
}
