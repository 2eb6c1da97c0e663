mod ui;

use chrono::{DateTime, Utc};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};
use streets::character::{create_player, validate_name, CharClass};
use streets::constants::*;
use streets::encounter::{Run, RunStatus, Stage};
use streets::logging::init_logging;
use streets::persistence::{
    Difficulty, JsonStore, LeaderboardKind, LoggedAudio, PersistencePort, SaveBrowser, Toggle,
};

type GameRun = Run<JsonStore, LoggedAudio>;

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(String::as_str).unwrap_or("--help");

    match command {
        "--version" | "-v" => {
            println!("streets {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        "--help" | "-h" => {
            print_help();
            return Ok(());
        }
        _ => {}
    }

    let mut store = JsonStore::new()?;
    if let Err(e) = init_logging(store.root()) {
        eprintln!("Warning: could not open log file: {}", e);
    }

    let rest = &args[2..];
    match command {
        "new" => cmd_new(rest, store),
        "continue" => cmd_continue(rest, store),
        "saves" => cmd_saves(&store),
        "delete" => cmd_delete(rest, &mut store),
        "history" => cmd_history(rest, &store),
        "leaderboard" => cmd_leaderboard(rest, &store),
        "settings" => cmd_settings(rest, &mut store),
        other => {
            eprintln!("Unknown command: {}", other);
            eprintln!("Run 'streets --help' for usage.");
            std::process::exit(1);
        }
    }
}

fn print_help() {
    println!("Streets - Turn-Based Street Fight RPG\n");
    println!("Usage: streets <command> [args]\n");
    println!("Commands:");
    println!("  new <name> [citizen|soldier|police]   Start a new run");
    println!("  continue <name>                       Continue a saved character");
    println!("  saves                                 List saved characters");
    println!("  delete <name>                         Delete a save and its history");
    println!("  history <name>                        Show recent battles");
    println!("  leaderboard [fastest|damage|kills]    Show the leaderboard");
    println!("  settings [difficulty <easy|normal|hard>] [sound|music|effects]");
    println!("                                        Show or change settings");
    println!("  --version                             Show version information");
    println!("  --help                                Show this help message");
}

fn require_name(rest: &[String], usage: &str) -> String {
    match rest.first() {
        Some(name) => name.trim().to_string(),
        None => {
            eprintln!("Usage: streets {}", usage);
            std::process::exit(1);
        }
    }
}

fn cmd_new(rest: &[String], store: JsonStore) -> io::Result<()> {
    let name = require_name(rest, "new <name> [citizen|soldier|police]");
    if let Err(e) = validate_name(&name) {
        eprintln!("Invalid name: {}", e);
        std::process::exit(1);
    }

    let char_class = match rest.get(1) {
        Some(arg) => match CharClass::parse(arg) {
            Some(c) => c,
            None => {
                eprintln!("Unknown class: {} (choose citizen, soldier or police)", arg);
                std::process::exit(1);
            }
        },
        None => CharClass::Citizen,
    };

    if store.load_character(&name)?.is_some() {
        eprintln!(
            "A save named '{}' already exists. Use 'streets continue {}' or delete it first.",
            name, name
        );
        std::process::exit(1);
    }
    if store.save_file_taken(&name) {
        eprintln!(
            "'{}' is too close to an existing save name. Pick another name.",
            name
        );
        std::process::exit(1);
    }

    let mut rng = rand::thread_rng();
    let player = create_player(&name, char_class, &mut rng);
    println!(
        "{} the {} takes up a {} (damage {}, special at {}).",
        player.name,
        player.char_class,
        player.weapon,
        player.weapon_damage(),
        player.special_threshold()
    );

    let mut run = Run::new(player, Stage::Forest, store, LoggedAudio::default(), &mut rng);
    run.autosave();
    play(run, &mut rng)
}

fn cmd_continue(rest: &[String], store: JsonStore) -> io::Result<()> {
    let name = require_name(rest, "continue <name>");
    let mut rng = rand::thread_rng();

    match Run::resume(&name, store, LoggedAudio::default(), &mut rng)? {
        Some(run) => play(run, &mut rng),
        None => {
            eprintln!("No save found for '{}'. Run 'streets saves' to list them.", name);
            std::process::exit(1);
        }
    }
}

fn format_timestamp(ts: i64) -> String {
    DateTime::<Utc>::from_timestamp(ts, 0)
        .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn format_duration(seconds: f64) -> String {
    let whole = seconds.max(0.0) as u64;
    format!("{}m {:02}s", whole / 60, whole % 60)
}

fn cmd_saves(store: &JsonStore) -> io::Result<()> {
    let saves = store.list_saves()?;
    if saves.is_empty() {
        println!("No saved characters. Start one with 'streets new <name>'.");
        return Ok(());
    }

    println!("{:<16} {:>5} {:>6}  Last saved", "Name", "Level", "Stage");
    for save in saves {
        println!(
            "{:<16} {:>5} {:>6}  {}",
            save.name,
            save.level,
            format!("{}/{}", save.stage, FINAL_STAGE),
            format_timestamp(save.last_saved)
        );
    }
    Ok(())
}

fn cmd_delete(rest: &[String], store: &mut JsonStore) -> io::Result<()> {
    let name = require_name(rest, "delete <name>");
    if store.delete_save(&name)? {
        println!("Deleted '{}' and their battle history.", name);
    } else {
        eprintln!("No save found for '{}'.", name);
        std::process::exit(1);
    }
    Ok(())
}

fn cmd_history(rest: &[String], store: &JsonStore) -> io::Result<()> {
    let name = require_name(rest, "history <name>");
    let limit = rest
        .get(1)
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(HISTORY_DEFAULT_LIMIT);

    let history = store.combat_history(&name, limit)?;
    if history.is_empty() {
        println!("No battles recorded for '{}'.", name);
    } else {
        println!("Recent battles for {}:", name);
        for record in history {
            println!(
                "  {}  Stage {}  {:<8} vs {}",
                format_timestamp(record.timestamp),
                record.stage,
                record.result,
                record.enemy_name
            );
        }
    }

    if let Some(best) = store.player_best_time(&name)? {
        println!("Best completion time: {}", format_duration(best));
    }
    Ok(())
}

fn cmd_leaderboard(rest: &[String], store: &JsonStore) -> io::Result<()> {
    let kind = match rest.first() {
        Some(arg) => match LeaderboardKind::parse(arg) {
            Some(kind) => kind,
            None => {
                eprintln!("Unknown leaderboard: {} (choose fastest, damage or kills)", arg);
                std::process::exit(1);
            }
        },
        None => LeaderboardKind::Fastest,
    };

    let entries = store.leaderboard(kind)?;
    println!("🏆 {}", kind.title());
    if entries.is_empty() {
        println!("  Nobody has escaped yet.");
        return Ok(());
    }

    for (i, entry) in entries.iter().enumerate() {
        println!(
            "  {:>2}. {:<16} {:>8}  {:>6} dmg  {} kills  {:<6}  {}",
            i + 1,
            entry.player_name,
            format_duration(entry.completion_seconds),
            entry.total_damage,
            entry.enemies_defeated,
            entry.difficulty,
            format_timestamp(entry.run_date)
        );
    }
    Ok(())
}

fn cmd_settings(rest: &[String], store: &mut JsonStore) -> io::Result<()> {
    let mut settings = store.load_settings()?;
    let mut changed = false;

    let mut args = rest.iter();
    while let Some(arg) = args.next() {
        if arg.eq_ignore_ascii_case("difficulty") {
            let value = args.next().map(String::as_str).unwrap_or("");
            match Difficulty::parse(value) {
                Some(d) => settings.difficulty = d,
                None if value.is_empty() => settings.difficulty = settings.difficulty.next(),
                None => {
                    eprintln!("Unknown difficulty: {} (choose easy, normal or hard)", value);
                    std::process::exit(1);
                }
            }
            changed = true;
        } else if let Some(toggle) = Toggle::parse(arg) {
            settings.toggle(toggle);
            changed = true;
        } else {
            eprintln!("Unknown setting: {}", arg);
            std::process::exit(1);
        }
    }

    if changed {
        store.save_settings(&settings)?;
    }

    let on_off = |b: bool| if b { "on" } else { "off" };
    println!("Sound:          {}", on_off(settings.sound_enabled));
    println!("Music:          {}", on_off(settings.music_enabled));
    println!("Screen effects: {}", on_off(settings.screen_effects));
    println!(
        "Difficulty:     {} ({})",
        settings.difficulty,
        settings.difficulty.description()
    );
    Ok(())
}

/// Runs the battle screen until the run ends, then restores the terminal.
fn play(mut run: GameRun, rng: &mut impl rand::Rng) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = battle_loop(&mut terminal, &mut run, rng);

    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result?;

    if let Some(last) = run.messages().last() {
        println!("{}", last);
    }
    let player = run.player();
    println!(
        "{} | Level {} | XP {}/{} | Kills {} | Damage {}",
        player.name,
        player.level,
        player.xp,
        player.xp_to_next,
        run.enemies_defeated(),
        run.total_damage()
    );
    Ok(())
}

fn battle_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    run: &mut GameRun,
    rng: &mut impl rand::Rng,
) -> io::Result<()> {
    let enemy_delay = Duration::from_millis(ENEMY_TURN_DELAY_MS);
    let autosave_interval = Duration::from_secs(AUTOSAVE_INTERVAL_SECONDS);

    let mut paused = false;
    let mut enemy_due: Option<Instant> = None;
    let mut last_autosave = Instant::now();

    loop {
        let view = run.view();
        terminal.draw(|f| ui::draw_battle_scene(f, &view, paused))?;

        if run.status() == RunStatus::InProgress && !paused {
            if last_autosave.elapsed() >= autosave_interval {
                run.autosave();
                last_autosave = Instant::now();
            }

            if run.enemy_turn_pending() {
                match enemy_due {
                    None => enemy_due = Some(Instant::now() + enemy_delay),
                    Some(due) if Instant::now() >= due => {
                        run.enemy_turn(rng);
                        enemy_due = None;
                    }
                    Some(_) => {}
                }
            }
        }

        if !event::poll(Duration::from_millis(INPUT_POLL_MS))? {
            continue;
        }
        let key = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => key,
            _ => continue,
        };

        if run.status().is_over() {
            return Ok(());
        }

        match key.code {
            KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Esc => {
                paused = !paused;
                // resuming restarts the enemy's delay from scratch
                if !paused && enemy_due.is_some() {
                    enemy_due = Some(Instant::now() + enemy_delay);
                }
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                run.quit();
                return Ok(());
            }
            _ if paused => {}
            KeyCode::Char('a') | KeyCode::Char('A') => {
                run.attack(rng);
            }
            KeyCode::Char('d') | KeyCode::Char('D') => {
                run.defend(rng);
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                run.special(rng);
            }
            KeyCode::Char('f') | KeyCode::Char('F') => {
                run.flee(rng);
            }
            _ => {}
        }
    }
}
