use crossterm::event::{self, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use laneshift::build_info;
use laneshift::cli::{self, Command};
use laneshift::config::RunConfig;
use laneshift::error::AppError;
use laneshift::input::{handle_key_event, HeldKeys};
use laneshift::logging;
use laneshift::session::Session;
use laneshift::ui;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::backend::Backend;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::process::ExitCode;
use std::time::{Duration, Instant};
use tracing::{error, info};

/// Target frame time for drawing and input polling.
const FRAME_MS: u64 = 16;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "exiting with error");
            eprintln!("laneshift: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), AppError> {
    let args = match cli::parse_args(std::env::args().skip(1))? {
        Command::Help => {
            println!("{}", cli::USAGE);
            return Ok(());
        }
        Command::Version => {
            println!("{}", build_info::version_line());
            return Ok(());
        }
        Command::Run(args) => args,
    };

    let log_path = logging::init_tracing(&logging::default_log_dir())?;
    info!(version = %build_info::version_line(), log = %log_path.display(), "starting");

    let config = RunConfig::resolve(args.config.as_deref())?;
    let mut rng = match args.seed {
        Some(seed) => {
            info!(seed, "using fixed seed");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };
    let mut session = Session::new(config);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut session, &mut rng);

    // Restore terminal before reporting anything
    let restored = restore_terminal(&mut terminal);

    info!(
        runs = session.runs_played,
        best = session.best_score,
        "session ended"
    );
    first_error(result, restored)
}

/// Every step runs even if an earlier one fails; the first failure is returned.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    let raw = disable_raw_mode();
    let screen = terminal.backend_mut().execute(LeaveAlternateScreen).map(|_| ());
    let cursor = terminal.show_cursor();
    raw.and(screen).and(cursor)
}

/// An error from the game loop takes precedence over one from terminal teardown.
fn first_error(result: Result<(), AppError>, restored: io::Result<()>) -> Result<(), AppError> {
    if let Err(e) = &restored {
        error!(error = %e, "failed to restore terminal");
    }
    result?;
    restored.map_err(AppError::from)
}

fn run_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    session: &mut Session,
    rng: &mut StdRng,
) -> Result<(), AppError> {
    let mut held = HeldKeys::new();
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| ui::draw(frame, session))?;

        let timeout = Duration::from_millis(FRAME_MS).saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            // Drain everything queued so held keys stay fresh
            loop {
                if let Event::Key(key) = event::read()? {
                    handle_key_event(session, &mut held, key, Instant::now());
                }
                if !event::poll(Duration::ZERO)? {
                    break;
                }
            }
        }

        if session.quit_requested() {
            return Ok(());
        }

        // Whole milliseconds only; the remainder stays on the clock
        let dt_ms = last_tick.elapsed().as_millis() as u64;
        last_tick += Duration::from_millis(dt_ms);

        session.set_held(held.state(Instant::now()));
        session.tick(dt_ms, rng);
    }
}
