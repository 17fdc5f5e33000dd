//! docview: an interactive terminal viewer for documentation pages.
#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use docview::app_state::{AppState, Flow};
use docview::clipboard::SystemClipboard;
use docview::config::Config;
use docview::formats::markdown::MarkdownFormat;
use docview::keymap::Shortcut;
use docview::prefs::JsonFileStore;
use docview::theme::ThemeSwitcher;
use docview::translate::{Layout, WidgetInit};
use docview::{input, print, ui};
use ratatui::crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Instant;
use tracing::Level;

#[derive(Parser)]
#[command(name = "docview")]
#[command(about = "Read a documentation page in the terminal", long_about = None)]
struct Args {
    /// Page to view, or a directory holding an index page
    #[arg(value_name = "PATH", required_unless_present = "translate_options")]
    path: Option<PathBuf>,

    /// Configuration file (defaults to ./docview.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Start with this search query applied
    #[arg(long, short = 's', value_name = "QUERY")]
    search: Option<String>,

    /// Write the page as plain text to stdout and exit
    #[arg(long)]
    print: bool,

    /// Print the translation widget init contract as JSON and exit
    #[arg(long)]
    translate_options: bool,

    /// Picker layout used by --translate-options
    #[arg(long, value_enum, value_name = "LAYOUT", default_value = "simple")]
    translate_layout: Layout,

    /// Write logs to this file
    #[arg(long, value_name = "FILE")]
    log: Option<PathBuf>,

    /// More detailed logs (repeat for trace)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(path: Option<&Path>, verbose: u8) -> io::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let level = match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(File::create(path)?))
        .with_ansi(false)
        .with_max_level(level)
        .init();
    Ok(())
}

fn main() -> docview::Result<()> {
    let args = Args::parse();
    init_logging(args.log.as_deref(), args.verbose)?;

    if args.translate_options {
        println!("{}", WidgetInit::with_layout(args.translate_layout).to_json()?);
        return Ok(());
    }

    let Some(path) = args.path else {
        return Ok(());
    };
    let cfg = args
        .config
        .as_deref()
        .map_or_else(Config::load, Config::load_from);

    let page = input::find_page(&path, &MarkdownFormat)?;
    let mut document = input::read_document(&page, &MarkdownFormat)?;

    if args.print {
        let text = match &args.search {
            Some(q) => {
                let (text, outcome) = print::search_text(&mut document, q, cfg.wrap_width);
                if outcome.is_no_results() {
                    eprintln!("docview: no sections match \"{q}\"");
                }
                text
            }
            None => print::plain_text(&document, cfg.wrap_width),
        };
        print!("{text}");
        return Ok(());
    }

    tracing::info!("docview {}", env!("CARGO_PKG_VERSION"));
    for shortcut in Shortcut::ALL {
        tracing::info!("{}: {}", shortcut.keys(), shortcut.description());
    }

    let theme = ThemeSwitcher::load(Box::new(JsonFileStore::open(&cfg.state_file)?));
    let (width, _) = terminal::size()?;
    let mut app = AppState::new(
        document,
        page,
        &cfg,
        theme,
        Box::<SystemClipboard>::default(),
        width,
    );
    if let Some(q) = &args.search {
        app.search_now(q);
    }

    run_tui(app)?;
    Ok(())
}

fn run_tui(mut app: AppState) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(app.next_wakeup(Instant::now()))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if app.handle_key(key, Instant::now()) == Flow::Quit {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => app.handle_mouse(mouse, Instant::now()),
                _ => {}
            }
        }

        app.tick(Instant::now());
    }
}
