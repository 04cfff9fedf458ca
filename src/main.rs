// PASO: indentation-aware scanner and parser with a terminal explorer

mod args;

use std::fs;
use std::io;
use std::process::ExitCode;

use clap::Parser as _;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{debug, info};
use ratatui::{backend::CrosstermBackend, Terminal};

use args::Args;
use paso::parser::ast::ast_outline;
use paso::ui::App;
use paso::{parse, Scanner};

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let args = Args::parse();
    env_logger::builder().filter_level(args.log_level).init();
    debug!("starting paso with args: {args:?}");

    let source = match fs::read_to_string(&args.file) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: cannot read '{}': {}", args.file.display(), e);
            return Ok(ExitCode::FAILURE);
        }
    };

    let (tokens, lex_errors) = Scanner::with_options(&source, args.scan_options()).tokenize();
    let parse_result = parse(tokens.clone());
    let failed = !lex_errors.is_empty() || parse_result.is_err();
    info!(
        "{}: {} tokens, {} lexical error(s), parse {}",
        args.file.display(),
        tokens.len(),
        lex_errors.len(),
        if parse_result.is_ok() { "ok" } else { "failed" }
    );

    if args.batch_mode() {
        if args.tokens {
            for token in &tokens {
                println!(
                    "{:>4}:{:<3} {}",
                    token.location.line, token.location.column, token
                );
            }
        }
        if args.ast {
            if let Ok(program) = &parse_result {
                for line in ast_outline(program) {
                    println!("{}", line);
                }
            }
        }

        for err in &lex_errors {
            eprintln!("{}", err);
        }
        if let Err(err) = &parse_result {
            eprintln!("{}", err);
        }
    } else {
        // Set up terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let mut app = App::new(source, tokens, lex_errors, parse_result);
        let res = app.run(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        if let Err(err) = res {
            eprintln!("Error: {:?}", err);
        }
    }

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
