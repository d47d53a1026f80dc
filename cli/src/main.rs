use std::fs;
use std::io::{self, BufRead, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rfp_ai::analysis::run_analysis;
use rfp_ai::backend::AiBackend;
use rfp_ai::chat::{ask, Role};
use rfp_ai::openai::OpenAiClient;
use rfp_ai::session::SessionContext;
use rfp_core::config::Settings;
use rfp_core::error::AppError;
use rfp_core::prompts::PromptSet;
use rfp_core::report::ReportSection;

#[derive(Parser)]
#[command(name = "rfpscout")]
#[command(about = "LLM-assisted RFP analysis and follow-up Q&A", long_about = None)]
#[command(version)]
struct Cli {
    /// RFP text file; reads stdin when omitted
    rfp_file: Option<PathBuf>,

    /// Skip the interactive question loop after the analysis
    #[arg(long)]
    no_chat: bool,

    /// Override the report output directory (DATA_PATH)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Log only warnings and errors
    #[arg(long)]
    quiet: bool,
}

fn init_logging(cli: &Cli) {
    let default = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default));
    builder.target(env_logger::Target::Stderr).init();
}

fn read_rfp_text(cli: &Cli) -> Result<String, AppError> {
    match &cli.rfp_file {
        Some(path) => fs::read_to_string(path).map_err(|e| {
            AppError::new("INPUT_FILE_UNREADABLE", "Failed to read the RFP file")
                .with_details(format!("path={}; err={}", path.display(), e))
        }),
        None => {
            eprintln!("Paste the RFP text, then end input (Ctrl-D):");
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).map_err(|e| {
                AppError::new("INPUT_FILE_UNREADABLE", "Failed to read RFP text from stdin")
                    .with_details(e.to_string())
            })?;
            Ok(buf)
        }
    }
}

fn print_section(section: &ReportSection) {
    let level = section.level.clamp(1, 6) as usize;
    println!("{} {}", "#".repeat(level), section.heading);
    let body = section.body.trim();
    if !body.is_empty() {
        println!();
        println!("{body}");
    }
    println!();
}

fn print_error(err: &AppError) {
    eprintln!("error: {err}");
    if let Some(details) = &err.details {
        eprintln!("  {details}");
    }
    if err.retryable {
        eprintln!("  (transient backend failure; try again)");
    }
}

fn print_history(session: &SessionContext) {
    if session.transcript.is_empty() {
        println!("(no questions asked yet)");
        return;
    }
    // Most recent first.
    for turn in session.transcript.iter().rev() {
        let speaker = match turn.role {
            Role::User => "you",
            Role::Assistant => "assistant",
        };
        println!("[{speaker}] {}", turn.content.trim());
    }
}

fn run_pipeline(
    session: &mut SessionContext,
    backend: &AiBackend,
    prompts: &PromptSet,
    settings: &Settings,
) -> bool {
    match run_analysis(session, backend, prompts, settings, &mut print_section) {
        Ok(path) => {
            println!("Report written to {}", path.display());
            true
        }
        Err(e) => {
            print_error(&e);
            eprintln!("Sections completed so far are kept; type `retry` to resume the analysis.");
            false
        }
    }
}

fn chat_loop(
    session: &mut SessionContext,
    backend: &AiBackend,
    prompts: &PromptSet,
    settings: &Settings,
) {
    println!("Ask follow-up questions about the RFP (`history`, `retry`, `exit`):");
    let stdin = io::stdin();
    loop {
        print!("? ");
        let _ = io::stdout().flush();
        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let line = line.trim();
        match line {
            "" => continue,
            "exit" | "quit" => break,
            "history" => print_history(session),
            "retry" => {
                run_pipeline(session, backend, prompts, settings);
            }
            question => match ask(session, backend, prompts, question) {
                Ok(answer) => {
                    println!("{}", answer.trim());
                    println!();
                }
                Err(e) => print_error(&e),
            },
        }
    }
}

fn run(cli: &Cli) -> Result<(), AppError> {
    let mut settings = Settings::from_env()?;
    if let Some(dir) = &cli.output_dir {
        settings.data_dir = dir.clone();
    }
    let prompts = PromptSet::load(&settings.prompts_file)?;

    log::debug!(
        "chat_model={} embed_model={} data_dir={}",
        settings.chat_model,
        settings.embed_model,
        settings.data_dir.display()
    );
    let client = OpenAiClient::new(&settings.base_url, &settings.api_key)?;
    client.health_check()?;
    log::info!("LLM backend reachable at {}", client.base_url());
    let backend = AiBackend::openai(&settings)?;

    let rfp_text = read_rfp_text(cli)?;
    let mut session = SessionContext::new();
    session.ingest_rfp(&backend, &rfp_text)?;

    run_pipeline(&mut session, &backend, &prompts, &settings);

    if !cli.no_chat {
        chat_loop(&mut session, &backend, &prompts, &settings);
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_error(&e);
            ExitCode::FAILURE
        }
    }
}
