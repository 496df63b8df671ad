use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use roadmap_tracker::Config;
use roadmap_tracker::progress::{JsonFileBackend, ProgressStore};
use roadmap_tracker::roadmap::{
    QuestionCategory, QuestionDraft, QuestionId, QuestionStatus, QuestionUpdate, Roadmap,
    filter_questions, search_topics, topics_with_priority,
};
use roadmap_tracker::stats::{PRIORITY_LEVELS, priority_label};
use roadmap_tracker::ui::{Painter, day_view, overview};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "roadmap-tracker")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding the progress file
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct DayArg {
    /// Day number (defaults to the current day)
    #[arg(short, long)]
    day: Option<u32>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show overall progress
    Status,
    /// Show a day in detail
    Day {
        /// Day number (defaults to the current day)
        number: Option<u32>,
    },
    /// Set the current day
    Goto { number: u32 },
    /// Move to the next day
    Next,
    /// Move to the previous day
    Prev,
    /// Toggle the theory phase of a topic
    Theory {
        topic: String,
        #[command(flatten)]
        day: DayArg,
    },
    /// Toggle the hands-on phase of a topic
    Handson {
        topic: String,
        #[command(flatten)]
        day: DayArg,
    },
    /// Toggle a DSA problem
    Dsa {
        problem: String,
        #[command(flatten)]
        day: DayArg,
    },
    /// Manage interview questions
    #[command(subcommand)]
    Question(QuestionCommand),
    /// Edit notes and project details
    #[command(subcommand)]
    Notes(NotesCommand),
    /// Find topics by name
    Search { keyword: String },
    /// List topics of one priority, or counts for every priority
    Priority { level: Option<u8> },
    /// Discard all progress
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
    /// Write a progress backup
    Export {
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Restore progress from a backup
    Import { path: PathBuf },
    /// Describe the roadmap itself
    Summary,
}

#[derive(Subcommand)]
enum QuestionCommand {
    /// Add a question to a topic
    Add {
        topic: String,
        text: String,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long = "tag")]
        tags: Vec<String>,
        #[arg(short, long)]
        answer: Option<String>,
        #[command(flatten)]
        day: DayArg,
    },
    /// List the questions of a topic
    List {
        topic: String,
        /// Only questions whose text, answer or tags contain this
        #[arg(short, long)]
        search: Option<String>,
        /// Only questions in this category
        #[arg(short, long)]
        category: Option<String>,
        /// all, completed or pending
        #[arg(long, default_value_t = QuestionStatus::All)]
        status: QuestionStatus,
        #[command(flatten)]
        day: DayArg,
    },
    /// Mark a question answered or unanswered
    Toggle {
        topic: String,
        id: String,
        #[command(flatten)]
        day: DayArg,
    },
    /// Change a question
    Edit {
        topic: String,
        id: String,
        #[arg(short, long)]
        question: Option<String>,
        #[arg(short, long)]
        answer: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long = "tag")]
        tags: Option<Vec<String>>,
        #[command(flatten)]
        day: DayArg,
    },
    /// Remove a question
    Delete {
        topic: String,
        id: String,
        #[command(flatten)]
        day: DayArg,
    },
}

#[derive(Subcommand)]
enum NotesCommand {
    /// Theory notes and resource links
    Theory {
        topic: String,
        #[arg(short, long)]
        notes: Option<String>,
        #[arg(short, long = "link")]
        links: Option<Vec<String>>,
        #[command(flatten)]
        day: DayArg,
    },
    /// Hands-on project details
    Handson {
        topic: String,
        #[arg(short, long)]
        project: Option<String>,
        #[arg(short, long)]
        github: Option<String>,
        #[arg(short, long)]
        notes: Option<String>,
        #[command(flatten)]
        day: DayArg,
    },
}

type Store = ProgressStore<JsonFileBackend>;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roadmap_tracker=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = Config::load()?;
    if cli.data_dir.is_some() {
        config.data_dir = cli.data_dir;
    }
    if cli.no_color {
        config.color = false;
    }

    let painter = Painter::from_config(&config);
    let mut store = open_store(&config)?;

    match cli.command.unwrap_or(Commands::Status) {
        Commands::Status => {
            let title = store.roadmap().title.clone();
            print!("{}", overview::render_status(&painter, &title, store.document()));
        }
        Commands::Day { number } => show_day(&store, &painter, number)?,
        Commands::Goto { number } => {
            let day = store.set_current_day(number)?;
            show_day(&store, &painter, Some(day))?;
        }
        Commands::Next => {
            let current = store.document().current_day;
            let Some(next) = store.next_day(current) else {
                bail!("Day {} is the last day", current);
            };
            store.set_current_day(next)?;
            show_day(&store, &painter, Some(next))?;
        }
        Commands::Prev => {
            let current = store.document().current_day;
            let Some(previous) = store.previous_day(current) else {
                bail!("Day {} is the first day", current);
            };
            store.set_current_day(previous)?;
            show_day(&store, &painter, Some(previous))?;
        }
        Commands::Theory { topic, day } => {
            let day = day_or_current(&store, day);
            found(store.toggle_theory_phase(day, &topic)?, || topic_missing(day, &topic))?;
            report_topic(&store, &painter, day, &topic);
        }
        Commands::Handson { topic, day } => {
            let day = day_or_current(&store, day);
            found(store.toggle_handson_phase(day, &topic)?, || topic_missing(day, &topic))?;
            report_topic(&store, &painter, day, &topic);
        }
        Commands::Dsa { problem, day } => {
            let day = day_or_current(&store, day);
            found(store.toggle_dsa_problem(day, &problem)?, || {
                format!("No problem {} on day {}", problem, day)
            })?;
            let done = store
                .get_day(day)
                .and_then(|d| d.dsa_problems.iter().find(|p| p.id == problem))
                .is_some_and(|p| p.completed);
            println!("{} {}", painter.check(done), problem);
        }
        Commands::Question(command) => run_question(&mut store, &painter, command)?,
        Commands::Notes(command) => run_notes(&mut store, &painter, command)?,
        Commands::Search { keyword } => {
            let found = search_topics(&store.document().days, &keyword);
            if found.is_empty() {
                println!("No topics match {:?}", keyword);
            } else {
                print!("{}", day_view::render_topic_refs(&painter, &found));
            }
        }
        Commands::Priority { level: Some(level) } => {
            let topics = topics_with_priority(&store.document().days, level);
            println!("{}", painter.heading(priority_label(level)));
            print!("{}", day_view::render_topic_refs(&painter, &topics));
        }
        Commands::Priority { level: None } => {
            for level in PRIORITY_LEVELS {
                let count = topics_with_priority(&store.document().days, level).len();
                println!("{} {:<15} {}", level, priority_label(level), count);
            }
        }
        Commands::Reset { yes } => {
            if !yes {
                bail!("Reset discards all progress; run again with --yes to confirm");
            }
            store.reset_progress()?;
            println!("Progress reset");
        }
        Commands::Export { output } => {
            let backup = store.export_document()?;
            match output {
                Some(path) => {
                    std::fs::write(&path, backup)
                        .with_context(|| format!("Failed to write backup to {:?}", path))?;
                    println!("Progress exported to {}", path.display());
                }
                None => println!("{}", backup),
            }
        }
        Commands::Import { path } => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read backup from {:?}", path))?;
            store
                .import_document(&text)
                .with_context(|| format!("{} is not a progress backup", path.display()))?;
            println!("Progress imported from {}", path.display());
        }
        Commands::Summary => {
            let roadmap = store.roadmap();
            print!("{}", overview::render_summary(&painter, &roadmap.title, &roadmap.summary()));
        }
    }

    Ok(())
}

fn open_store(config: &Config) -> Result<Store> {
    let roadmap = match &config.roadmap_path {
        Some(path) => Roadmap::load(path)
            .with_context(|| format!("Failed to load roadmap from {:?}", path))?,
        None => Roadmap::embedded().clone(),
    };

    let backend = JsonFileBackend::in_dir(&config.data_dir()?);
    ProgressStore::open(backend, roadmap, config.load_policy)
        .with_context(|| "Failed to open progress store")
}

fn day_or_current(store: &Store, arg: DayArg) -> u32 {
    arg.day.unwrap_or(store.document().current_day)
}

fn found(applied: bool, missing: impl FnOnce() -> String) -> Result<()> {
    if !applied {
        bail!(missing());
    }
    Ok(())
}

fn topic_missing(day: u32, topic: &str) -> String {
    format!("No topic {} on day {}", topic, day)
}

fn show_day(store: &Store, painter: &Painter, number: Option<u32>) -> Result<()> {
    let current = store.document().current_day;
    let number = number.unwrap_or(current);
    let Some(day) = store.get_day(number) else {
        bail!("No day {}", number);
    };
    print!("{}", day_view::render_day(painter, day, number == current));
    Ok(())
}

fn report_topic(store: &Store, painter: &Painter, day: u32, topic_id: &str) {
    if let Some(topic) = store.get_day(day).and_then(|d| d.topic(topic_id)) {
        print!("{}", day_view::render_topic(painter, topic));
    }
}

fn parse_category(name: &str) -> Result<QuestionCategory> {
    match QuestionCategory::parse(name) {
        Some(category) => Ok(category),
        None => {
            let known: Vec<_> = QuestionCategory::ALL.iter().map(|c| c.as_str()).collect();
            bail!("Unknown category {:?}, expected one of: {}", name, known.join(", "))
        }
    }
}

fn run_question(store: &mut Store, painter: &Painter, command: QuestionCommand) -> Result<()> {
    match command {
        QuestionCommand::Add { topic, text, category, tags, answer, day } => {
            let day = day_or_current(store, day);
            let mut draft = QuestionDraft::new(text).with_tags(tags);
            if let Some(category) = category {
                draft = draft.with_category(parse_category(&category)?);
            }
            if let Some(answer) = answer {
                draft = draft.with_answer(answer);
            }
            match store.add_interview_question(day, &topic, draft)? {
                Some(id) => println!("Added {}", id),
                None => bail!(topic_missing(day, &topic)),
            }
        }
        QuestionCommand::List { topic, search, category, status, day } => {
            let day = day_or_current(store, day);
            let category = category.as_deref().map(parse_category).transpose()?;
            let Some(found) = store.get_day(day).and_then(|d| d.topic(&topic)) else {
                bail!(topic_missing(day, &topic));
            };
            let keyword = search.unwrap_or_default();
            let shown = filter_questions(&found.interview_questions, &keyword, category, status);
            print!("{}", day_view::render_questions(painter, found, &shown));
        }
        QuestionCommand::Toggle { topic, id, day } => {
            let day = day_or_current(store, day);
            let id = QuestionId::from(id);
            found(store.toggle_interview_question(day, &topic, &id)?, || {
                format!("No question {} in topic {} on day {}", id, topic, day)
            })?;
            report_topic(store, painter, day, &topic);
        }
        QuestionCommand::Edit { topic, id, question, answer, category, tags, day } => {
            let day = day_or_current(store, day);
            let id = QuestionId::from(id);
            let update = QuestionUpdate {
                question,
                answer,
                category: category.as_deref().map(parse_category).transpose()?,
                tags,
                completed: None,
            };
            if update.is_empty() {
                bail!("Nothing to change; pass --question, --answer, --category or --tag");
            }
            found(store.edit_interview_question(day, &topic, &id, update)?, || {
                format!("No question {} in topic {} on day {}", id, topic, day)
            })?;
            println!("Updated {}", id);
        }
        QuestionCommand::Delete { topic, id, day } => {
            let day = day_or_current(store, day);
            let id = QuestionId::from(id);
            found(store.delete_interview_question(day, &topic, &id)?, || {
                format!("No question {} in topic {} on day {}", id, topic, day)
            })?;
            println!("Deleted {}", id);
        }
    }
    Ok(())
}

fn run_notes(store: &mut Store, painter: &Painter, command: NotesCommand) -> Result<()> {
    match command {
        NotesCommand::Theory { topic, notes, links, day } => {
            let day = day_or_current(store, day);
            found(store.update_theory_phase(day, &topic, notes, links)?, || {
                topic_missing(day, &topic)
            })?;
            report_topic(store, painter, day, &topic);
        }
        NotesCommand::Handson { topic, project, github, notes, day } => {
            let day = day_or_current(store, day);
            found(store.update_handson_phase(day, &topic, project, github, notes)?, || {
                topic_missing(day, &topic)
            })?;
            report_topic(store, painter, day, &topic);
        }
    }
    Ok(())
}
