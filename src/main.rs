use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{error, info};

use quest_guide::config::{DEFAULT_CONFIG_FILE, GuideConfig};
use quest_guide::quest::QuestDefinition;
use quest_guide::{PlayerSnapshot, QuestError, QuestRegistry, QuestResult};

#[derive(Parser)]
#[command(name = "quest-guide", version, about = "Step-by-step quest guidance")]
struct Cli {
    /// Configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Override the data directory from the config file
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List registered quests
    List,
    /// Print requirements, rewards and stages of a quest
    Show { quest: String },
    /// Print the guidance panel for a player at a given stage
    Resolve {
        quest: String,
        #[arg(short, long)]
        stage: u32,
        /// Player snapshot (.toml or .json)
        #[arg(short, long)]
        player: PathBuf,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = GuideConfig::load(&cli.config);

    let directive = config
        .as_ref()
        .map(|c| c.log_filter.clone())
        .unwrap_or_else(|_| GuideConfig::default().log_filter);
    let env_filter = tracing_subscriber::EnvFilter::from_default_env();
    let env_filter = match directive.parse::<tracing_subscriber::filter::Directive>() {
        Ok(directive) => env_filter.add_directive(directive),
        Err(_) => env_filter,
    };
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match config.and_then(|config| run(cli, config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, mut config: GuideConfig) -> QuestResult<()> {
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }

    let mut registry = QuestRegistry::new();
    if config.builtin_quests {
        registry.register_builtin();
    }
    registry.load_from_directory(&config.data_dir)?;
    info!("{} quests available", registry.len());

    match cli.command {
        Command::List => {
            for id in registry.ids() {
                if let Some(quest) = registry.get(&id) {
                    println!("{:<32} {}", quest.id, quest.name);
                }
            }
        }
        Command::Show { quest } => {
            let quest = registry.get(&quest).ok_or(QuestError::QuestNotFound(quest))?;
            print_overview(&quest);
        }
        Command::Resolve {
            quest,
            stage,
            player,
            json,
        } => {
            let quest = registry.get(&quest).ok_or(QuestError::QuestNotFound(quest))?;
            let player = PlayerSnapshot::load(&player)?;
            let guidance = quest.guidance(stage, &player);

            if json {
                let out = serde_json::to_string_pretty(&guidance).map_err(|source| QuestError::Json {
                    path: PathBuf::from("<stdout>"),
                    source,
                })?;
                println!("{}", out);
            } else {
                print!("{}", guidance);
            }
        }
    }

    Ok(())
}

fn print_overview(quest: &QuestDefinition) {
    println!("{} ({})", quest.name, quest.id);

    println!("\nRequirements:");
    for requirement in quest.general_requirements() {
        println!("  - {}", requirement.display_text());
    }

    println!("\nItems required:");
    for item in quest.item_requirements() {
        println!("  - {} x{}", item.name, item.quantity);
    }
    println!("\nItems recommended:");
    for item in quest.recommended_items() {
        println!("  - {} x{}", item.name, item.quantity);
    }

    if !quest.combat_requirements().is_empty() {
        println!("\nEnemies to defeat:");
        for enemy in quest.combat_requirements() {
            println!("  - {}", enemy);
        }
    }

    println!("\nStages:");
    for stage in quest.stages() {
        if let Some(step) = quest.step(stage) {
            if step.is_conditional() {
                println!("  {:>3}: {} (conditional)", stage, step.key);
            } else {
                println!("  {:>3}: {}", stage, step.text);
            }
        }
    }

    let rewards = quest.rewards();
    if !rewards.is_empty() {
        println!("\nRewards:");
        if let Some(points) = rewards.quest_points {
            println!("  - {} Quest Points", points.count);
        }
        for xp in &rewards.experience {
            println!("  - {} {} experience", xp.amount, xp.skill);
        }
        for unlock in &rewards.unlocks {
            println!("  - {}", unlock.description);
        }
    }
}
