//! Argument parsing and dispatch.

use crate::output;
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use llmsel_advisor::Advisor;
use llmsel_core::{
    AccuracyPriority, ContextWindow, DataPrivacy, ModelSize, MonthlyUsage, SelectorConfig,
    SpeedPriority, TaskType, UserRequirements,
};
use llmsel_server::state::AppState;
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "llmsel", version, about = "Pick a Hugging Face model to deploy on Amazon Bedrock")]
pub struct Cli {
    /// TOML configuration file
    #[arg(long, global = true, env = "LLMSEL_CONFIG")]
    pub config: Option<PathBuf>,
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Recommend three models for the given requirements
    Recommend(RecommendArgs),
    /// List the deployable models in the catalog
    Models {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Run the HTTP API
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
}

#[derive(Args, Debug, Default)]
pub struct RecommendArgs {
    /// text_generation, code_generation, summarization, translation, question_answering, multi_modal
    #[arg(long, value_parser = parse_task)]
    pub task_type: Option<TaskType>,
    /// high, medium, basic
    #[arg(long, value_parser = parse_accuracy)]
    pub accuracy: Option<AccuracyPriority>,
    /// high, medium, low
    #[arg(long, value_parser = parse_speed)]
    pub speed: Option<SpeedPriority>,
    /// high (HIPAA, PCI, GDPR), medium, standard
    #[arg(long, value_parser = parse_privacy)]
    pub privacy: Option<DataPrivacy>,
    /// large, medium, small
    #[arg(long, value_parser = parse_size)]
    pub size: Option<ModelSize>,
    /// any, 4k, 8k, 32k, 128k+
    #[arg(long, value_parser = parse_context)]
    pub context: Option<ContextWindow>,
    /// light, medium, heavy, enterprise, or millions of tokens per month
    #[arg(long)]
    pub usage: Option<String>,
    /// Print the JSON response envelope
    #[arg(long)]
    pub json: bool,
}

impl RecommendArgs {
    pub fn requirements(&self) -> UserRequirements {
        UserRequirements {
            task_type: self.task_type,
            accuracy_priority: self.accuracy,
            speed_priority: self.speed,
            data_privacy: self.privacy,
            model_size: self.size,
            context_window: self.context,
            monthly_usage: self.usage.as_deref().and_then(MonthlyUsage::parse),
        }
    }
}

fn invalid(kind: &str, raw: &str) -> String {
    format!("unknown {kind} `{raw}`")
}

fn parse_task(s: &str) -> Result<TaskType, String> {
    TaskType::parse(s).ok_or_else(|| invalid("task type", s))
}

fn parse_accuracy(s: &str) -> Result<AccuracyPriority, String> {
    AccuracyPriority::parse(s).ok_or_else(|| invalid("accuracy priority", s))
}

fn parse_speed(s: &str) -> Result<SpeedPriority, String> {
    SpeedPriority::parse(s).ok_or_else(|| invalid("speed priority", s))
}

fn parse_privacy(s: &str) -> Result<DataPrivacy, String> {
    DataPrivacy::parse(s).ok_or_else(|| invalid("privacy level", s))
}

fn parse_size(s: &str) -> Result<ModelSize, String> {
    ModelSize::parse(s).ok_or_else(|| invalid("model size", s))
}

fn parse_context(s: &str) -> Result<ContextWindow, String> {
    ContextWindow::parse(s).ok_or_else(|| invalid("context window", s))
}

pub async fn run(cli: Cli) -> Result<()> {
    let config = SelectorConfig::load(cli.config.as_deref()).context("loading configuration")?;

    match cli.command {
        Commands::Recommend(args) => {
            let advisor = Advisor::from_config(&config)?;
            let advice = advisor.recommend(&args.requirements()).await;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&advice.into_response())?);
            } else {
                print!("{}", output::render_advice(&advice));
            }
        }
        Commands::Models { json } => {
            let advisor = Advisor::from_config(&config)?;
            let models = advisor
                .catalog()
                .fetch_models()
                .await
                .context("listing models")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&models)?);
            } else {
                print!("{}", output::render_models(&models));
            }
        }
        Commands::Serve { host, port } => {
            let host = host.unwrap_or(config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            let addr: SocketAddr = format!("{host}:{port}")
                .parse()
                .with_context(|| format!("invalid listen address {host}:{port}"))?;
            let state = AppState::from_config(&config)?;
            llmsel_server::serve(addr, state).await?;
        }
    }
    Ok(())
}
