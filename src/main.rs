//! Studio Tools - 图生视频工作室的维护工具
//!
//! - voices: 静态 TTS 音色目录
//! - sync-prompts: 从表格重新生成 Domain/Topic 提示词配置文件
//! - patch: 对面板源文件应用幂等补丁配方

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use studio_tools::application::{
    ApplicationError, BuildVoiceConfig, ConfirmPort, FixedAnswer, GetDefaultVoice,
    ListProviders, ListRecipes, ListRecipesHandler, ListVoices, PatchFile, PatchFileHandler,
    PatchFileResponse, PatchStatus, SheetSourcePort, SyncPrompts, SyncPromptsHandler,
    SyncPromptsResponse, VoiceCatalogHandler,
};
use studio_tools::config::{load_config_from_path, print_config, AppConfig, LogConfig};
use studio_tools::domain::patch::FixStatus;
use studio_tools::domain::voice::Provider;
use studio_tools::infrastructure::adapters::{
    CsvFileSource, FileArtifactStorage, HttpSheetClient, HttpSheetClientConfig, StdinConfirm,
    TomlRecipeBook,
};

#[derive(Parser)]
#[command(name = "studio-tools")]
#[command(about = "Maintenance tools for the image-to-video studio", long_about = None)]
struct Cli {
    /// Configuration file (default: studio.toml / studio.local.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Query the static TTS voice catalog
    Voices {
        #[command(subcommand)]
        action: VoiceAction,
    },

    /// Regenerate the domain/topic prompt config from the published sheet
    SyncPrompts {
        /// Read a local CSV export instead of fetching the sheet
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Path of the generated file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Render and report without writing
        #[arg(long)]
        dry_run: bool,
    },

    /// Apply a patch recipe to a source file
    Patch {
        /// Recipe name (see --list)
        #[arg(required_unless_present = "list")]
        recipe: Option<String>,

        /// Target file (overrides the recipe default)
        #[arg(short, long)]
        target: Option<PathBuf>,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,

        /// Report fixes without writing
        #[arg(long)]
        dry_run: bool,

        /// List available recipes
        #[arg(long)]
        list: bool,
    },
}

#[derive(Subcommand)]
enum VoiceAction {
    /// List voices for a provider
    List {
        #[arg(short, long, default_value = "google")]
        provider: String,

        /// Language code (default: voice.default_language)
        #[arg(short, long)]
        lang: Option<String>,
    },

    /// Show the default voice for a provider
    Default {
        #[arg(short, long, default_value = "google")]
        provider: String,

        #[arg(short, long)]
        lang: Option<String>,
    },

    /// Print a voice config as JSON
    Config {
        #[arg(short, long, default_value = "google")]
        provider: String,

        /// Voice id (default: the provider's default voice)
        #[arg(short, long)]
        voice: Option<String>,

        #[arg(short, long)]
        lang: Option<String>,
    },

    /// List providers and their languages
    Providers,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config_from_path(cli.config.as_deref())
        .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config.log);
    print_config(&config);

    match cli.command {
        Commands::Voices { action } => run_voices(&config, action),
        Commands::SyncPrompts {
            csv,
            output,
            dry_run,
        } => run_sync_prompts(&config, csv, output, dry_run).await,
        Commands::Patch {
            recipe,
            target,
            yes,
            dry_run,
            list,
        } => run_patch(&config, recipe, target, yes, dry_run, list).await,
    }
}

/// 日志输出到 stderr，stdout 只留给命令结果
fn init_tracing(log: &LogConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!("warn,studio_tools={}", log.level))
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if log.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

// ============================================================================
// voices
// ============================================================================

fn run_voices(config: &AppConfig, action: VoiceAction) -> anyhow::Result<()> {
    let handler = VoiceCatalogHandler::new(&config.voice.default_language);

    match action {
        VoiceAction::List { provider, lang } => {
            let response = handler.list(ListVoices {
                provider,
                language_code: lang,
            });
            if response.voices.is_empty() {
                anyhow::bail!(
                    "Unknown provider '{}' (expected one of {})",
                    response.provider,
                    provider_names()
                );
            }
            if let Some(fallback) = response.fallback_language {
                println!(
                    "No voices for '{}', showing '{}' voices",
                    response.language_code, fallback
                );
            }
            for voice in &response.voices {
                println!("{:<20} {}", voice.id, voice.label);
            }
        }
        VoiceAction::Default { provider, lang } => {
            let response = handler.default_voice(GetDefaultVoice {
                provider,
                language_code: lang,
            });
            if response.voice_id.is_empty() {
                anyhow::bail!(
                    "Unknown provider '{}' (expected one of {})",
                    response.provider,
                    provider_names()
                );
            }
            println!("{}", response.voice_id);
        }
        VoiceAction::Config {
            provider,
            voice,
            lang,
        } => {
            let voice_config = handler.voice_config(BuildVoiceConfig {
                provider,
                voice_id: voice,
                language_code: lang,
            });
            println!("{}", serde_json::to_string_pretty(&voice_config)?);
        }
        VoiceAction::Providers => {
            for provider in handler.providers(ListProviders) {
                let languages = if provider.languages.is_empty() {
                    "any".to_string()
                } else {
                    provider.languages.join(", ")
                };
                println!("{:<12} {:<12} {}", provider.id, provider.name, languages);
            }
        }
    }

    Ok(())
}

fn provider_names() -> String {
    Provider::ALL
        .iter()
        .map(|p| p.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// sync-prompts
// ============================================================================

async fn run_sync_prompts(
    config: &AppConfig,
    csv: Option<PathBuf>,
    output: Option<PathBuf>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let sheet_config = HttpSheetClientConfig::new(&config.sheet.id, &config.sheet.gid)
        .with_base_url(&config.sheet.base_url)
        .with_timeout(config.sheet.timeout_secs);
    let edit_url = sheet_config.edit_url();

    let from_csv = csv.is_some();
    let source: Arc<dyn SheetSourcePort> = match csv {
        Some(path) => Arc::new(CsvFileSource::new(path)),
        None => Arc::new(HttpSheetClient::new(sheet_config)?),
    };

    let handler = SyncPromptsHandler::new(source, Arc::new(FileArtifactStorage::new()));
    let command = SyncPrompts {
        output_path: output.unwrap_or_else(|| config.generator.output_path.clone()),
        backup_suffix: config.generator.backup_suffix.clone(),
        dry_run,
    };

    match handler.handle(command).await {
        Ok(response) => {
            print_sync_summary(&response);
            Ok(())
        }
        Err(e) => {
            if e.is_fetch_failure() && !from_csv {
                print_recovery_steps(&edit_url);
            }
            Err(e.into())
        }
    }
}

fn print_sync_summary(response: &SyncPromptsResponse) {
    let table = &response.table;
    println!(
        "Extracted {} domains, {} topics ({} rows read, {} skipped, {} overwritten)",
        table.domain_count(),
        table.topic_count(),
        response.stats.rows_read,
        response.stats.rows_skipped,
        response.stats.rows_overwritten
    );
    for (domain, topics) in table.iter() {
        println!("  • {}: {} topics", domain, topics.len());
    }

    if let Some(changes) = &response.changes {
        if changes.is_empty() {
            println!("\nNo changes compared to the existing file");
        } else {
            println!("\nChanges compared to the existing file:");
            for domain in &changes.added_domains {
                println!("  + domain {}", domain);
            }
            for domain in &changes.removed_domains {
                println!("  - domain {}", domain);
            }
            for (domain, topic) in &changes.added_topics {
                println!("  + {} / {}", domain, topic);
            }
            for (domain, topic) in &changes.removed_topics {
                println!("  - {} / {}", domain, topic);
            }
            for (domain, topic) in &changes.changed_prompts {
                println!("  ~ {} / {}", domain, topic);
            }
        }
    }

    let path = response.output_path.display();
    if !response.written {
        println!("\nDry run: {} not written", path);
        return;
    }

    if let Some(backup) = &response.backup {
        println!("\nBackup: {}", backup.display());
    }
    println!("Generated: {}", path);
    println!("\nNext steps:");
    println!("  1. Review: {}", path);
    println!("  2. Restart the app and select a domain");
    println!("  3. Check that the topics match the sheet");
}

fn print_recovery_steps(edit_url: &str) {
    eprintln!("\nCould not fetch the sheet. Manual steps:");
    eprintln!("  1. Go to: {}", edit_url);
    eprintln!("  2. File → Share → Publish to web");
    eprintln!("  3. Select the sheet and 'Comma-separated values (.csv)'");
    eprintln!("  4. Make sure sharing is set to 'Anyone with the link can view'");
    eprintln!("\nOr export the sheet as CSV and run: studio-tools sync-prompts --csv <file>");
}

// ============================================================================
// patch
// ============================================================================

async fn run_patch(
    config: &AppConfig,
    recipe: Option<String>,
    target: Option<PathBuf>,
    yes: bool,
    dry_run: bool,
    list: bool,
) -> anyhow::Result<()> {
    let recipes = Arc::new(TomlRecipeBook::load(config.patch.recipes_file.as_deref()).await?);

    if list {
        for summary in ListRecipesHandler::new(recipes).handle(ListRecipes) {
            let target = summary
                .target
                .as_ref()
                .map(|t| t.display().to_string())
                .unwrap_or_else(|| config.patch.target.display().to_string());
            println!("{:<18} {} rule(s), {}", summary.name, summary.rule_count, target);
            if !summary.description.is_empty() {
                println!("{:<18} {}", "", summary.description);
            }
        }
        return Ok(());
    }

    let Some(recipe) = recipe else {
        anyhow::bail!("Missing recipe name (see `studio-tools patch --list`)");
    };

    let confirm: Arc<dyn ConfirmPort> = if yes {
        Arc::new(FixedAnswer(true))
    } else {
        Arc::new(StdinConfirm::new())
    };

    let handler = PatchFileHandler::new(
        recipes,
        Arc::new(FileArtifactStorage::new()),
        confirm,
        config.patch.target.clone(),
    );

    let response = handler
        .handle(PatchFile {
            recipe,
            target,
            dry_run,
        })
        .await
        .map_err(|e| match e {
            ApplicationError::NotFound { .. } => {
                anyhow::anyhow!("{} (see `studio-tools patch --list`)", e)
            }
            other => other.into(),
        })?;

    print_patch_report(&response);
    Ok(())
}

fn print_patch_report(response: &PatchFileResponse) {
    println!("{} → {}", response.recipe, response.target.display());
    for fix in &response.fixes {
        match fix.status {
            FixStatus::Applied { occurrences } => {
                println!("  ✓ {} ({} occurrence(s))", fix.rule, occurrences)
            }
            FixStatus::AlreadyFixed => println!("  - {} (already fixed)", fix.rule),
        }
    }

    match response.status {
        PatchStatus::Written => {
            println!("\nApplied {} fix(es)", response.applied_count());
            if let Some(backup) = &response.backup {
                println!("Backup: {}", backup.display());
            }
        }
        PatchStatus::NoChanges => println!("\nNo changes needed, file left untouched"),
        PatchStatus::DryRun => println!(
            "\nDry run: {} fix(es) would be applied",
            response.applied_count()
        ),
        PatchStatus::Declined => println!("\naborted"),
    }
}
