//! Subcommand handlers.

use std::error::Error;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use super::args::{Command, ConfigAction};
use super::enums::Style;
use crate::art::{AsciiImage, StyleCode};
use crate::ascii;
use crate::codec::{Codec, Header};
use crate::config::{default_path as get_config_path, Config, DEFAULT_CONFIG};
use crate::render;
use crate::store::{self, FileStore, ImageStore};
use crate::upload::UploadManager;

type CommandResult = Result<(), Box<dyn Error>>;

/// Everything a subcommand needs, resolved from the config.
pub struct Context {
    pub config: Config,
    /// Config file in effect: `--config`, or the default location.
    pub config_path: PathBuf,
    pub store: FileStore,
    pub codec: &'static dyn Codec,
}

impl Context {
    pub fn new(config: Config, config_path: Option<PathBuf>) -> Result<Self, Box<dyn Error>> {
        let codec = config.codec_kind()?.codec();
        let store = FileStore::new(config.storage_dir());
        Ok(Self {
            config,
            config_path: config_path.unwrap_or_else(get_config_path),
            store,
            codec,
        })
    }
}

/// Dispatch a parsed subcommand.
pub fn run(ctx: &Context, command: Command) -> CommandResult {
    match command {
        Command::Convert {
            path,
            resize,
            style,
            save,
            html,
        } => convert(ctx, &path, resize, style, save, html),
        Command::Show { id, html } => show(ctx, id, html),
        Command::Inspect { id, json } => inspect(ctx, id, json),
        Command::List => list(ctx),
        Command::Config { action } => handle_config_action(&ctx.config, &ctx.config_path, action),
    }
}

fn convert(
    ctx: &Context,
    path: &Path,
    resize: Option<f64>,
    style: Option<Style>,
    save: bool,
    html: bool,
) -> CommandResult {
    let resize = resize.unwrap_or(ctx.config.convert.resize_percentage);
    let style = match style {
        Some(s) => StyleCode::from(s),
        None => ctx.config.style()?,
    };
    let policy = ctx.config.retry_policy();

    let art = if path == Path::new("-") {
        // Stage stdin through the upload area like any other upload
        let mut data = Vec::new();
        std::io::stdin().read_to_end(&mut data)?;
        let mut uploads = UploadManager::new(ctx.config.upload_dir());
        let staged = uploads.save(&data)?;
        let result = ascii::convert(&staged, resize, style, &policy);
        if let Err(e) = uploads.remove(&staged) {
            log::warn!("failed to remove {}: {}", staged.display(), e);
        }
        result?
    } else {
        ascii::convert(path, resize, style, &policy)?
    };

    if save {
        let id = store::save_art(&ctx.store, ctx.codec, &art)?;
        println!("{}", id);
    } else {
        print_art(&art, html)?;
    }
    Ok(())
}

fn show(ctx: &Context, id: u64, html: bool) -> CommandResult {
    let art = store::load_art(&ctx.store, ctx.codec, id)?
        .ok_or_else(|| format!("No image with id {}", id))?;
    print_art(&art, html)
}

fn inspect(ctx: &Context, id: u64, json: bool) -> CommandResult {
    let buffer = ctx
        .store
        .fetch(id)?
        .ok_or_else(|| format!("No image with id {}", id))?;
    let art = ctx
        .codec
        .decode(&buffer)
        .map_err(|source| store::StoreError::Corrupt { id, source })?;
    let meta = art.metadata();

    if json {
        let value = serde_json::json!({
            "id": id,
            "stored_bytes": buffer.len(),
            "stream_bytes": art.stream_len(),
            "metadata": meta,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("Image #{}", id);
        println!("  Size: {}x{} characters", meta.width, meta.height);
        println!("  Style: {} ({})", meta.style.name(), meta.style_code);
        println!(
            "  Stored: {} bytes ({} uncompressed)",
            buffer.len(),
            art.stream_len()
        );
    }
    Ok(())
}

fn list(ctx: &Context) -> CommandResult {
    let ids = ctx.store.ids()?;
    if ids.is_empty() {
        println!("No stored images in {}", ctx.store.dir().display());
        return Ok(());
    }

    for id in ids {
        let Some(buffer) = ctx.store.fetch(id)? else {
            continue;
        };
        match Header::parse(&buffer) {
            Ok(header) => println!(
                "  #{:<6} {}x{} {}",
                id,
                header.width,
                header.height,
                header.style.name()
            ),
            Err(e) => println!("  #{:<6} unreadable: {}", id, e),
        }
    }
    Ok(())
}

fn print_art(art: &AsciiImage, html: bool) -> CommandResult {
    let mut stdout = std::io::stdout().lock();
    if html {
        writeln!(stdout, "{}", render::to_html(art))?;
    } else {
        writeln!(stdout, "{}", art)?;
    }
    Ok(())
}

/// Handle config subcommand actions.
pub fn handle_config_action(
    config: &Config,
    config_path: &Path,
    action: ConfigAction,
) -> CommandResult {
    match action {
        ConfigAction::Show => {
            println!("Current configuration:");
            println!("  Storage: {}", config.storage_dir().display());
            println!("  Uploads: {}", config.upload_dir().display());
            println!("  Codec: {}", config.codec_kind()?.codec().name());
            println!("  Resize: {}%", config.convert.resize_percentage);
            println!("  Style: {}", config.style()?.name());
            println!(
                "  Retry: {} attempts, {}ms step",
                config.retry.max_attempts, config.retry.backoff_ms
            );
            println!();

            if config_path.exists() {
                println!("Config file: {} (exists)", config_path.display());
            } else {
                println!("Config file: {} (not found)", config_path.display());
            }
        }
        ConfigAction::Init => {
            if config_path.exists() {
                return Err(format!(
                    "Config file already exists: {}\nUse 'ascii-store config show' to view current settings.",
                    config_path.display()
                )
                .into());
            }

            if let Some(parent) = config_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(config_path, DEFAULT_CONFIG)?;

            println!("Created config file: {}", config_path.display());
        }
    }
    Ok(())
}
