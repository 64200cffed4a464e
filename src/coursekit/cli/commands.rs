use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use coursekit::api::CourseApi;
use coursekit::commands::helpers::{resolve_module, ModuleSelector};
use coursekit::commands::{CmdResult, Confirmation};
use coursekit::config::CourseConfig;
use coursekit::error::{CourseError, Result};
use coursekit::forms::{FileUploadForm, LinkForm, ResourceEditForm};
use coursekit::model::{ModuleId, ResourceKind, ResourceType};
use coursekit::store::fs_backend::FsBackend;

use super::picker::describe_file;
use super::print::{print_error, print_messages, print_outline};
use super::setup::{Cli, Commands, FileCommands, LinkCommands, ModuleCommands};

pub const DATA_DIR_ENV: &str = "COURSEKIT_DATA";

struct AppContext {
    api: CourseApi<FsBackend>,
    yes: bool,
}

/// Parses arguments, runs one command, and returns the process exit code.
pub fn run() -> i32 {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match execute(cli) {
        Ok(()) => 0,
        Err(e) => {
            print_error(&e);
            1
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn execute(cli: Cli) -> Result<()> {
    let mut ctx = init_context(&cli)?;

    match cli.command {
        None | Some(Commands::List) => handle_list(&ctx),
        Some(Commands::Search { query }) => handle_search(&ctx, &query),
        Some(Commands::Module(command)) => handle_module(&mut ctx, command),
        Some(Commands::Link(LinkCommands::Add { title, url, module })) => {
            handle_link_add(&mut ctx, title, url, module)
        }
        Some(Commands::File(FileCommands::Add {
            path,
            title,
            module,
        })) => handle_file_add(&mut ctx, path, title, module),
        Some(Commands::Edit {
            resource,
            title,
            url,
        }) => handle_edit(&mut ctx, &resource, title, url),
        Some(Commands::Rm { resource }) => handle_rm(&mut ctx, &resource),
        Some(Commands::Mv {
            resource,
            destination,
        }) => finish(ctx.api.move_resource(&resource, &destination)?),
        Some(Commands::Doctor) => finish(ctx.api.doctor()?),
    }
}

fn data_dir(cli: &Cli) -> Result<PathBuf> {
    if let Some(dir) = &cli.data_dir {
        return Ok(dir.clone());
    }
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("org", "coursekit", "coursekit")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| CourseError::Config("Could not determine a data directory".to_string()))
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let dir = data_dir(cli)?;
    let config = CourseConfig::load(&dir)?;
    tracing::debug!(dir = %dir.display(), ?config, "opening course");

    let api = CourseApi::open(FsBackend::new(dir), &config)?;
    let report = api.store().load_report();
    if !report.is_clean() {
        eprintln!(
            "{}",
            "Stored data had inconsistencies; run `coursekit doctor` to save the repairs.".yellow()
        );
    }

    Ok(AppContext { api, yes: cli.yes })
}

fn finish(result: CmdResult) -> Result<()> {
    if let Some(outline) = &result.outline {
        print_outline(outline);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(ctx: &AppContext) -> Result<()> {
    finish(ctx.api.list()?)
}

fn handle_search(ctx: &AppContext, query: &str) -> Result<()> {
    finish(ctx.api.search(query)?)
}

fn handle_module(ctx: &mut AppContext, command: ModuleCommands) -> Result<()> {
    let result = match command {
        ModuleCommands::Add { name } => ctx.api.create_module(&name)?,
        ModuleCommands::Rename { module, name } => ctx.api.rename_module(&module, &name)?,
        ModuleCommands::Rm { module } => {
            let name = ctx.api.module_name(&module)?;
            let confirmation = confirm(
                &format!("Are you sure you want to delete \"{}\"?", name),
                ctx.yes,
            )?;
            ctx.api.delete_module(&module, confirmation)?
        }
        ModuleCommands::Mv { module, position } => ctx.api.reorder_module(&module, position)?,
    };
    finish(result)
}

fn module_id_for(ctx: &AppContext, selector: Option<String>) -> Result<Option<ModuleId>> {
    let Some(selector) = selector else {
        return Ok(None);
    };
    let selector: ModuleSelector = selector.parse()?;
    let (_, id) = resolve_module(ctx.api.store().modules(), &selector)?;
    Ok(Some(id))
}

fn handle_link_add(
    ctx: &mut AppContext,
    title: String,
    url: String,
    module: Option<String>,
) -> Result<()> {
    let form = LinkForm {
        title,
        url,
        module_id: module_id_for(ctx, module)?,
    };
    finish(ctx.api.add_link(&form)?)
}

fn handle_file_add(
    ctx: &mut AppContext,
    path: PathBuf,
    title: Option<String>,
    module: Option<String>,
) -> Result<()> {
    let file = describe_file(&path)?;
    let mut form = FileUploadForm {
        title: title.unwrap_or_default(),
        file: Some(file),
        module_id: module_id_for(ctx, module)?,
    };
    if form.title.trim().is_empty() {
        form.title = form.suggested_title().unwrap_or_default();
    }
    finish(ctx.api.add_file(&form)?)
}

fn handle_edit(
    ctx: &mut AppContext,
    selector: &str,
    title: Option<String>,
    url: Option<String>,
) -> Result<()> {
    let current = ctx.api.resource(selector)?;
    if title.is_none() && url.is_none() {
        return Err(CourseError::Api("Nothing to change, pass --title or --url".to_string()));
    }
    if url.is_some() && current.resource_type() == ResourceType::File {
        return Err(CourseError::Api("Files have no url to edit".to_string()));
    }

    let mut form = ResourceEditForm::new(title.unwrap_or_else(|| current.title.clone()));
    if let ResourceKind::Link { url: existing } = &current.kind {
        form = form.with_url(url.unwrap_or_else(|| existing.clone()));
    }
    finish(ctx.api.edit_resource(current.id.as_str(), &form)?)
}

fn handle_rm(ctx: &mut AppContext, selector: &str) -> Result<()> {
    let resource = ctx.api.resource(selector)?;
    let confirmation = confirm(
        &format!("Are you sure you want to delete \"{}\"?", resource.title),
        ctx.yes,
    )?;
    finish(ctx.api.delete_resource(resource.id.as_str(), confirmation)?)
}

/// Asks on stdin unless `--yes` was given. Anything but `y`/`yes` declines,
/// including end of input.
fn confirm(prompt: &str, yes: bool) -> Result<Confirmation> {
    if yes {
        return Ok(Confirmation::Confirmed);
    }
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    let answer = answer.trim().to_lowercase();
    Ok(Confirmation::from(answer == "y" || answer == "yes"))
}
