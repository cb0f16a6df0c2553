//! # CLI Layer
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Installs the tracing subscriber
//! - Decides exit codes (through the error returned to `main`)
//!
//! Every command follows the same shape: build the view model or form over the
//! shared repository, drive it, and print the [`Message`] it hands back.
//! Failure messages become the returned error, so `main` prints `Error: ...`
//! and exits with status 1.

use super::render::{render_detail, render_field_errors, render_list, render_message};
use super::setup::{Cli, Commands, FieldArgs};
use anyhow::{bail, Result};
use clap::Parser;
use sekaiapp::form::{FormSession, LoadOutcome, SubmitOutcome};
use sekaiapp::init::{initialize, SekaiContext};
use sekaiapp::messages::{self, Message};
use sekaiapp::repository::DurableRepository;
use sekaiapp::store::backend::StorageBackend;
use sekaiapp::views::{ActionResult, DetailResult, DetailViewModel, ListState, ListViewModel};
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::EnvFilter;

type Form = FormSession<DurableRepository>;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ctx = initialize(cli.data.clone())?;
    debug!(base = %ctx.base_dir.display(), "context ready");

    match cli.command.unwrap_or(Commands::List) {
        Commands::List => handle_list(&ctx),
        Commands::Show { id } => handle_show(&ctx, &id),
        Commands::Add { fields } => handle_add(&ctx, &fields),
        Commands::Edit {
            id,
            fields,
            no_cover,
        } => handle_edit(&ctx, &id, &fields, no_cover),
        Commands::Delete { id } => handle_delete(&ctx, &id),
        Commands::Path => {
            println!("{}", ctx.repo.store().backend().location().display());
            Ok(())
        }
    }
}

/// `RUST_LOG` wins; otherwise warnings only, or everything from sekai with `--verbose`.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("sekai=debug,sekaiapp=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn handle_list(ctx: &SekaiContext) -> Result<()> {
    let mut list = ListViewModel::new(Arc::clone(&ctx.repo));
    list.refresh();
    match list.state() {
        ListState::Content(mangas) => print!("{}", render_list(mangas)),
        ListState::Empty => print!(
            "{}",
            render_message(&Message::info(messages::EMPTY_COLLECTION))
        ),
        ListState::Loading => {}
    }
    Ok(())
}

fn handle_show(ctx: &SekaiContext, id: &str) -> Result<()> {
    match DetailViewModel::new(Arc::clone(&ctx.repo)).fetch(id) {
        DetailResult::Found(manga) => {
            print!("{}", render_detail(&manga));
            Ok(())
        }
        DetailResult::NotFound(message) | DetailResult::Failed(message) => bail!("{}", message),
    }
}

fn handle_add(ctx: &SekaiContext, fields: &FieldArgs) -> Result<()> {
    let mut form = Form::create(Arc::clone(&ctx.repo)).with_year_range(ctx.config.year_range());
    apply_fields(&mut form, fields);
    submit(form)
}

fn handle_edit(ctx: &SekaiContext, id: &str, fields: &FieldArgs, no_cover: bool) -> Result<()> {
    let mut form = Form::edit(Arc::clone(&ctx.repo), id).with_year_range(ctx.config.year_range());
    match form.load() {
        LoadOutcome::Ready => {}
        LoadOutcome::NotFound(message) | LoadOutcome::Failed(message) => bail!("{}", message),
    }

    if fields.is_empty() && !no_cover {
        print!(
            "{}",
            render_message(&Message::warning("Nothing to change; pass at least one field"))
        );
        return Ok(());
    }

    apply_fields(&mut form, fields);
    if no_cover {
        form.clear_cover_uri();
    }
    submit(form)
}

fn handle_delete(ctx: &SekaiContext, id: &str) -> Result<()> {
    match ListViewModel::new(Arc::clone(&ctx.repo)).delete(id) {
        ActionResult::Done(message) => {
            print!("{}", render_message(&message));
            Ok(())
        }
        ActionResult::Failed(message) => bail!("{}", message),
    }
}

fn apply_fields(form: &mut Form, fields: &FieldArgs) {
    if let Some(title) = &fields.title {
        form.set_title(title.as_str());
    }
    if let Some(author) = &fields.author {
        form.set_author(author.as_str());
    }
    if let Some(year) = &fields.year {
        form.set_year(year.as_str());
    }
    if let Some(description) = &fields.description {
        form.set_description(description.as_str());
    }
    if let Some(cover) = &fields.cover {
        form.set_cover_uri(Some(cover.clone()));
    }
}

fn submit(mut form: Form) -> Result<()> {
    match form.submit() {
        SubmitOutcome::Succeeded { id, message } => {
            print!("{}", render_message(&message));
            let saved = form.draft().to_manga();
            debug!(id = %id, title = %saved.title, "saved");
            print!("{}", render_list(&[saved]));
            Ok(())
        }
        SubmitOutcome::Failed(message) => bail!("{}", message),
        SubmitOutcome::Ignored => {
            eprint!("{}", render_field_errors(&form.draft().field_errors));
            bail!("invalid manga, nothing was saved")
        }
    }
}
