//! Command implementations.
//!
//! Each command opens the matching console screen, drives it to completion
//! and prints the rendered result. Screen failures become [`CliError`]s.

pub mod auth;
pub mod business;
pub mod product;
pub mod profile;
pub mod stamp;

use std::path::{Path, PathBuf};

use stampdesk_console::api::ENDPOINTS;
use stampdesk_console::render::{Describe, Tabular, render_detail, render_field_errors, render_page};
use stampdesk_console::screens::{CreateScreen, DetailScreen, FormPhase, ListScreen, LoadState, UpdateScreen};
use stampdesk_console::{ApiError, ConfigError, Console, Navigator, Operation, Route};
use stampdesk_core::{FieldError, FileUpload, FormDraft, Page, PageRequest, Prefill};
use thiserror::Error;

use crate::ListArgs;

/// Errors that end a command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Api(#[from] ApiError),

    /// A file argument could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Standard input could not be read.
    #[error("Failed to read stdin: {0}")]
    Stdin(#[source] std::io::Error),

    /// The session is missing or was rejected.
    #[error("{0}; run `stampdesk login`")]
    SignedOut(String),

    /// Local validation rejected the input.
    #[error("{message}\n{details}")]
    Invalid { message: String, details: String },

    /// The screen ended in an error state.
    #[error("{0}")]
    Failed(String),
}

#[allow(clippy::print_stdout)]
pub(crate) fn print(text: &str) {
    println!("{text}");
}

/// Read a file argument into an upload part.
pub(crate) fn read_file(path: &Path) -> Result<FileUpload, CliError> {
    let bytes = std::fs::read(path).map_err(|source| CliError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    let name = path
        .file_name()
        .map_or_else(|| "upload".to_string(), |n| n.to_string_lossy().into_owned());
    Ok(FileUpload::new(name, bytes))
}

pub(crate) fn read_files(paths: &[PathBuf]) -> Result<Vec<FileUpload>, CliError> {
    paths.iter().map(|p| read_file(p)).collect()
}

/// Overwrite `target` when a value was given.
pub(crate) fn set(target: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *target = value;
    }
}

/// A screen error, or a sign-out if the navigator was sent to login.
fn failure(message: &str, nav: &Navigator) -> CliError {
    if nav.current() == &Route::Login {
        CliError::SignedOut(message.to_string())
    } else {
        CliError::Failed(message.to_string())
    }
}

pub(crate) fn loaded<'a, T>(state: &'a LoadState<T>, nav: &Navigator) -> Result<&'a T, CliError> {
    match state {
        LoadState::Loaded(value) => Ok(value),
        LoadState::Error(message) => Err(failure(message, nav)),
        LoadState::Loading => Err(CliError::Failed("Nothing was loaded".to_string())),
    }
}

pub(crate) fn form_failure(phase: &FormPhase, errors: &[FieldError], nav: &Navigator) -> CliError {
    let message = phase.error().unwrap_or("Submission failed");
    if errors.is_empty() {
        failure(message, nav)
    } else {
        CliError::Invalid {
            message: "Validation failed".to_string(),
            details: render_field_errors(errors),
        }
    }
}

/// Print one page of `O`.
pub(crate) async fn list<O, T>(console: &mut Console, args: ListArgs) -> Result<(), CliError>
where
    O: Operation<Input = PageRequest, Output = Page<T>>,
    T: Tabular,
{
    let per_page = args.per_page.unwrap_or(console.config.page_size);
    let mut screen = ListScreen::<O>::new(per_page);
    screen
        .go_to(args.page, &console.client, &mut console.navigator)
        .await;
    let page = loaded(screen.state(), &console.navigator)?;
    print(&render_page(page));
    Ok(())
}

/// Print the record `O` returns for `input`.
pub(crate) async fn show<O>(console: &mut Console, input: O::Input) -> Result<(), CliError>
where
    O: Operation,
    O::Output: Describe,
{
    let mut screen = DetailScreen::<O>::new();
    screen
        .load(input, &console.client, &mut console.navigator)
        .await;
    let record = loaded(screen.state(), &console.navigator)?;
    print(&render_detail(record));
    Ok(())
}

/// Submit a create screen and print the new record.
pub(crate) async fn create<D, O>(
    console: &mut Console,
    mut screen: CreateScreen<D, O>,
) -> Result<(), CliError>
where
    D: FormDraft,
    O: Operation<Input = D::Submission>,
    O::Output: Describe,
{
    match screen.submit(&console.client, &mut console.navigator).await {
        Some(record) => {
            print(&render_detail(&record));
            Ok(())
        }
        None => Err(form_failure(
            screen.phase(),
            screen.field_errors(),
            &console.navigator,
        )),
    }
}

/// Load an update screen, apply `edit` to the pre-filled draft and save.
pub(crate) async fn update<D, Q, M>(
    console: &mut Console,
    mut screen: UpdateScreen<D, Q, M>,
    edit: impl FnOnce(&mut D) -> Result<(), CliError>,
) -> Result<(), CliError>
where
    D: FormDraft + Prefill<Q::Output> + Default,
    Q: Operation,
    Q::Input: Clone,
    M: Operation,
    M::Output: Describe,
{
    screen.load(&console.client, &mut console.navigator).await;
    if let FormPhase::LoadFailed(message) = screen.phase() {
        return Err(failure(message, &console.navigator));
    }

    edit(&mut screen.draft)?;
    match screen.submit(&console.client, &mut console.navigator).await {
        Some(record) => {
            print(&render_detail(&record));
            Ok(())
        }
        None => Err(form_failure(
            screen.phase(),
            screen.field_errors(),
            &console.navigator,
        )),
    }
}

/// Print the endpoint registry.
pub fn endpoints() {
    let width = ENDPOINTS.iter().map(|e| e.name.len()).max().unwrap_or(0);
    let lines: Vec<String> = ENDPOINTS
        .iter()
        .map(|e| {
            format!(
                "{:<width$}  {:<6}  {} ({})",
                e.name,
                e.method.as_str(),
                e.path,
                e.input
            )
        })
        .collect();
    print(&lines.join("\n"));
}
