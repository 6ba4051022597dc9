// SPDX-License-Identifier: MPL-2.0
use media_picker::application::picker::{PickerController, PickerServices};
use media_picker::application::query::FetchApplied;
use media_picker::config::{self, PickerConfig};
use media_picker::domain::media::{Category, MediaItem};
use media_picker::domain::paging::PageSize;
use media_picker::error::{Error, Result};
use media_picker::infrastructure::filesystem::document_roots;
use media_picker::infrastructure::{
    DirectoryBrowser, DocumentScanner, FsMediaLibrary, FsPermissionBroker, ScanPolicy,
    SystemFileOpener,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const HELP: &str = "\
media-picker

Lists a category page by page and optionally confirms a selection.

USAGE:
  media-picker [OPTIONS]

OPTIONS:
  --category NAME   images, videos or documents [default: images]
  --page-size N     items per page (overrides settings.toml)
  --pages N         number of pages to load [default: 1]
  --root DIR        library root, or the only document root for documents
  --album NAME      album to browse (images and videos)
  --select N        select the first N listed items and confirm
  --config DIR      directory holding settings.toml
  -h, --help        print this help
";

struct Flags {
    category: Category,
    page_size: Option<usize>,
    pages: usize,
    root: Option<PathBuf>,
    album: Option<String>,
    select: Option<usize>,
    config_dir: Option<PathBuf>,
}

fn parse_flags() -> std::result::Result<Option<Flags>, String> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let category = match args
        .opt_value_from_str::<_, String>("--category")
        .map_err(|e| e.to_string())?
    {
        Some(name) => Category::parse(&name).ok_or(format!("unknown category '{name}'"))?,
        None => Category::Image,
    };
    let flags = Flags {
        category,
        page_size: args.opt_value_from_str("--page-size").map_err(|e| e.to_string())?,
        pages: args
            .opt_value_from_str("--pages")
            .map_err(|e| e.to_string())?
            .unwrap_or(1),
        root: args.opt_value_from_str("--root").map_err(|e| e.to_string())?,
        album: args.opt_value_from_str("--album").map_err(|e| e.to_string())?,
        select: args.opt_value_from_str("--select").map_err(|e| e.to_string())?,
        config_dir: args.opt_value_from_str("--config").map_err(|e| e.to_string())?,
    };

    let rest = args.finish();
    if !rest.is_empty() {
        return Err(format!("unexpected arguments: {rest:?}"));
    }
    Ok(Some(flags))
}

fn build_controller(flags: &Flags, config: &PickerConfig) -> PickerController {
    let library_root = flags
        .root
        .clone()
        .or_else(|| config.library.resolved_root())
        .unwrap_or_else(|| PathBuf::from("."));
    let doc_roots = match (&flags.root, flags.category) {
        (Some(root), Category::Document) => vec![root.clone()],
        _ => document_roots(&config.documents),
    };

    let probe_roots = match flags.category {
        Category::Document => doc_roots.clone(),
        Category::Image | Category::Video => vec![library_root.clone()],
    };

    let services = PickerServices {
        permissions: Arc::new(FsPermissionBroker::new(probe_roots)),
        library: Arc::new(FsMediaLibrary::new(library_root)),
        documents: Arc::new(DocumentScanner::new(ScanPolicy::from_config(
            &config.documents,
            doc_roots,
        ))),
        directories: Arc::new(DirectoryBrowser::new()),
        opener: Arc::new(SystemFileOpener::new()),
    };
    let page_size = flags
        .page_size
        .map_or_else(|| config.page_size(), PageSize::new);
    PickerController::new(services, page_size)
}

fn print_item(index: usize, item: &MediaItem) {
    let kind = item.file_kind();
    let size = item
        .size_bytes
        .map_or_else(|| "-".to_string(), |bytes| bytes.to_string());
    println!(
        "{index:>5}  {:<18} {:>10}  {}",
        kind.icon(),
        size,
        item.path.display()
    );
}

async fn run(flags: Flags) -> Result<ExitCode> {
    let (config, warning) = config::load_with_override(flags.config_dir.clone());
    if let Some(key) = warning {
        tracing::warn!(%key, "settings.toml could not be read, using defaults");
    }

    let mut picker = build_controller(&flags, &config);
    picker.set_active_tab(flags.category);

    let status = picker.request_permission().await;
    if !status.allows_fetch() {
        eprintln!("Access is {status}. Grant read access to the media folders and retry.");
        return Ok(ExitCode::from(1));
    }

    if let Some(name) = &flags.album {
        let albums = picker.load_albums(flags.category).await?;
        let album = albums
            .into_iter()
            .find(|album| album.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::SourceUnavailable(format!("no album named '{name}'")))?;
        picker.select_album(flags.category, album);
    }

    for _ in 0..flags.pages {
        match picker.fetch_next(flags.category).await {
            Some(FetchApplied::Appended(n)) => tracing::info!(appended = n, "page loaded"),
            Some(FetchApplied::Failed(err)) => return Err(err),
            Some(FetchApplied::Discarded) | None => break,
        }
    }
    if let Some(err) = picker.take_error() {
        return Err(err);
    }

    let items = picker.items(flags.category).to_vec();
    for (index, item) in items.iter().enumerate() {
        print_item(index, item);
    }
    println!(
        "{} {} listed ({:?})",
        items.len(),
        flags.category,
        picker.status(flags.category)
    );

    match flags.select {
        Some(count) => {
            for item in items.iter().take(count) {
                picker.long_press(&item.id);
            }
            let result = picker.confirm_async().await;
            println!("confirmed {} item(s):", result.len());
            for (index, item) in result.iter().enumerate() {
                print_item(index, item);
            }
        }
        None => {
            picker.cancel();
            println!("no selection");
        }
    }
    Ok(ExitCode::SUCCESS)
}

#[tokio::main]
async fn main() -> ExitCode {
    let flags = match parse_flags() {
        Ok(Some(flags)) => flags,
        Ok(None) => {
            print!("{HELP}");
            return ExitCode::SUCCESS;
        }
        Err(message) => {
            eprintln!("error: {message}\n\n{HELP}");
            return ExitCode::from(2);
        }
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "media_picker=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(flags).await {
        Ok(code) => code,
        Err(err) => {
            tracing::error!(key = err.message_key(), "{err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
