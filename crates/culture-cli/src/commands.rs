//! Command handlers for CLI subcommands.

use std::fmt::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info};

use culture_events::{
    seed_events, EventError, FiltersPatch, InMemoryEventRepository, RepositoryConfig, SystemClock,
};
use culture_models::{
    placeholder_image_url, CulturalEvent, EventCategory, EventId, EventPatch, EventStatus, NewEvent,
};
use culture_persistence::{EventCache, FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};
use culture_store::{Countdown, CountdownTimer, EventStore};

use crate::cli::{Cli, Commands, CreateArgs, OutputFormat};
use crate::render;
use crate::route::Route;

/// Result type for command operations.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Global options shared by every command.
#[derive(Debug, Clone)]
pub struct Settings {
    pub state_dir: PathBuf,
    pub latency: Duration,
    /// Keep events in memory only.
    pub ephemeral: bool,
    /// Fall back to the starter catalogue when nothing is stored.
    pub seed: bool,
}

impl Settings {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            state_dir: cli.state_dir(),
            latency: Duration::from_millis(cli.latency_ms),
            ephemeral: cli.ephemeral,
            seed: !cli.no_seed,
        }
    }
}

/// Opens the repository described by `settings`.
pub fn open_repository(settings: &Settings) -> Result<InMemoryEventRepository> {
    let config = RepositoryConfig::new().with_latency(settings.latency);
    let fallback = if settings.seed {
        seed_events(Utc::now())
    } else {
        Vec::new()
    };

    let store: Arc<dyn KeyValueStore> = if settings.ephemeral {
        Arc::new(MemoryKeyValueStore::new())
    } else {
        culture_core::ensure_state_dirs(&settings.state_dir)?;
        let data_dir = culture_core::data_dir_in(&settings.state_dir);
        debug!(path = %data_dir.display(), "using file storage");
        Arc::new(FileKeyValueStore::new(data_dir))
    };

    Ok(InMemoryEventRepository::open(
        config,
        EventCache::new(store),
        fallback,
    ))
}

/// Execute a CLI command. No command shows the list page.
pub async fn execute(command: Option<Commands>, settings: &Settings) -> Result<()> {
    let repository = open_repository(settings)?;
    let store = EventStore::new(Arc::new(repository));
    store.load().await?;

    let command = command.unwrap_or(Commands::Open {
        path: "/".to_string(),
    });

    match command {
        Commands::List {
            status,
            category,
            search,
            format,
        } => cmd_list(&store, status, category, search, format),
        Commands::Show { id } => cmd_show(&store, &EventId::from_string(id)),
        Commands::Create(args) => cmd_create(&store, args).await,
        Commands::Update { id, fields } => {
            cmd_update(&store, &EventId::from_string(id), fields.into_patch()).await
        }
        Commands::Delete { id } => cmd_delete(&store, &EventId::from_string(id)).await,
        Commands::Toggle { id } => cmd_toggle(&store, &EventId::from_string(id)).await,
        Commands::Countdown { id, ticks } => {
            cmd_countdown(&store, &EventId::from_string(id), ticks).await
        }
        Commands::Favorite { id } => cmd_favorite(&store, &EventId::from_string(id)),
        Commands::Open { path } => cmd_open(&store, &path),
    }
}

fn cmd_list(
    store: &EventStore,
    status: Option<EventStatus>,
    category: Option<EventCategory>,
    search: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let mut patch = FiltersPatch::new().status(status).category(category);
    if let Some(term) = search {
        patch = patch.search(term);
    }
    store.set_filters(patch);

    let events = store.filtered_events();
    match format {
        OutputFormat::Table => {
            println!("{}\n", render::render_counts(&store.counts()));
            if events.is_empty() {
                print_empty_list();
                return Ok(());
            }
            print!("{}", render::render_table(&events));
            println!("\n{} event(s)", events.len());
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&events)?;
            println!("{}", json);
        }
        OutputFormat::Brief => print!("{}", render::render_brief(&events)),
    }

    Ok(())
}

fn cmd_show(store: &EventStore, id: &EventId) -> Result<()> {
    let event = select(store, id)?;
    let countdown = Countdown::until(event.date, Utc::now());
    print!("{}", render::render_detail(&event, countdown));
    Ok(())
}

async fn cmd_create(store: &EventStore, args: CreateArgs) -> Result<()> {
    let draft = args.into_draft().with_placeholder_image(Utc::now());
    check_form(&draft)?;

    let event = store.create(draft).await?;
    println!("Created event '{}' ({})", event.title, event.id);
    println!("  Status: {}", event.status.label());
    println!("  Date: {}", render::format_date_long(event.date));
    Ok(())
}

async fn cmd_update(store: &EventStore, id: &EventId, mut patch: EventPatch) -> Result<()> {
    if patch.is_empty() {
        return Err("nothing to update: pass at least one field".into());
    }
    // A blank image field falls back to the placeholder, as on creation
    if patch.image_url.as_deref().is_some_and(|url| url.trim().is_empty()) {
        patch.image_url = Some(placeholder_image_url(Utc::now()));
    }

    let mut preview = select(store, id)?;
    patch.apply(&mut preview);
    check_form(&NewEvent::from(&preview))?;

    let event = store.update(id, patch).await?;
    println!("Updated event '{}' ({})", event.title, event.id);
    Ok(())
}

async fn cmd_delete(store: &EventStore, id: &EventId) -> Result<()> {
    let title = select(store, id)?.title;
    store.remove(id).await?;
    println!("Deleted event '{}' ({})", title, id);
    Ok(())
}

async fn cmd_toggle(store: &EventStore, id: &EventId) -> Result<()> {
    let event = store.toggle_status(id).await?;
    let verb = if event.is_published() {
        "Published"
    } else {
        "Unpublished"
    };
    println!("{} '{}' ({})", verb, event.title, event.id);
    Ok(())
}

async fn cmd_countdown(store: &EventStore, id: &EventId, ticks: u32) -> Result<()> {
    let event = select(store, id)?;
    let timer = CountdownTimer::start(event.date, Arc::new(SystemClock));
    let mut updates = timer.subscribe();

    println!("{}", event.title);
    let mut printed = 0;
    loop {
        let current = *updates.borrow_and_update();
        match current {
            Some(countdown) => println!("Starts in {}", countdown),
            None => {
                println!("The event has started.");
                break;
            }
        }
        printed += 1;
        if printed >= ticks || updates.changed().await.is_err() {
            break;
        }
    }

    timer.stop();
    Ok(())
}

fn cmd_favorite(store: &EventStore, id: &EventId) -> Result<()> {
    let event = select(store, id)?;
    let verb = if store.toggle_favorite(id) {
        "Starred"
    } else {
        "Unstarred"
    };
    println!("{} '{}' ({})\n", verb, event.title, event.id);
    print!("{}", render_list_page(store));
    Ok(())
}

fn cmd_open(store: &EventStore, path: &str) -> Result<()> {
    let route = Route::parse(path);
    info!(route = %route, "opening route");

    match route {
        Route::List => print!("{}", render_list_page(store)),
        Route::NewEvent => print!("{}", render::render_form(None)),
        Route::Detail(id) => cmd_show(store, &id)?,
        Route::Edit(id) => {
            let event = select(store, &id)?;
            print!("{}", render::render_form(Some(&event)));
        }
    }

    Ok(())
}

/// Selects an event in the store and returns a copy of it.
fn select(store: &EventStore, id: &EventId) -> Result<CulturalEvent> {
    store.select(Some(id.clone()));
    store
        .selected_event()
        .ok_or_else(|| EventError::NotFound(id.clone()).into())
}

/// Applies the form rules, printing each violation.
fn check_form(draft: &NewEvent) -> Result<()> {
    if let Err(errors) = draft.validate() {
        eprint!("{}", render::render_field_errors(&errors));
        return Err(EventError::Validation(errors).into());
    }
    Ok(())
}

/// The list page: heading, counts, then one card per filtered event.
fn render_list_page(store: &EventStore) -> String {
    let state = store.snapshot();
    let events = state.filtered_events();

    let mut out = String::new();
    let _ = writeln!(out, "Cultural Events");
    let _ = writeln!(out, "{}\n", render::render_counts(&state.counts()));
    if events.is_empty() {
        out.push_str(EMPTY_LIST);
    }
    for event in &events {
        let _ = writeln!(out, "{}", render::render_card(event, state.is_favorite(&event.id)));
    }
    out
}

const EMPTY_LIST: &str = "No events found.\nTry adjusting your filters or create a new event.\n";

fn print_empty_list() {
    print!("{}", EMPTY_LIST);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::tempdir;

    fn settings(state_dir: PathBuf) -> Settings {
        Settings {
            state_dir,
            latency: Duration::ZERO,
            ephemeral: false,
            seed: true,
        }
    }

    fn create_args(title: &str) -> CreateArgs {
        CreateArgs {
            title: title.to_string(),
            description: "Quartet playing standards all night.".to_string(),
            category: EventCategory::Concert,
            status: EventStatus::Draft,
            venue: "Blue Note".to_string(),
            date: Utc.with_ymd_and_hms(2030, 3, 1, 20, 0, 0).unwrap(),
            price: 25.0,
            seats: 100,
            image_url: None,
        }
    }

    async fn loaded_store(settings: &Settings) -> EventStore {
        let store = EventStore::new(Arc::new(open_repository(settings).unwrap()));
        store.load().await.unwrap();
        store
    }

    #[tokio::test]
    async fn test_first_run_uses_seed_catalogue() {
        let dir = tempdir().unwrap();
        let store = loaded_store(&settings(dir.path().to_path_buf())).await;
        assert_eq!(store.counts().total, seed_events(Utc::now()).len());
    }

    #[tokio::test]
    async fn test_no_seed_starts_empty() {
        let dir = tempdir().unwrap();
        let mut settings = settings(dir.path().to_path_buf());
        settings.seed = false;

        let store = loaded_store(&settings).await;
        assert_eq!(store.counts().total, 0);
        cmd_list(&store, None, None, None, OutputFormat::Table).unwrap();
    }

    #[tokio::test]
    async fn test_created_event_survives_restart() {
        let dir = tempdir().unwrap();
        let settings = settings(dir.path().to_path_buf());

        let store = loaded_store(&settings).await;
        cmd_create(&store, create_args("Jazz Night")).await.unwrap();
        let created = store.snapshot().events.last().cloned().unwrap();
        assert!(created.image_url.is_some());

        let reopened = loaded_store(&settings).await;
        assert_eq!(reopened.snapshot().find(&created.id), Some(&created));
    }

    #[tokio::test]
    async fn test_ephemeral_writes_nothing() {
        let dir = tempdir().unwrap();
        let mut settings = settings(dir.path().join("state"));
        settings.ephemeral = true;

        let store = loaded_store(&settings).await;
        cmd_create(&store, create_args("Jazz Night")).await.unwrap();
        assert!(!settings.state_dir.exists());
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_form() {
        let dir = tempdir().unwrap();
        let store = loaded_store(&settings(dir.path().to_path_buf())).await;
        let before = store.counts().total;

        let err = cmd_create(&store, create_args("Hi")).await.unwrap_err();
        assert!(err.to_string().contains("title"));
        assert_eq!(store.counts().total, before);
    }

    #[tokio::test]
    async fn test_update_validates_merged_form() {
        let dir = tempdir().unwrap();
        let store = loaded_store(&settings(dir.path().to_path_buf())).await;
        let id = store.snapshot().events[0].id.clone();

        let blank_venue = EventPatch {
            venue: Some("  ".into()),
            ..EventPatch::default()
        };
        assert!(cmd_update(&store, &id, blank_venue).await.is_err());
        assert!(cmd_update(&store, &id, EventPatch::new()).await.is_err());

        cmd_update(&store, &id, EventPatch::seats(0)).await.unwrap();
        assert!(store.snapshot().find(&id).unwrap().is_sold_out());
    }

    #[tokio::test]
    async fn test_update_blank_image_uses_placeholder() {
        let dir = tempdir().unwrap();
        let store = loaded_store(&settings(dir.path().to_path_buf())).await;
        let id = store.snapshot().events[0].id.clone();

        let blank_image = EventPatch {
            image_url: Some(String::new()),
            ..EventPatch::default()
        };
        cmd_update(&store, &id, blank_image).await.unwrap();

        let url = store.snapshot().find(&id).unwrap().image_url.clone().unwrap();
        assert!(url.starts_with("https://picsum.photos/seed/"));

        let spaces = EventPatch {
            image_url: Some("   ".into()),
            ..EventPatch::default()
        };
        cmd_update(&store, &id, spaces).await.unwrap();
        let url = store.snapshot().find(&id).unwrap().image_url.clone().unwrap();
        assert!(!url.trim().is_empty());
    }

    #[tokio::test]
    async fn test_favorite_stars_card_on_list_page() {
        let dir = tempdir().unwrap();
        let store = loaded_store(&settings(dir.path().to_path_buf())).await;
        let event = store.snapshot().events[0].clone();
        let starred_card = format!("★ [{}] {}", event.category.label(), event.title);

        assert!(!render_list_page(&store).contains(&starred_card));

        cmd_favorite(&store, &event.id).unwrap();
        assert!(store.snapshot().is_favorite(&event.id));
        let page = render_list_page(&store);
        assert!(page.starts_with("Cultural Events"));
        assert!(page.contains(&starred_card));

        cmd_favorite(&store, &event.id).unwrap();
        assert!(!render_list_page(&store).contains(&starred_card));
    }

    #[tokio::test]
    async fn test_favorite_unknown_event_is_an_error() {
        let dir = tempdir().unwrap();
        let store = loaded_store(&settings(dir.path().to_path_buf())).await;

        assert!(cmd_favorite(&store, &EventId::from_string("evt-missing")).is_err());
        assert!(store.snapshot().favorites.is_empty());
    }

    #[tokio::test]
    async fn test_toggle_and_delete() {
        let dir = tempdir().unwrap();
        let store = loaded_store(&settings(dir.path().to_path_buf())).await;
        let draft = store
            .snapshot()
            .events
            .into_iter()
            .find(|e| e.status == EventStatus::Draft)
            .unwrap();

        cmd_toggle(&store, &draft.id).await.unwrap();
        assert!(store.snapshot().find(&draft.id).unwrap().is_published());

        cmd_delete(&store, &draft.id).await.unwrap();
        assert!(store.snapshot().find(&draft.id).is_none());
        assert!(cmd_delete(&store, &draft.id).await.is_err());
    }

    #[tokio::test]
    async fn test_toggle_cancelled_is_an_error() {
        let dir = tempdir().unwrap();
        let store = loaded_store(&settings(dir.path().to_path_buf())).await;
        let cancelled = store
            .snapshot()
            .events
            .into_iter()
            .find(|e| e.status == EventStatus::Cancelled)
            .unwrap();

        assert!(cmd_toggle(&store, &cancelled.id).await.is_err());
    }

    #[tokio::test]
    async fn test_open_routes() {
        let dir = tempdir().unwrap();
        let store = loaded_store(&settings(dir.path().to_path_buf())).await;
        let id = store.snapshot().events[0].id.clone();

        cmd_open(&store, "/").unwrap();
        cmd_open(&store, "/events/new").unwrap();
        cmd_open(&store, &format!("/events/{}", id)).unwrap();
        cmd_open(&store, &format!("/events/{}/edit", id)).unwrap();
        cmd_open(&store, "/does/not/exist").unwrap();
        assert!(cmd_open(&store, "/events/evt-missing").is_err());
    }

    #[tokio::test]
    async fn test_countdown_for_past_event_stops_immediately() {
        let dir = tempdir().unwrap();
        let store = loaded_store(&settings(dir.path().to_path_buf())).await;
        let past = store
            .snapshot()
            .events
            .into_iter()
            .find(|e| !e.is_upcoming(Utc::now()))
            .unwrap();

        cmd_countdown(&store, &past.id, 5).await.unwrap();
    }

    #[tokio::test]
    async fn test_countdown_prints_requested_ticks() {
        let dir = tempdir().unwrap();
        let store = loaded_store(&settings(dir.path().to_path_buf())).await;
        let upcoming = store
            .snapshot()
            .events
            .into_iter()
            .find(|e| e.is_upcoming(Utc::now()))
            .unwrap();

        cmd_countdown(&store, &upcoming.id, 1).await.unwrap();
    }
}
