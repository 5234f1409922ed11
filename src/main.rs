use clap::Parser;
use iced::widget::{button, column, container, pick_list, row, scrollable, text, Column};
use iced::{Element, Length, Task, Theme};
use rfd::FileDialog;
use std::path::PathBuf;
use std::sync::Arc;

use skip_compare::config::{ViewerConfig, DEFAULT_REFERENCE};
use skip_compare::error::CompareError;
use skip_compare::state::{compare_in_background, Comparison, Session};

mod ui;

#[derive(Parser, Debug)]
#[command(name = "skip-compare")]
#[command(about = "Compare skip-layer renders against a reference image")]
struct Cli {
    /// Folder holding the reference and candidate images [default: ./images]
    #[arg(long)]
    folder: Option<PathBuf>,
    /// Filename of the reference image inside the folder
    #[arg(long, default_value = DEFAULT_REFERENCE)]
    reference: String,
}

impl Cli {
    fn into_config(self) -> ViewerConfig {
        let folder = self.folder.unwrap_or_else(|| ViewerConfig::default().folder);
        ViewerConfig::new(folder, self.reference)
    }
}

/// Main application state
struct SkipCompare {
    /// Folder and reference currently shown
    config: ViewerConfig,
    /// Open folder, or why it could not be opened
    session: Result<Arc<Session>, Arc<CompareError>>,
    /// Filename picked in the list
    selected: Option<String>,
    /// Result for `selected`; None while it is being computed
    panel: Option<Result<ui::ComparisonPanel, Arc<CompareError>>>,
    /// Bumped on every new request; results tagged with an older value are dropped
    generation: u64,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// User picked a candidate in the list
    CandidateSelected(String),
    /// Background comparison finished for the request tagged `generation`
    ComparisonReady {
        generation: u64,
        result: Result<Arc<Comparison>, Arc<CompareError>>,
    },
    /// User clicked the "Open Folder" button
    OpenFolder,
    /// Re-scan the current folder
    Reload,
}

impl SkipCompare {
    /// Create a new instance of the application
    fn new(config: ViewerConfig) -> (Self, Task<Message>) {
        let session = open_session(&config);
        let mut app = SkipCompare {
            config,
            session,
            selected: None,
            panel: None,
            generation: 0,
        };
        let task = app.select_default();
        (app, task)
    }

    /// Re-scan `self.config` and compare its first candidate
    fn reload(&mut self) -> Task<Message> {
        self.session = open_session(&self.config);
        self.selected = None;
        self.panel = None;
        self.generation += 1;
        self.select_default()
    }

    fn select_default(&mut self) -> Task<Message> {
        let first = self
            .session
            .as_ref()
            .ok()
            .and_then(|session| session.default_selection());
        match first {
            Some(filename) => self.select(filename),
            None => Task::none(),
        }
    }

    /// Start a fresh comparison for `filename`
    fn select(&mut self, filename: String) -> Task<Message> {
        let Ok(session) = &self.session else {
            return Task::none();
        };
        let session = Arc::clone(session);

        self.generation += 1;
        let generation = self.generation;
        self.selected = Some(filename.clone());
        self.panel = None;

        Task::perform(compare_in_background(session, filename), move |result| {
            Message::ComparisonReady {
                generation,
                result: result.map(Arc::new).map_err(Arc::new),
            }
        })
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::CandidateSelected(filename) => self.select(filename),
            Message::ComparisonReady { generation, result } => {
                // The user may have picked another file or folder while this one was running
                if generation != self.generation {
                    log::debug!(
                        "Dropping stale comparison (request {}, current {})",
                        generation,
                        self.generation
                    );
                    return Task::none();
                }

                self.panel = Some(match result {
                    Ok(comparison) => Ok(ui::ComparisonPanel::new(&comparison)),
                    Err(err) => {
                        log::warn!("⚠️  {}", err);
                        Err(err)
                    }
                });
                Task::none()
            }
            Message::OpenFolder => {
                // Show the native folder picker dialog
                let folder = FileDialog::new()
                    .set_title("Select Folder with Skip Layer Images")
                    .set_directory(&self.config.folder)
                    .pick_folder();

                match folder {
                    Some(folder_path) => {
                        self.config = self.config.with_folder(&folder_path);
                        self.reload()
                    }
                    None => Task::none(),
                }
            }
            Message::Reload => self.reload(),
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let mut content: Column<Message> = column![
            text("Image Comparison: Original vs Skip Layers").size(32),
            row![
                button("Open Folder…")
                    .on_press(Message::OpenFolder)
                    .padding(10),
                button("Reload").on_press(Message::Reload).padding(10),
                text(self.config.folder.display().to_string()).size(14),
            ]
            .spacing(10)
            .align_y(iced::Alignment::Center),
        ]
        .spacing(20)
        .padding(30);

        match &self.session {
            Err(err) => {
                content = content.push(ui::notice(err));
            }
            Ok(session) => {
                content = content
                    .push(text("Select Skip Layer Image").size(22))
                    .push(pick_list(
                        session.candidates(),
                        self.selected.clone(),
                        Message::CandidateSelected,
                    ));

                content = match (&self.panel, &self.selected) {
                    (Some(Ok(panel)), _) => content.push(panel.view()),
                    (Some(Err(err)), _) => content.push(ui::notice(err)),
                    (None, Some(filename)) => content.push(text(format!("Comparing {}…", filename))),
                    (None, None) => content,
                };
            }
        }

        container(scrollable(content))
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn open_session(config: &ViewerConfig) -> Result<Arc<Session>, Arc<CompareError>> {
    log::info!("📁 Opening {}", config.folder.display());
    Session::open(config.clone()).map(Arc::new).map_err(|err| {
        log::warn!("⚠️  {}", err);
        Arc::new(err)
    })
}

fn main() -> iced::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Cli::parse().into_config();

    iced::application(
        "Skip Layer Compare",
        SkipCompare::update,
        SkipCompare::view,
    )
    .theme(SkipCompare::theme)
    .centered()
    .run_with(move || SkipCompare::new(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let config = Cli::parse_from(["skip-compare"]).into_config();
        assert!(config.folder.ends_with("images"));
        assert_eq!(config.reference_name, DEFAULT_REFERENCE);
    }

    #[test]
    fn test_cli_overrides() {
        let config = Cli::parse_from([
            "skip-compare",
            "--folder",
            "/tmp/renders",
            "--reference",
            "base.jpg",
        ])
        .into_config();
        assert_eq!(config.folder, PathBuf::from("/tmp/renders"));
        assert_eq!(config.reference_path(), PathBuf::from("/tmp/renders/base.jpg"));
    }

    fn folder_with(dir: &std::path::Path, pixel: [u8; 3]) -> ViewerConfig {
        image::RgbImage::new(2, 2)
            .save(dir.join(DEFAULT_REFERENCE))
            .unwrap();
        image::RgbImage::from_pixel(2, 2, image::Rgb(pixel))
            .save(dir.join("skip_1.png"))
            .unwrap();
        ViewerConfig::new(dir, DEFAULT_REFERENCE)
    }

    fn ready(config: &ViewerConfig, generation: u64) -> Message {
        let session = Session::open(config.clone()).unwrap();
        Message::ComparisonReady {
            generation,
            result: Ok(Arc::new(session.compare("skip_1.png").unwrap())),
        }
    }

    fn shown_max(app: &SkipCompare) -> Option<u8> {
        match &app.panel {
            Some(Ok(panel)) => panel.difference.as_ref().ok().map(|d| d.stats.max),
            _ => None,
        }
    }

    #[test]
    fn test_result_from_previous_folder_is_dropped() {
        let folder_a = tempfile::tempdir().unwrap();
        let folder_b = tempfile::tempdir().unwrap();
        let config_a = folder_with(folder_a.path(), [7, 7, 7]);
        let config_b = folder_with(folder_b.path(), [40, 40, 40]);

        let (mut app, _) = SkipCompare::new(config_a.clone());
        let request_a = app.generation;

        // Same filename in the new folder, so only the generation tells them apart
        app.config = config_b.clone();
        let _ = app.reload();
        let request_b = app.generation;
        assert_ne!(request_a, request_b);
        assert_eq!(app.selected.as_deref(), Some("skip_1.png"));

        let _ = app.update(ready(&config_b, request_b));
        assert_eq!(shown_max(&app), Some(40));

        let _ = app.update(ready(&config_a, request_a));
        assert_eq!(shown_max(&app), Some(40));
    }

    #[test]
    fn test_reselecting_invalidates_running_request() {
        let dir = tempfile::tempdir().unwrap();
        let config = folder_with(dir.path(), [3, 3, 3]);

        let (mut app, _) = SkipCompare::new(config.clone());
        let first = app.generation;
        let _ = app.update(Message::CandidateSelected("skip_1.png".to_string()));

        let _ = app.update(ready(&config, first));
        assert!(app.panel.is_none());

        let current = app.generation;
        let _ = app.update(ready(&config, current));
        assert_eq!(shown_max(&app), Some(3));
    }
}
