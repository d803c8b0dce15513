//! Line-oriented front end: reads commands from a [`TerminalView`] and
//! drives a [`Controller`] with them.

mod parser;

pub use parser::{parse_command, Command, CommandError};

use crate::controller::Controller;
use crate::engine::SearchType;
use crate::navigator::Navigator;
use crate::storage::Storage;
use crate::view::TerminalView;
use chrono::Utc;
use std::io::{BufRead, Write};

const HELP: &str = "\
Type text to search the web with the current engine.

  :image|:video|:news|:maps [query]   search a vertical (default: input field)
  :type <text>          put text in the input field
  :clear-input          empty the input field
  :engine <key>         google, bing, duckduckgo or yahoo
  :history              list recent searches
  :open <n>             search history item n again
  :rm <id>              remove a history entry
  :clear-history        remove all history
  :favorites            list favorites
  :fav-add <url> [title]
  :fav-rm <url>
  :settings             open the settings editor
  :set <field> <value>  engine, history, voice, dark, language
  :save-settings        save and apply the edited settings
  :close-settings       discard the edited settings
  :voice                search by voice
  :stop                 stop listening
  :export <path>        write the page as HTML
  :quit";

type TerminalController<S, N, R, W> = Controller<S, TerminalView<R, W>, N>;

/// Whether to keep reading input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Read and execute commands until `:quit` or end of input
pub fn run<S, N, R, W>(controller: &mut TerminalController<S, N, R, W>)
where
    S: Storage,
    N: Navigator,
    R: BufRead,
    W: Write,
{
    controller
        .view_mut()
        .print("bahth. Type :help for commands, :quit to leave.");

    while let Some(line) = controller.view_mut().read_line() {
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(e) => {
                controller.view_mut().print(&format!("error: {}", e));
                continue;
            }
        };

        if execute(controller, command) == Flow::Quit {
            break;
        }
    }

    log::info!("Session ended");
}

/// Execute one parsed command
pub fn execute<S, N, R, W>(controller: &mut TerminalController<S, N, R, W>, command: Command) -> Flow
where
    S: Storage,
    N: Navigator,
    R: BufRead,
    W: Write,
{
    match command {
        Command::Search(query) => controller.perform_search(&query, SearchType::Web),
        Command::Quick {
            search_type,
            query: Some(query),
        } => controller.perform_search(&query, search_type),
        Command::Quick {
            search_type,
            query: None,
        } => controller.perform_special_search(search_type),
        Command::Type(text) => controller.set_input(&text),
        Command::ClearInput => controller.clear_input(),
        Command::Engine(engine) => controller.select_engine(engine),
        Command::History => controller.view_mut().show_history(Utc::now()),
        Command::Open(position) => match controller.view().history_id(position) {
            Some(id) => controller.activate_history(id),
            None => controller
                .view_mut()
                .print(&format!("error: no history item {}", position)),
        },
        Command::Remove(id) => controller.remove_from_history(id),
        Command::ClearHistory => controller.clear_history(),
        Command::Favorites => controller.view_mut().show_favorites(),
        Command::FavoriteAdd { url, title } => controller.add_favorite(&title, &url, None),
        Command::FavoriteRemove(url) => controller.remove_favorite(&url),
        Command::Settings => controller.open_settings(),
        Command::Set { field, value } => {
            let view = controller.view_mut();
            let result = match view.editor_mut() {
                Some(editor) => editor.set_field(&field, &value),
                None => {
                    view.print("error: open the settings editor with :settings first");
                    return Flow::Continue;
                }
            };
            match result {
                Ok(()) => view.show_editor(),
                Err(e) => view.print(&format!("error: {}", e)),
            }
        }
        Command::SaveSettings => match controller.view().editor() {
            Some(settings) => controller.save_settings(settings),
            None => controller
                .view_mut()
                .print("error: open the settings editor with :settings first"),
        },
        Command::CloseSettings => controller.close_settings(),
        Command::Voice => {
            controller.start_voice_search();
            controller.pump_voice();
        }
        Command::Stop => controller.stop_voice_search(),
        Command::Export(path) => {
            let html = controller.view().document().page_html(Utc::now());
            match std::fs::write(&path, html) {
                Ok(()) => {
                    log::info!("Exported page to {}", path.display());
                    controller
                        .view_mut()
                        .print(&format!("wrote {}", path.display()));
                }
                Err(e) => controller
                    .view_mut()
                    .print(&format!("error: failed to write {}: {}", path.display(), e)),
            }
        }
        Command::Help => controller.view_mut().print(HELP),
        Command::Quit => return Flow::Quit,
    }

    Flow::Continue
}
