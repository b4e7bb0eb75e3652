//! Interactive browse loop
//!
//! Each line typed at the prompt is one user action. After the action the
//! card list (and the open detail panel, if any) is rendered again.

use crate::error::{MicroBioError, Result};
use crate::render::{render_cards, render_detail};
use dialoguer::Input;
use microbiobase_common::{AppState, Category, KeyValueStore};

const PROMPT: &str = "s <text>:search  c <category>:category  o <id>:open/close  f [id]:favorite  t:theme  q:quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseAction {
    Search(String),
    Category(Category),
    Open(String),
    /// Toggle the given id, or the open item when `None`
    Favorite(Option<String>),
    Theme,
    Refresh,
    Quit,
}

/// Parse one line of input
pub fn parse_action(input: &str) -> BrowseAction {
    let trimmed = input.trim();
    let (command, arg) = match trimmed.split_once(char::is_whitespace) {
        Some((command, arg)) => (command, arg.trim()),
        None => (trimmed, ""),
    };

    match command {
        "s" | "/" => BrowseAction::Search(arg.to_string()),
        "c" => BrowseAction::Category(Category::parse(if arg.is_empty() { "all" } else { arg })),
        "o" if !arg.is_empty() => BrowseAction::Open(arg.to_string()),
        "f" => BrowseAction::Favorite((!arg.is_empty()).then(|| arg.to_string())),
        "t" => BrowseAction::Theme,
        "q" | "Q" => BrowseAction::Quit,
        _ => BrowseAction::Refresh,
    }
}

/// Apply an action and return a status line, if the action produced one
pub fn apply_action<S: KeyValueStore>(app: &mut AppState<S>, action: BrowseAction) -> Result<Option<String>> {
    let status = match action {
        BrowseAction::Search(text) => {
            app.set_search(text);
            None
        }
        BrowseAction::Category(category) => {
            app.set_category(category);
            None
        }
        BrowseAction::Open(id) => {
            if app.find(&id).is_none() {
                return Err(MicroBioError::ItemNotFound(id));
            }
            app.toggle_detail(&id);
            None
        }
        BrowseAction::Favorite(id) => {
            let id = match id.or_else(|| app.view().selected_item_id.clone()) {
                Some(id) => id,
                None => return Ok(Some("Open an item or pass an id to favorite it".to_string())),
            };
            if app.find(&id).is_none() && !app.is_favorite(&id) {
                return Err(MicroBioError::ItemNotFound(id));
            }
            let added = app.toggle_favorite(&id)?;
            Some(format!("{} {}", if added { "★ Added" } else { "☆ Removed" }, id))
        }
        BrowseAction::Theme => {
            let theme = app.toggle_theme()?;
            Some(format!("Theme: {}", theme))
        }
        BrowseAction::Refresh | BrowseAction::Quit => None,
    };

    Ok(status)
}

/// Full screen for the current state
pub fn render_screen<S: KeyValueStore>(app: &AppState<S>) -> String {
    let view = app.view();
    let mut out = format!(
        "[theme: {}] [category: {}] [search: {}]\n\n",
        app.theme(),
        view.active_category,
        view.search_text
    );

    out.push_str(&render_cards(&app.visible(), app.favorites()));

    if let Some(detail) = app.detail() {
        out.push_str("\n\n");
        out.push_str(&render_detail(&detail));
    }

    out
}

/// Apply an action and return everything to print afterwards.
/// Failed actions leave the state as it was and report the error.
pub fn respond<S: KeyValueStore>(app: &mut AppState<S>, action: BrowseAction) -> String {
    match apply_action(app, action) {
        Ok(Some(status)) => format!("{}\n\n{}", render_screen(app), status),
        Ok(None) => render_screen(app),
        Err(e) => e.to_string(),
    }
}

/// Run until the user quits
pub fn run<S: KeyValueStore>(app: &mut AppState<S>) -> Result<()> {
    println!("{}", render_screen(app));

    loop {
        println!();
        let input: String = Input::new()
            .with_prompt(PROMPT)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| MicroBioError::Interactive(e.to_string()))?;

        let action = parse_action(&input);
        if action == BrowseAction::Quit {
            break;
        }

        println!("{}", respond(app, action));
    }

    Ok(())
}
