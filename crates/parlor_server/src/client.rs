//! Browser client pages.
//!
//! The pages only render what the server pushes. Clicks are sent as move
//! commands and the server decides whether they stand.

use axum::response::Html;
use parlor_tictactoe::Mark;

const PLAYER_TEMPLATE: &str = include_str!("../assets/client.html");
const INDEX: &str = include_str!("../assets/index.html");

/// The game page for one player.
pub fn player_page(mark: Mark) -> Html<String> {
    let token: &'static str = mark.into();
    Html(PLAYER_TEMPLATE.replace("{{player}}", token))
}

/// Landing page linking both player pages.
pub fn index_page() -> Html<&'static str> {
    Html(INDEX)
}
