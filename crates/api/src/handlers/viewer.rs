//! The public viewer route.

use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use lantern_core::session::SETTLE_DELAY;
use lantern_core::theme::CardStyle;
use lantern_core::types::CardId;
use lantern_db::models::card::CardRecord;
use lantern_db::repositories::CardRepo;

use crate::state::AppState;

/// Fallback destination for unusable viewer links.
const FALLBACK: &str = "/";

/// GET /card/{card_id}
///
/// Renders the closed-letter shell for an existing card. A malformed id,
/// a missing record, and a fetch failure are all treated identically
/// here: the recipient is sent to the home page rather than an error
/// screen.
pub async fn view_card(
    State(state): State<AppState>,
    Path(card_id): Path<String>,
) -> Response {
    let Ok(id) = card_id.parse::<CardId>() else {
        return Redirect::to(FALLBACK).into_response();
    };

    match CardRepo::find_by_id(&state.pool, id).await {
        Ok(Some(card)) => Html(render_viewer_page(&card)).into_response(),
        Ok(None) => {
            tracing::debug!(card_id = %id, "Viewer link for missing card");
            Redirect::to(FALLBACK).into_response()
        }
        Err(err) => {
            tracing::error!(card_id = %id, error = %err, "Card fetch failed");
            Redirect::to(FALLBACK).into_response()
        }
    }
}

/// Minimal closed-letter shell.
///
/// The decorative presentation is the client's concern; the shell carries
/// the data the client script needs to start a viewing session and run
/// the reveal.
fn render_viewer_page(card: &CardRecord) -> String {
    let style = CardStyle::resolve_or_default(&card.style);
    let recipient = escape_html(&card.recipient_name);

    format!(
        "<!doctype html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>A card for {recipient}</title>\n\
         </head>\n\
         <body data-card-id=\"{id}\" data-style=\"{style}\" data-music-url=\"{music}\" data-settle-ms=\"{settle}\">\n\
         <main class=\"closed-letter\">\n\
         <h1>To {recipient}</h1>\n\
         <button type=\"button\" data-action=\"open\">Open</button>\n\
         </main>\n\
         </body>\n\
         </html>\n",
        id = card.id,
        style = style.name(),
        music = style.music_url(),
        settle = SETTLE_DELAY.as_millis(),
    )
}

/// Escape text for interpolation into HTML.
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
