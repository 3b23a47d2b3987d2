//! Handlers for the `/cards` resource.

use axum::extract::multipart::Multipart;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use lantern_cloud::{upload_image, ImageUpload};
use lantern_core::card::CardDraft;
use lantern_core::error::CoreError;
use lantern_core::link::build_viewer_link;
use lantern_core::theme::CardStyle;
use lantern_core::types::CardId;
use lantern_db::models::card::{CardRecord, CreateCard};
use lantern_db::repositories::CardRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Response payload for a successful create: the persisted record plus
/// its shareable viewer link.
#[derive(Debug, Serialize)]
pub struct CardCreated {
    pub card: CardRecord,
    pub link: String,
}

/// Parsed multipart form for card creation.
#[derive(Debug, Default)]
struct CardForm {
    recipient_name: String,
    message: String,
    sender_name: String,
    card_date: String,
    style: Option<String>,
    caption: Option<String>,
    image: Option<(String, Vec<u8>)>,
}

impl CardForm {
    async fn from_multipart(multipart: &mut Multipart) -> AppResult<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(format!("Invalid multipart form: {e}")))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            match name.as_str() {
                "image" => {
                    let file_name = field.file_name().unwrap_or("upload").to_string();
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| AppError::BadRequest(format!("Invalid image part: {e}")))?;
                    form.image = Some((file_name, bytes.to_vec()));
                }
                _ => {
                    let value = field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(format!("Invalid field '{name}': {e}")))?;
                    match name.as_str() {
                        "recipient_name" => form.recipient_name = value,
                        "message" => form.message = value,
                        "sender_name" => form.sender_name = value,
                        "card_date" => form.card_date = value,
                        "style" => form.style = Some(value),
                        "caption" => form.caption = Some(value),
                        // Unknown fields are ignored.
                        _ => {}
                    }
                }
            }
        }

        Ok(form)
    }
}

/// POST /api/v1/cards
///
/// Multipart form: `recipient_name`, `message`, `sender_name`,
/// `card_date`, optional `style`, optional `caption`, optional `image`
/// file part.
///
/// Sequencing mirrors the authoring flow: fail-fast validation before any
/// store interaction, then the optional image upload, then the single
/// insert. An upload failure aborts the submission entirely; a create
/// failure after a successful upload leaves the blob orphaned (accepted
/// tradeoff, see DESIGN.md).
pub async fn create(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<CardCreated>>)> {
    let form = CardForm::from_multipart(&mut multipart).await?;

    let style = match form.style.as_deref() {
        Some(name) if !name.trim().is_empty() => CardStyle::from_name(name)?,
        _ => CardStyle::default(),
    };

    let mut draft = CardDraft {
        recipient_name: form.recipient_name,
        message: form.message,
        image_url: None,
        image_caption: None,
        sender_name: form.sender_name,
        card_date: form.card_date,
        style,
    };

    // Fail fast: the required fields are checked before any network or
    // storage interaction is attempted.
    draft.validate()?;

    // Optional upload. Success is a precondition for the insert below.
    if let Some((file_name, bytes)) = form.image {
        let extension = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_string())
            .unwrap_or_default();
        let url = upload_image(
            state.blob_store.as_ref(),
            ImageUpload { bytes, extension },
        )
        .await?;

        draft.image_url = Some(url.into_inner());
        // A caption is only kept alongside an image.
        draft.image_caption = form.caption.filter(|c| !c.trim().is_empty());
    }

    // Validation is idempotent; the second pass re-checks the
    // caption/image pairing now that the URL is known.
    let valid = draft.validate()?;

    let record = CardRepo::create(&state.pool, &CreateCard::from(valid)).await?;
    let link = build_viewer_link(&state.config.public_origin, &record.id.to_string());
    tracing::info!(card_id = %record.id, "Card created");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: CardCreated { card: record, link },
        }),
    ))
}

/// GET /api/v1/cards/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<CardId>,
) -> AppResult<Json<DataResponse<CardRecord>>> {
    let card = CardRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Card", id }))?;
    Ok(Json(DataResponse { data: card }))
}
