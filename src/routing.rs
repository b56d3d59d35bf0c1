use crate::actors::booking_intake::{BookingIntakeActor, SubmitBooking};
use crate::actors::health::{GetSystemHealth, HealthActor};
use crate::actors::page_renderer::{PageRendererActor, RenderPage};
use crate::booking::model::Choice;
use crate::booking::wizard::first_invalid_step;
use crate::booking::{BookingWizard, Field, Motive, SubmissionError, ValidationError, WizardError};
use crate::errors::DetailedError;
use crate::session::{Notice, WizardSnapshot, load_snapshot, store_snapshot};
use crate::static_assets;
use crate::view::{PageQuery, PageView, SiteSettings};
use actix::Addr;
use actix_session::Session;
use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, Responder, web};

/// Shared by every handler.
pub struct SiteState {
    pub renderer: Addr<PageRendererActor>,
    pub intake: Addr<BookingIntakeActor>,
    pub health: Addr<HealthActor>,
    pub settings: SiteSettings,
    pub dev_mode: bool,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/booking", web::post().to(booking_action))
        .route("/booking", web::get().to(back_to_form))
        .route("/health", web::get().to(health_check))
        .route("/assets/{name}", web::get().to(serve_asset));
}

/// What a booking form button asks for. Motive buttons carry their motive
/// as `toggle_motive:<token>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingAction {
    Next,
    Previous,
    Submit,
    Reset,
    ToggleMotive(Motive),
}

impl BookingAction {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "next" => Some(BookingAction::Next),
            "previous" => Some(BookingAction::Previous),
            "submit" => Some(BookingAction::Submit),
            "reset" => Some(BookingAction::Reset),
            other => other
                .strip_prefix("toggle_motive:")
                .and_then(Motive::from_token)
                .map(BookingAction::ToggleMotive),
        }
    }
}

fn is_xhr(req: &HttpRequest) -> bool {
    req.headers()
        .get("x-requested-with")
        .is_some_and(|v| v == "XMLHttpRequest")
}

fn error_page(mut detailed_error: DetailedError, req: &HttpRequest, dev_mode: bool) -> HttpResponse {
    detailed_error.route = Some(req.path().to_string());
    if dev_mode {
        let html = crate::templates::render_structured_debug_error(&detailed_error);
        HttpResponse::Ok().content_type("text/html; charset=utf-8").body(html)
    } else {
        let html = crate::templates::render_production_error(&detailed_error);
        HttpResponse::InternalServerError()
            .content_type("text/html; charset=utf-8")
            .body(html)
    }
}

async fn render_page(req: &HttpRequest, state: &SiteState, view: PageView) -> HttpResponse {
    match state.renderer.send(RenderPage { view }).await {
        Ok(Ok(html)) => HttpResponse::Ok().content_type("text/html; charset=utf-8").body(html),
        Ok(Err(detailed_error)) => error_page(detailed_error, req, state.dev_mode),
        Err(e) => {
            log::error!("A mailbox error occurred: {}. This might indicate a problem with the server's internal communication.", e);
            error_page(DetailedError::internal(e.to_string()), req, state.dev_mode)
        }
    }
}

/// Renders the single page. Validation errors and submit notices are shown
/// once, then dropped from the session.
pub async fn index(
    req: HttpRequest,
    query: web::Query<PageQuery>,
    session: Session,
    state: web::Data<SiteState>,
) -> HttpResponse {
    let mut snapshot = load_snapshot(&session);
    let view = PageView::build(&snapshot, &query, &state.settings);

    if snapshot.has_feedback() {
        snapshot.clear_feedback();
        if let Err(e) = store_snapshot(&session, &snapshot) {
            log::error!("Could not clear booking feedback from session: {}", e);
        }
    }

    render_page(&req, &state, view).await
}

pub async fn back_to_form() -> HttpResponse {
    HttpResponse::SeeOther()
        .append_header((header::LOCATION, "/#book"))
        .finish()
}

/// Stores every recognised field posted with the form. Unparseable values are
/// left untouched and reported back.
fn apply_form(wizard: &mut BookingWizard, form: &[(String, String)]) -> Vec<ValidationError> {
    form.iter()
        .filter_map(|(name, value)| {
            let field = Field::from_form_name(name)?;
            if field == Field::Motives {
                return None;
            }
            wizard.apply(field, value).err()
        })
        .collect()
}

async fn submit_booking(snapshot: &mut WizardSnapshot, state: &SiteState) {
    let request = match snapshot.wizard.submit() {
        Ok(request) => request,
        Err(WizardError::Validation(errors)) => {
            if let Some(step) = first_invalid_step(&errors) {
                snapshot.wizard.rewind_to(step);
            }
            log::debug!("Booking submit rejected with {} validation error(s)", errors.len());
            snapshot.errors = errors;
            return;
        }
        Err(e @ WizardError::NotAtFinalStep(_)) => {
            log::warn!("Ignoring booking submit: {}", e);
            return;
        }
    };

    let msg = SubmitBooking {
        wizard_id: snapshot.wizard.id(),
        request,
    };
    snapshot.notice = Some(match state.intake.send(msg).await {
        Ok(Ok(receipt)) => {
            snapshot.wizard.reset();
            Notice::Submitted {
                reference: receipt.reference,
            }
        }
        Ok(Err(SubmissionError::InFlight)) => Notice::AlreadySending,
        Ok(Err(e)) => Notice::SubmissionFailed {
            message: format!("We could not send your booking: {}.", e),
            retryable: e.is_retryable(),
        },
        Err(e) => {
            log::error!("Booking intake is unavailable: {}", e);
            Notice::SubmissionFailed {
                message: "We could not send your booking right now.".to_string(),
                retryable: true,
            }
        }
    });
}

/// Handles every booking form button. The wizard lives in the session, so
/// a plain form post answers with a redirect back to the form and the next
/// page load shows the result. Script-driven posts get the page directly.
pub async fn booking_action(
    req: HttpRequest,
    body: web::Bytes,
    session: Session,
    state: web::Data<SiteState>,
) -> HttpResponse {
    let form: Vec<(String, String)> = match serde_urlencoded::from_bytes(&body) {
        Ok(form) => form,
        Err(e) => {
            log::warn!("Unreadable booking form post: {}", e);
            return HttpResponse::BadRequest().body("Unreadable form data");
        }
    };

    let mut snapshot = load_snapshot(&session);
    snapshot.clear_feedback();
    let field_errors = apply_form(&mut snapshot.wizard, &form);
    let action = form
        .iter()
        .find(|(name, _)| name == "action")
        .and_then(|(_, value)| BookingAction::parse(value));

    match action {
        Some(BookingAction::Next) if field_errors.is_empty() => {
            if let Err(WizardError::Validation(errors)) = snapshot.wizard.advance(state.settings.gating) {
                snapshot.errors = errors;
            }
        }
        Some(BookingAction::Submit) if field_errors.is_empty() => {
            submit_booking(&mut snapshot, &state).await;
        }
        Some(BookingAction::Next) | Some(BookingAction::Submit) => snapshot.errors = field_errors,
        Some(BookingAction::Previous) => {
            snapshot.wizard.retreat();
            snapshot.errors = field_errors;
        }
        Some(BookingAction::ToggleMotive(motive)) => {
            snapshot.wizard.toggle_motive(motive);
            snapshot.errors = field_errors;
        }
        Some(BookingAction::Reset) => snapshot.wizard.reset(),
        None => {
            log::warn!("Booking form posted without a recognised action");
            snapshot.errors = field_errors;
        }
    }

    if is_xhr(&req) {
        let view = PageView::build(&snapshot, &PageQuery::default(), &state.settings);
        snapshot.clear_feedback();
        if let Err(e) = store_snapshot(&session, &snapshot) {
            log::error!("Could not store booking wizard in session: {}", e);
            return HttpResponse::InternalServerError().finish();
        }
        return render_page(&req, &state, view).await;
    }

    if let Err(e) = store_snapshot(&session, &snapshot) {
        log::error!("Could not store booking wizard in session: {}", e);
        return HttpResponse::InternalServerError().finish();
    }
    HttpResponse::SeeOther()
        .append_header((header::LOCATION, "/#book"))
        .finish()
}

pub async fn health_check(state: web::Data<SiteState>) -> impl Responder {
    match state.health.send(GetSystemHealth).await {
        Ok(health) => HttpResponse::Ok().json(health),
        Err(e) => {
            log::error!("Could not retrieve system health: {}. The health check actor might be experiencing issues.", e);
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub async fn serve_asset(name: web::Path<String>) -> HttpResponse {
    match static_assets::EMBEDDED_FILES.get(name.as_str()) {
        Some(file) => HttpResponse::Ok()
            .content_type(file.content_type)
            .append_header((header::CACHE_CONTROL, "public, max-age=31536000, immutable"))
            .body(file.content),
        None => HttpResponse::NotFound().finish(),
    }
}

pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().finish()
}
