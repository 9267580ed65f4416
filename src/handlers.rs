use crate::errors::AppError;
use crate::models::{ContactForm, RequestMeta};
use crate::state::AppState;
use crate::submission;
use crate::ui::render_index;
use axum::{
    extract::{rejection::FormRejection, ConnectInfo, State},
    http::{header, HeaderMap, HeaderValue},
    response::{Html, IntoResponse, Response},
    Form, Json,
};
use std::net::SocketAddr;
use tracing::debug;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_index(&state.config))
}

pub async fn health() -> &'static str {
    "ok"
}

pub async fn submit(
    State(state): State<AppState>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    form: Result<Form<ContactForm>, FormRejection>,
) -> Response {
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            debug!("unreadable form body: {rejection}");
            ContactForm::default()
        }
    };

    let meta = request_meta(connect_info.map(|ConnectInfo(addr)| addr), &headers);
    let result = submission::process(&state, form, meta).await.map(Json);
    with_cors(result.into_response())
}

pub async fn method_not_allowed() -> Response {
    with_cors(AppError::MethodNotAllowed.into_response())
}

fn with_cors(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(header::ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static("POST"));
    headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static("Content-Type"));
    response
}

fn request_meta(addr: Option<SocketAddr>, headers: &HeaderMap) -> RequestMeta {
    let ip = addr
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string());
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let client_key = ip.clone();

    RequestMeta {
        ip,
        user_agent,
        client_key,
    }
}
