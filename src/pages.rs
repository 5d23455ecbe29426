//! HTML rendering. Nothing outside this module produces user-facing text.
//!
//! Pages are Tera templates embedded at compile time. Templates registered
//! with an `.html` name are autoescaped, so user-supplied values can be
//! inserted into the context as-is.

use axum::{
    http::{
        header::{LOCATION, SET_COOKIE},
        HeaderValue, StatusCode,
    },
    response::{Html, IntoResponse, Response},
};
use std::sync::LazyLock;
use tera::{Context, Tera};
use tracing::error;

use crate::session::Identity;

const TPL_HOME: &str = include_str!("templates/home.html");
const TPL_SIGNUP: &str = include_str!("templates/signup.html");
const TPL_LOGIN: &str = include_str!("templates/login.html");
const TPL_FORM_ERROR: &str = include_str!("templates/form_error.html");
const TPL_MEMBERS: &str = include_str!("templates/members.html");
const TPL_ERROR: &str = include_str!("templates/error.html");
const TPL_NOT_FOUND: &str = include_str!("templates/not_found.html");

static TEMPLATES: LazyLock<tera::Result<Tera>> = LazyLock::new(load_templates);

fn load_templates() -> tera::Result<Tera> {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        ("home.html", TPL_HOME),
        ("signup.html", TPL_SIGNUP),
        ("login.html", TPL_LOGIN),
        ("form_error.html", TPL_FORM_ERROR),
        ("members.html", TPL_MEMBERS),
        ("error.html", TPL_ERROR),
        ("not_found.html", TPL_NOT_FOUND),
    ])?;
    Ok(tera)
}

fn render_template(name: &str, context: &Context) -> Response {
    let rendered = match &*TEMPLATES {
        Ok(tera) => tera.render(name, context),
        Err(err) => Err(tera::Error::msg(format!("templates failed to load: {err}"))),
    };

    match rendered {
        Ok(html) => Html(html).into_response(),
        Err(err) => {
            error!(template = name, error = %err, "Template error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html("<h1>Something went wrong</h1>"),
            )
                .into_response()
        }
    }
}

/// `302 Found` redirect
pub fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(LOCATION, location)]).into_response()
}

/// `302 Found` redirect that also sets a cookie
pub fn found_with_cookie(location: &str, cookie: HeaderValue) -> Response {
    let mut response = found(location);
    response.headers_mut().insert(SET_COOKIE, cookie);
    response
}

pub fn home_page(identity: Option<&Identity>) -> Response {
    let mut context = Context::new();
    context.insert("signed_in", &identity.is_some());
    context.insert("name", identity.map(|i| i.name.as_str()).unwrap_or_default());
    render_template("home.html", &context)
}

pub fn signup_form() -> Response {
    render_template("signup.html", &Context::new())
}

pub fn login_form() -> Response {
    render_template("login.html", &Context::new())
}

/// Inline form failure with a link back to the form
pub fn form_error(message: &str, retry_path: &str) -> Response {
    let mut context = Context::new();
    context.insert("message", message);
    context.insert("retry_path", retry_path);
    render_template("form_error.html", &context)
}

pub fn members_page(identity: &Identity, image: &str) -> Response {
    let mut context = Context::new();
    context.insert("name", &identity.name);
    context.insert("image", image);
    render_template("members.html", &context)
}

pub fn error_page(message: &str) -> Response {
    let mut context = Context::new();
    context.insert("message", message);
    render_template("error.html", &context)
}

pub fn not_found_page() -> Response {
    render_template("not_found.html", &Context::new())
}
