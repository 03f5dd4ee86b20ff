//! Server-rendered HTML pages.

pub mod denied;
pub mod login;
pub mod stats;
pub mod vote;

use axum::http::StatusCode;

use crate::api::models::User;
use crate::notify::Notice;

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wraps `body` in the shared chrome: header with the signed-in member and
/// a logout button, then the pending notices.
pub fn layout(title: &str, user: Option<&User>, notices: &[Notice], body: &str) -> String {
    let mut html = String::with_capacity(body.len() + 1024);
    html.push_str(&format!(
        "<!DOCTYPE html><html lang=\"es\"><head><meta charset=\"utf-8\">\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
         <title>{} | Votación AMCE</title>\
         <link rel=\"stylesheet\" href=\"/static/styles.css\"></head><body>",
        escape(title)
    ));

    if let Some(user) = user {
        html.push_str(&format!(
            "<header class=\"topbar\"><div><strong>{}</strong> <span class=\"muted\">{}</span></div>\
             <form method=\"post\" action=\"/logout\"><button type=\"submit\">Cerrar sesión</button></form>\
             </header>",
            escape(&user.nombre),
            escape(&user.membresia_nombre)
        ));
    }

    html.push_str("<main>");
    for notice in notices {
        html.push_str(&format!(
            "<div class=\"notice notice-{}\" role=\"status\">{}</div>",
            notice.level.as_str(),
            escape(&notice.text)
        ));
    }
    html.push_str(body);
    html.push_str("</main></body></html>");
    html
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    let body = format!(
        "<section class=\"card\"><h1>Error {}</h1><p>{}</p><p><a href=\"/\">Volver al inicio</a></p></section>",
        status.as_u16(),
        escape(message)
    );
    layout("Error", None, &[], &body)
}
