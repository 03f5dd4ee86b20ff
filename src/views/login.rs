use super::{escape, layout};
use crate::notify::Notice;

pub fn page(notices: &[Notice], rfc: &str, error: Option<&str>) -> String {
    let error = error
        .map(|message| format!("<p class=\"field-error\">{}</p>", escape(message)))
        .unwrap_or_default();

    let body = format!(
        "<section class=\"card narrow\">\
         <h1>AMCE Votaciones</h1>\
         <p class=\"muted\">Ingresa tu RFC para votar</p>\
         <form method=\"post\" action=\"/\">\
         <label for=\"rfc\">RFC</label>\
         <input id=\"rfc\" name=\"rfc\" value=\"{}\" autocomplete=\"off\" autofocus>\
         {}\
         <button type=\"submit\">Iniciar sesión</button>\
         </form></section>",
        escape(rfc),
        error
    );

    layout("Iniciar sesión", None, notices, &body)
}
