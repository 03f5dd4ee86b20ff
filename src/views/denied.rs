use super::layout;

pub fn page() -> String {
    layout(
        "Acceso denegado",
        None,
        &[],
        "<section class=\"card narrow\"><h1>Acceso Denegado</h1>\
         <p>Lo sentimos, no tienes permiso para acceder a esta aplicación desde tu dirección IP actual.</p>\
         <p class=\"muted\">Si crees que esto es un error, por favor contacta al administrador.</p>\
         <p><a class=\"button secondary\" href=\"/\">Volver al inicio</a></p>\
         </section>",
    )
}
