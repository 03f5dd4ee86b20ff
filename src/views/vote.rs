use super::{escape, layout};
use crate::api::models::{Candidate, User};
use crate::notify::Notice;
use crate::routes::vote::Ballot;

pub fn page(user: Option<&User>, notices: &[Notice], ballot: &Ballot) -> String {
    let mut body = String::from("<h1>Votación AMCE</h1>");

    match ballot {
        Ballot::Voted {
            candidate,
            voted_ago,
        } => {
            let when = match voted_ago {
                Some(ago) => format!("Has votado {}.", escape(ago)),
                None => "Tu voto ha sido procesado correctamente.".to_string(),
            };
            body.push_str(&format!(
                "<section class=\"confirmation\"><h2>¡Tu voto ha sido registrado!</h2><p>{}</p></section>",
                when
            ));
            if let Some(candidate) = candidate {
                body.push_str("<section class=\"card\"><h2>Candidato elegido</h2>");
                candidate_details(&mut body, candidate);
                body.push_str("</section>");
            }
        }
        Ballot::Open { candidates } => {
            body.push_str(
                "<h2>Selecciona un candidato para votar</h2>\
                 <form method=\"post\" action=\"/votar\"><div class=\"grid\">",
            );
            for candidate in candidates {
                body.push_str(&format!(
                    "<label class=\"card candidate\"><input type=\"radio\" name=\"candidato_id\" value=\"{}\">",
                    candidate.id
                ));
                candidate_details(&mut body, candidate);
                body.push_str("</label>");
            }
            body.push_str(
                "</div><button type=\"submit\" class=\"wide\">Confirmar voto</button></form>",
            );
        }
        Ballot::Unavailable => {
            body.push_str("<p class=\"muted\">No fue posible cargar la boleta.</p>");
        }
    }

    layout("Votar", user, notices, &body)
}

fn candidate_details(body: &mut String, candidate: &Candidate) {
    if let Some(image) = candidate.imagen_key.as_deref().filter(|key| !key.is_empty()) {
        body.push_str(&format!(
            "<img src=\"{}\" alt=\"{}\" width=\"240\" height=\"320\">",
            escape(image),
            escape(&candidate.nombre)
        ));
    }
    body.push_str(&format!("<h3>{}</h3>", escape(&candidate.nombre)));
    if let Some(descripcion) = &candidate.descripcion {
        body.push_str(&format!("<p class=\"muted\">{}</p>", escape(descripcion)));
    }
    if let Some(propuesta) = &candidate.propuesta {
        body.push_str(&format!(
            "<h4>Propuesta:</h4><p class=\"proposal\">{}</p>",
            escape(propuesta)
        ));
    }
}
