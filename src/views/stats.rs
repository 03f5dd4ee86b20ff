use super::{escape, layout};
use crate::api::models::{User, Voter, VotingStatistics};
use crate::notify::Notice;
use crate::report::{self, charts};
use crate::routes::stats::{
    PageLink, Pagination, STATISTICS_UNAVAILABLE, Tab, VOTERS_UNAVAILABLE,
};
use crate::utils::format_long_date;

const PATH: &str = "/admin/estadisticas";

pub struct Dashboard<'a> {
    pub statistics: Option<&'a VotingStatistics>,
    pub voters: Option<&'a [Voter]>,
    pub pagination: Pagination,
    pub tab: Tab,
}

pub fn page(user: Option<&User>, notices: &[Notice], dashboard: &Dashboard<'_>) -> String {
    let mut body = String::with_capacity(8 * 1024);
    body.push_str(&format!(
        "<div class=\"toolbar\"><h1>Estadísticas de Votación</h1><div>\
         <a class=\"button secondary\" href=\"{PATH}/reporte\">Descargar Reporte</a> \
         <a class=\"button\" href=\"{PATH}?actualizar=1&amp;pestana={tab}\">Actualizar datos</a>\
         </div></div>",
        tab = dashboard.tab.as_str()
    ));

    body.push_str(&format!(
        "<nav class=\"tabs\"><a href=\"{PATH}?pestana=graficos\"{}>Estadísticas</a>\
         <a href=\"{PATH}?pestana=votantes\"{}>Votantes</a></nav>",
        active(dashboard.tab == Tab::Charts),
        active(dashboard.tab == Tab::Voters)
    ));

    match dashboard.tab {
        Tab::Charts => charts_tab(&mut body, dashboard.statistics),
        Tab::Voters => voters_tab(&mut body, dashboard.voters, &dashboard.pagination),
    }

    layout("Estadísticas", user, notices, &body)
}

fn active(is_active: bool) -> &'static str {
    if is_active { " class=\"active\"" } else { "" }
}

fn charts_tab(body: &mut String, statistics: Option<&VotingStatistics>) {
    let Some(statistics) = statistics else {
        body.push_str(&format!("<p class=\"muted\">{}</p>", STATISTICS_UNAVAILABLE));
        return;
    };

    let sorted = report::sort_results(&statistics.resultados);
    let rows = report::chart_rows(&sorted);
    let (leader, share) = match report::leader(&sorted) {
        Some(first) => (escape(&first.nombre), report::format_percentage(first.porcentaje)),
        None => ("Sin datos".to_string(), "0%".to_string()),
    };

    body.push_str(&format!(
        "<div class=\"grid\"><section class=\"card\"><h3>Total de Votos</h3><p class=\"big\">{}</p></section>\
         <section class=\"card\"><h3>Candidato Liderando</h3><p class=\"big\">{}</p><p class=\"muted\">{}</p></section></div>",
        statistics.total_votos, leader, share
    ));
    body.push_str(&format!(
        "<div class=\"grid\"><section class=\"card\"><h3>Resultados por Candidato</h3>{}</section>\
         <section class=\"card\"><h3>Distribuciones de Votos</h3>{}</section></div>",
        charts::bar_chart(&rows),
        charts::pie_chart(&rows)
    ));

    body.push_str(
        "<section class=\"card\"><h3>Detalle de Resultados</h3><table><thead><tr>\
         <th>Candidato</th><th>Votos</th><th>Porcentaje</th><th>Gráfico</th></tr></thead><tbody>",
    );
    for (i, row) in rows.iter().enumerate() {
        body.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td><div class=\"meter\">\
             <span style=\"width:{:.2}%;background:{}\"></span></div></td></tr>",
            escape(&row.full_name),
            row.votes,
            report::format_percentage(row.percentage),
            row.percentage.clamp(0.0, 100.0),
            charts::color(i)
        ));
    }
    body.push_str("</tbody></table></section>");
}

fn voters_tab(body: &mut String, voters: Option<&[Voter]>, pagination: &Pagination) {
    let Some(voters) = voters else {
        body.push_str(&format!("<p class=\"muted\">{}</p>", VOTERS_UNAVAILABLE));
        return;
    };

    body.push_str(
        "<section class=\"card\"><h3>Lista de Votantes</h3><table><thead><tr>\
         <th>Nombre</th><th>RFC</th><th>Candidato Votado</th><th>Fecha de voto</th>\
         </tr></thead><tbody>",
    );
    let range = pagination.range();
    for voter in voters.get(range.clone()).unwrap_or_default() {
        body.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td class=\"nowrap\">{}</td></tr>",
            escape(&voter.nombre_completo),
            escape(&voter.rfc),
            escape(&voter.candidato_nombre),
            escape(&format_long_date(&voter.fecha_voto))
        ));
    }
    body.push_str("</tbody></table>");

    pager(body, pagination);
    if !voters.is_empty() {
        body.push_str(&format!(
            "<p class=\"muted center\">Mostrando {}-{} de {} registros</p>",
            range.start + 1,
            range.end,
            voters.len()
        ));
    }
    body.push_str("</section>");
}

fn pager(body: &mut String, pagination: &Pagination) {
    let links = pagination.links();
    if links.is_empty() {
        return;
    }

    let href = |number: usize| format!("{PATH}?pestana=votantes&amp;pagina={}", number);
    body.push_str("<nav class=\"pager\">");
    if pagination.has_previous() {
        body.push_str(&format!("<a href=\"{}\">Anterior</a>", href(pagination.page - 1)));
    }
    for link in links {
        match link {
            PageLink::Page {
                number,
                current: true,
            } => {
                body.push_str(&format!("<span class=\"current\">{}</span>", number));
            }
            PageLink::Page { number, .. } => {
                body.push_str(&format!("<a href=\"{}\">{}</a>", href(number), number));
            }
            PageLink::Ellipsis => body.push_str("<span>…</span>"),
        }
    }
    if pagination.has_next() {
        body.push_str(&format!("<a href=\"{}\">Siguiente</a>", href(pagination.page + 1)));
    }
    body.push_str("</nav>");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voter(n: usize) -> Voter {
        Voter {
            voto_id: format!("v{}", n),
            fecha_voto: "2025-03-05T10:15:00Z".into(),
            usuario_id: n as i64,
            nombre_completo: format!("Votante {:02}", n),
            apellido_paterno: None,
            apellido_materno: None,
            rfc: format!("RFC{:02}", n),
            candidato_id: 1,
            candidato_nombre: "Laura Soto".into(),
        }
    }

    #[test]
    fn voter_page_shows_only_its_slice() {
        let voters: Vec<_> = (1..=23).map(voter).collect();
        let dashboard = Dashboard {
            statistics: None,
            voters: Some(&voters),
            pagination: Pagination::new(voters.len(), 10, 3),
            tab: Tab::Voters,
        };
        let html = page(None, &[], &dashboard);
        assert!(html.contains("Votante 21"));
        assert!(html.contains("Votante 23"));
        assert!(!html.contains("Votante 20"));
        assert!(html.contains("Mostrando 21-23 de 23 registros"));
        assert!(html.contains("Anterior"));
        assert!(!html.contains("Siguiente"));
    }

    #[test]
    fn failed_sections_degrade_independently() {
        let voters = vec![voter(1)];
        let dashboard = Dashboard {
            statistics: None,
            voters: Some(&voters),
            pagination: Pagination::new(1, 10, 1),
            tab: Tab::Charts,
        };
        assert!(page(None, &[], &dashboard).contains(STATISTICS_UNAVAILABLE));

        let dashboard = Dashboard {
            voters: None,
            tab: Tab::Voters,
            ..dashboard
        };
        assert!(page(None, &[], &dashboard).contains(VOTERS_UNAVAILABLE));
    }
}
