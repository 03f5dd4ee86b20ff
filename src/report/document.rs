use chrono::NaiveDateTime;

use super::{charts, chart_rows, format_percentage, leader, sort_results};
use crate::api::models::{Voter, VotingStatistics};
use crate::utils::format_long_date;
use crate::views::escape;

pub const REPORT_TITLE: &str = "Reporte de Votación AMCE";

const STYLE: &str = "body{font-family:Helvetica,Arial,sans-serif;color:#222;margin:2rem}\
h1,h2{color:#235789}h1{text-align:center}.stamp{text-align:center;color:#646464}\
table{border-collapse:collapse;width:100%;margin:1rem 0}\
th{background:#235789;color:#fff}th,td{border:1px solid #ccc;padding:.3rem .5rem;text-align:left}\
.voters td{font-size:.8rem}section{page-break-before:always}";

/// `reporte-votacion-amce-20250305-1407.html`
pub fn file_name(generated_at: NaiveDateTime) -> String {
    format!(
        "reporte-votacion-amce-{}.html",
        generated_at.format("%Y%m%d-%H%M")
    )
}

/// Standalone HTML document with the summary, both charts, the results
/// table and every voter.
pub fn render(
    statistics: &VotingStatistics,
    voters: &[Voter],
    generated_at: NaiveDateTime,
) -> String {
    let sorted = sort_results(&statistics.resultados);
    let rows = chart_rows(&sorted);
    let (leader_name, leader_pct) = match leader(&sorted) {
        Some(first) => (escape(&first.nombre), format_percentage(first.porcentaje)),
        None => ("Sin datos".to_string(), "0%".to_string()),
    };

    let mut html = String::with_capacity(16 * 1024);
    html.push_str(&format!(
        "<!DOCTYPE html><html lang=\"es\"><head><meta charset=\"utf-8\">\
         <title>{REPORT_TITLE}</title><style>{STYLE}</style></head><body>\
         <h1>{REPORT_TITLE}</h1><p class=\"stamp\">Generado el {}</p>",
        generated_at.format("%d/%m/%Y %H:%M")
    ));

    html.push_str(&format!(
        "<h2>Resumen General</h2><table><thead><tr><th>Total de Votos</th>\
         <th>Candidato Liderando</th><th>Porcentaje</th></tr></thead>\
         <tbody><tr><td>{}</td><td>{}</td><td>{}</td></tr></tbody></table>",
        statistics.total_votos, leader_name, leader_pct
    ));

    html.push_str(&format!(
        "<h2>Gráficas de Resultados</h2>{}{}",
        charts::bar_chart(&rows),
        charts::pie_chart(&rows)
    ));

    html.push_str(
        "<section><h2>Resultados por Candidato</h2><table><thead><tr>\
         <th>Candidato</th><th>Votos</th><th>Porcentaje</th></tr></thead><tbody>",
    );
    for result in &sorted {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape(&result.nombre),
            result.votos,
            format_percentage(result.porcentaje)
        ));
    }
    html.push_str("</tbody></table></section>");

    html.push_str(
        "<section><h2>Lista de Votantes</h2><table class=\"voters\"><thead><tr>\
         <th>Nombre</th><th>RFC</th><th>Candidato</th><th>Fecha de Voto</th>\
         </tr></thead><tbody>",
    );
    for voter in voters {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape(&voter.nombre_completo),
            escape(&voter.rfc),
            escape(&voter.candidato_nombre),
            escape(&format_long_date(&voter.fecha_voto))
        ));
    }
    html.push_str("</tbody></table></section></body></html>");

    html
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::api::models::CandidateResult;

    fn generated_at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 5)
            .and_then(|d| d.and_hms_opt(14, 7, 0))
            .unwrap()
    }

    fn voter(name: &str, fecha: &str) -> Voter {
        Voter {
            voto_id: "v1".into(),
            fecha_voto: fecha.into(),
            usuario_id: 1,
            nombre_completo: name.into(),
            apellido_paterno: None,
            apellido_materno: None,
            rfc: "PEJJ800101AB1".into(),
            candidato_id: 2,
            candidato_nombre: "Laura Soto".into(),
        }
    }

    #[test]
    fn file_name_is_timestamped() {
        assert_eq!(
            file_name(generated_at()),
            "reporte-votacion-amce-20250305-1407.html"
        );
    }

    #[test]
    fn report_sections() {
        let statistics = VotingStatistics {
            resultados: vec![
                CandidateResult {
                    candidato_id: 1,
                    nombre: "Pedro Ruiz".into(),
                    descripcion: None,
                    imagen_key: None,
                    votos: 1,
                    porcentaje: 33.333,
                },
                CandidateResult {
                    candidato_id: 2,
                    nombre: "Laura Soto".into(),
                    descripcion: None,
                    imagen_key: None,
                    votos: 2,
                    porcentaje: 66.667,
                },
            ],
            total_votos: 3,
        };
        let voters = [
            voter("Juan Pérez", "2025-03-05T10:15:00Z"),
            voter("Ana & Co", "sin fecha"),
        ];

        let html = render(&statistics, &voters, generated_at());
        assert!(html.contains("<h1>Reporte de Votación AMCE</h1>"));
        assert!(html.contains("Generado el 05/03/2025 14:07"));
        assert!(html.contains("<td>3</td><td>Laura Soto</td><td>66.67%</td>"));
        assert!(html.find("Laura Soto</td><td>2").unwrap() < html.find("Pedro Ruiz</td><td>1").unwrap());
        assert!(html.contains("05 de marzo de 2025 a las 10:15"));
        assert!(html.contains("<td>sin fecha</td>"));
        assert!(html.contains("Ana &amp; Co"));
        assert_eq!(html.matches("<svg").count(), 2);
    }

    #[test]
    fn empty_results_summary() {
        let statistics = VotingStatistics {
            resultados: vec![],
            total_votos: 0,
        };
        let html = render(&statistics, &[voter("Juan", "2025-03-05T10:15:00Z")], generated_at());
        assert!(html.contains("<td>0</td><td>Sin datos</td><td>0%</td>"));
    }
}
