use std::ops::Range;

use serde::Deserialize;

pub const STATISTICS_UNAVAILABLE: &str = "No se pudieron cargar las estadísticas.";
pub const VOTERS_UNAVAILABLE: &str = "No se pudo cargar la lista de votantes.";
pub const STATISTICS_LOAD_FAILED: &str =
    "Error al cargar las estadísticas. Inténtalo de nuevo.";
pub const VOTERS_LOAD_FAILED: &str = "Error al cargar la lista de votantes. Inténtalo de nuevo.";
pub const DATA_REFRESHED: &str = "Datos actualizados correctamente";
pub const NOT_ENOUGH_DATA: &str = "No hay datos suficientes para generar el reporte";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Charts,
    Voters,
}

impl Tab {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("votantes") => Tab::Voters,
            _ => Tab::Charts,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::Charts => "graficos",
            Tab::Voters => "votantes",
        }
    }
}

/// Query string of the statistics page. Every field is read leniently:
/// anything unparseable falls back to its default.
#[derive(Debug, Default, Deserialize)]
pub struct StatsQuery {
    pub pagina: Option<String>,
    pub pestana: Option<String>,
    pub actualizar: Option<String>,
}

impl StatsQuery {
    pub fn page(&self) -> usize {
        self.pagina
            .as_deref()
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(1)
    }

    pub fn tab(&self) -> Tab {
        Tab::parse(self.pestana.as_deref())
    }

    pub fn refresh(&self) -> bool {
        matches!(self.actualizar.as_deref(), Some("1" | "true"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    Page { number: usize, current: bool },
    Ellipsis,
}

/// One page of the voter table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub total_pages: usize,
    start: usize,
    end: usize,
}

impl Pagination {
    /// Clamps `requested` into the available pages; page 1 when there is
    /// nothing to show.
    pub fn new(total: usize, page_size: usize, requested: usize) -> Self {
        let page_size = page_size.max(1);
        let total_pages = total.div_ceil(page_size);
        let page = requested.clamp(1, total_pages.max(1));
        let start = ((page - 1) * page_size).min(total);
        let end = (start + page_size).min(total);

        Self {
            page,
            total_pages,
            start,
            end,
        }
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// The numbered strip: first page, gap, neighbours, gap, last page.
    pub fn links(&self) -> Vec<PageLink> {
        let (current, total) = (self.page, self.total_pages);
        if total == 0 {
            return Vec::new();
        }

        let mut links = Vec::with_capacity(7);
        if current > 3 {
            links.push(PageLink::Page {
                number: 1,
                current: false,
            });
        }
        if current > 4 {
            links.push(PageLink::Ellipsis);
        }
        if current > 1 {
            links.push(PageLink::Page {
                number: current - 1,
                current: false,
            });
        }
        links.push(PageLink::Page {
            number: current,
            current: true,
        });
        if current < total {
            links.push(PageLink::Page {
                number: current + 1,
                current: false,
            });
        }
        if current + 3 < total {
            links.push(PageLink::Ellipsis);
        }
        if current + 2 < total && total > 1 {
            links.push(PageLink::Page {
                number: total,
                current: false,
            });
        }
        links
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(links: &[PageLink]) -> Vec<String> {
        links
            .iter()
            .map(|link| match link {
                PageLink::Page { number, current: true } => format!("[{}]", number),
                PageLink::Page { number, .. } => number.to_string(),
                PageLink::Ellipsis => "…".to_string(),
            })
            .collect()
    }

    #[test]
    fn twenty_three_voters_in_pages_of_ten() {
        let first = Pagination::new(23, 10, 1);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.range(), 0..10);
        assert!(!first.has_previous());
        assert!(first.has_next());

        let last = Pagination::new(23, 10, 3);
        assert_eq!(last.range(), 20..23);
        assert!(last.has_previous());
        assert!(!last.has_next());
    }

    #[test]
    fn out_of_range_pages_are_clamped() {
        assert_eq!(Pagination::new(23, 10, 0).page, 1);
        assert_eq!(Pagination::new(23, 10, 99).range(), 20..23);

        let empty = Pagination::new(0, 10, 4);
        assert_eq!(empty.page, 1);
        assert_eq!(empty.range(), 0..0);
        assert!(!empty.has_next());
        assert!(empty.links().is_empty());
    }

    #[test]
    fn page_link_strip() {
        assert_eq!(numbers(&Pagination::new(23, 10, 1).links()), ["[1]", "2"]);
        assert_eq!(numbers(&Pagination::new(23, 10, 3).links()), ["2", "[3]"]);
        assert_eq!(
            numbers(&Pagination::new(100, 10, 1).links()),
            ["[1]", "2", "…", "10"]
        );
        assert_eq!(
            numbers(&Pagination::new(100, 10, 5).links()),
            ["1", "…", "4", "[5]", "6", "…", "10"]
        );
        assert_eq!(
            numbers(&Pagination::new(100, 10, 4).links()),
            ["1", "3", "[4]", "5", "…", "10"]
        );
        assert_eq!(
            numbers(&Pagination::new(100, 10, 10).links()),
            ["1", "…", "9", "[10]"]
        );
        assert_eq!(numbers(&Pagination::new(5, 10, 1).links()), ["[1]"]);
    }

    #[test]
    fn lenient_query() {
        let query = StatsQuery {
            pagina: Some("x".into()),
            pestana: Some("votantes".into()),
            actualizar: Some("1".into()),
        };
        assert_eq!(query.page(), 1);
        assert_eq!(query.tab(), Tab::Voters);
        assert!(query.refresh());

        let query = StatsQuery::default();
        assert_eq!(query.tab(), Tab::Charts);
        assert!(!query.refresh());
    }
}
