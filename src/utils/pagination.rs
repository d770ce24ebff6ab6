// Pagination par numéro de page (?page=N&page_size=M)
//
// Réponse: { "count", "next", "previous", "results" }
//   - standard : 100 par page, max 1000
//   - large    : 1000 par page, max 10000
// Un page_size au-dessus du max est ramené au max ; un page_size invalide
// (non numérique ou 0) retombe sur la valeur par défaut.
// Une page hors limites (ou non numérique) donne un 404 "Invalid page.".

use sea_orm::{DatabaseConnection, EntityTrait, FromQueryResult, PaginatorTrait, Select};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pagination {
    pub page_size: u64,
    pub max_page_size: u64,
}

pub const STANDARD: Pagination = Pagination { page_size: 100, max_page_size: 1000 };
pub const LARGE: Pagination = Pagination { page_size: 1000, max_page_size: 10000 };

const PAGE_PARAM: &str = "page";

#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<String>,
    pub page_size: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl Pagination {
    pub fn page_size(&self, requested: Option<&str>) -> u64 {
        match requested.and_then(|raw| raw.trim().parse::<u64>().ok()) {
            Some(size) if size > 0 => size.min(self.max_page_size),
            _ => self.page_size,
        }
    }
}

fn invalid_page() -> AppError {
    AppError::NotFound("Invalid page.".to_string())
}

/// Numéro de page demandé (1 par défaut)
pub fn page_number(requested: Option<&str>) -> Result<u64, AppError> {
    match requested {
        None => Ok(1),
        Some(raw) => match raw.trim().parse::<u64>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(invalid_page()),
        },
    }
}

/// Lien vers une autre page en conservant les autres paramètres de la query.
/// La page 1 est représentée sans paramètre "page".
pub fn page_link(path: &str, query: &str, page: u64) -> String {
    let mut params: Vec<String> = query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter(|pair| pair.split('=').next() != Some(PAGE_PARAM))
        .map(str::to_string)
        .collect();

    if page > 1 {
        params.push(format!("{}={}", PAGE_PARAM, page));
    }

    if params.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, params.join("&"))
    }
}

/// Exécute la requête pour une page donnée
pub async fn paginate<E>(
    db: &DatabaseConnection,
    select: Select<E>,
    pagination: Pagination,
    params: &PageParams,
    path: &str,
    query: &str,
) -> Result<Page<E::Model>, AppError>
where
    E: EntityTrait,
    E::Model: FromQueryResult + Send + Sync,
{
    let page_size = pagination.page_size(params.page_size.as_deref());
    let page = page_number(params.page.as_deref())?;

    let paginator = select.paginate(db, page_size);
    let count = paginator.num_items().await?;
    let num_pages = count.div_ceil(page_size).max(1);

    if page > num_pages {
        return Err(invalid_page());
    }

    let results = paginator.fetch_page(page - 1).await?;

    Ok(Page {
        count,
        next: (page < num_pages).then(|| page_link(path, query, page + 1)),
        previous: (page > 1).then(|| page_link(path, query, page - 1)),
        results,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_size_default_and_cap() {
        assert_eq!(STANDARD.page_size(None), 100);
        assert_eq!(STANDARD.page_size(Some("25")), 25);
        assert_eq!(STANDARD.page_size(Some("5000")), 1000);
        assert_eq!(LARGE.page_size(None), 1000);
        assert_eq!(LARGE.page_size(Some("50000")), 10000);
    }

    #[test]
    fn test_invalid_page_size_falls_back() {
        assert_eq!(STANDARD.page_size(Some("0")), 100);
        assert_eq!(STANDARD.page_size(Some("abc")), 100);
        assert_eq!(STANDARD.page_size(Some("-3")), 100);
    }

    #[test]
    fn test_page_number() {
        assert_eq!(page_number(None).unwrap(), 1);
        assert_eq!(page_number(Some("3")).unwrap(), 3);
        assert!(page_number(Some("0")).is_err());
        assert!(page_number(Some("last")).is_err());
    }

    #[test]
    fn test_page_link_keeps_filters() {
        assert_eq!(
            page_link("/api/stocks", "ticker_symbol=AAPL&page=2&page_size=10", 3),
            "/api/stocks?ticker_symbol=AAPL&page_size=10&page=3"
        );
        assert_eq!(page_link("/api/stocks", "page=2", 1), "/api/stocks");
        assert_eq!(page_link("/api/trades", "", 2), "/api/trades?page=2");
    }
}
