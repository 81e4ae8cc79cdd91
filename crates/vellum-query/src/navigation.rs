//! Site menu ordering.

use std::cmp::Ordering;

use vellum_core::Status;

use crate::types::Page;

/// Whether a page belongs in the site menu.
pub fn in_nav(page: &Page) -> bool {
    page.show_in_nav && page.status == Status::Published
}

/// Ascending by order, unordered last.
fn compare_nav_order(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Keep menu pages and order them by `nav_order`.
///
/// The sort is stable, so pages with equal (or no) order keep their input
/// order.
pub fn nav_pages(pages: impl IntoIterator<Item = Page>) -> Vec<Page> {
    let mut pages: Vec<Page> = pages.into_iter().filter(in_nav).collect();
    pages.sort_by(|a, b| compare_nav_order(a.nav_order, b.nav_order));
    pages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PageTemplate, SeoMeta};

    fn page(slug: &str, show: bool, order: Option<f64>, status: Status) -> Page {
        Page {
            id: slug.to_string(),
            title: slug.to_string(),
            slug: slug.to_string(),
            content: None,
            excerpt: None,
            featured_image: None,
            seo: SeoMeta::default(),
            template: PageTemplate::Default,
            show_in_nav: show,
            nav_order: order,
            status,
        }
    }

    fn slugs(pages: &[Page]) -> Vec<&str> {
        pages.iter().map(|p| p.slug.as_str()).collect()
    }

    #[test]
    fn test_filters_hidden_and_drafts() {
        let pages = vec![
            page("shown", true, Some(1.0), Status::Published),
            page("hidden", false, Some(0.0), Status::Published),
            page("draft", true, Some(0.0), Status::Draft),
        ];
        assert_eq!(slugs(&nav_pages(pages)), vec!["shown"]);
    }

    #[test]
    fn test_orders_ascending_with_unordered_last() {
        let pages = vec![
            page("none-a", true, None, Status::Published),
            page("third", true, Some(3.0), Status::Published),
            page("first", true, Some(-1.0), Status::Published),
            page("none-b", true, None, Status::Published),
            page("second", true, Some(2.5), Status::Published),
        ];
        assert_eq!(
            slugs(&nav_pages(pages)),
            vec!["first", "second", "third", "none-a", "none-b"]
        );
    }

    #[test]
    fn test_ties_keep_input_order() {
        let pages = vec![
            page("b", true, Some(1.0), Status::Published),
            page("a", true, Some(1.0), Status::Published),
        ];
        assert_eq!(slugs(&nav_pages(pages)), vec!["b", "a"]);
    }

    #[test]
    fn test_empty() {
        assert!(nav_pages(Vec::new()).is_empty());
    }
}
