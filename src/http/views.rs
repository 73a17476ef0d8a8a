//! Page templates for the two lists.
//!
//! Templates live in `templates/` and are checked at compile time. Item
//! text is HTML-escaped by the engine; missing items render as `None`.

use askama::Template;

use crate::items::Item;

#[derive(Template)]
#[template(path = "shared.html")]
pub struct SharedPage<'a> {
    pub items: &'a [Item],
}

#[derive(Template)]
#[template(path = "session.html")]
pub struct SessionPage<'a> {
    pub items: &'a [Item],
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(html: &str) -> Vec<&str> {
        html.lines()
            .map(str::trim)
            .filter_map(|l| l.strip_prefix("<li>")?.strip_suffix("</li>"))
            .collect()
    }

    #[test]
    fn test_items_render_in_order() {
        let items = [Item::new("apple"), Item::new("banana")];
        let html = SharedPage { items: &items }.render().unwrap();
        assert_eq!(entries(&html), ["apple", "banana"]);
        assert!(html.contains("action=\"/\""));
        assert!(html.contains("href=\"/session\""));
    }

    #[test]
    fn test_empty_list_has_no_entries() {
        let html = SessionPage { items: &[] }.render().unwrap();
        assert!(entries(&html).is_empty());
        assert!(html.contains("action=\"/session\""));
        assert!(html.contains("name=\"item\""));
    }

    #[test]
    fn test_missing_and_empty_items() {
        let items = [Item::missing(), Item::new("")];
        let html = SharedPage { items: &items }.render().unwrap();
        assert_eq!(entries(&html), ["None", ""]);
    }

    #[test]
    fn test_markup_is_escaped() {
        let items = [Item::new("<script>x & y</script>")];
        let html = SessionPage { items: &items }.render().unwrap();
        assert_eq!(entries(&html), ["&lt;script&gt;x &amp; y&lt;/script&gt;"]);
        assert!(!html.contains("<script>"));
    }
}
