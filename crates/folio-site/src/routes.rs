//! Site routes shared by the assembler and the link checker.

use std::collections::BTreeSet;

use folio_config::{ContentConfig, ContentKind, Locale, SiteConfig};
use folio_content::{Document, slugify};

/// URL of a route under a locale: `<locale prefix><segments>`.
pub(crate) fn route_url(config: &SiteConfig, locale: &Locale, segments: &[&str]) -> String {
    let segments: Vec<&str> = segments
        .iter()
        .flat_map(|s| s.split('/'))
        .filter(|s| !s.is_empty())
        .collect();
    let mut url = config.locale_prefix(locale);
    if segments.is_empty() {
        return url;
    }
    url.push_str(&segments.join("/"));
    if config.trailing_slash {
        url.push('/');
    }
    url
}

/// Blog index page.
pub(crate) fn blog_index_url(config: &SiteConfig, locale: &Locale, blog: &ContentConfig) -> String {
    route_url(config, locale, &[&blog.route_base])
}

/// Page listing posts with one tag.
pub(crate) fn tag_url(config: &SiteConfig, locale: &Locale, blog: &ContentConfig, tag: &str) -> String {
    route_url(config, locale, &[&blog.route_base, "tags", &slugify(tag)])
}

/// Route without its trailing slash, for comparisons.
pub(crate) fn normalize(route: &str) -> &str {
    route.trim_end_matches('/')
}

/// Every route a locale serves, normalized.
pub(crate) fn known_routes(config: &SiteConfig, locale: &Locale, documents: &[Document]) -> BTreeSet<String> {
    let mut routes = BTreeSet::new();
    routes.insert(normalize(&config.locale_prefix(locale)).to_owned());

    for document in documents {
        routes.insert(normalize(&document.permalink).to_owned());
    }

    if let Some(blog) = config.content(ContentKind::Blog) {
        routes.insert(normalize(&blog_index_url(config, locale, blog)).to_owned());
        routes.insert(normalize(&route_url(config, locale, &[&blog.route_base, "tags"])).to_owned());
        for tag in documents
            .iter()
            .filter(|d| d.id.kind == ContentKind::Blog)
            .flat_map(|d| &d.front_matter.tags)
        {
            routes.insert(normalize(&tag_url(config, locale, blog, tag)).to_owned());
        }
    }
    routes
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use pretty_assertions::assert_eq;

    use super::*;

    fn config(extra: &str) -> SiteConfig {
        let toml = format!(
            "base_url = \"/\"\n{extra}\n[[locales]]\ntag = \"en\"\ndefault = true\n\n[[locales]]\ntag = \"de\"\n\n[blog]\n"
        );
        SiteConfig::parse(&toml, Path::new("/site")).unwrap()
    }

    #[test]
    fn test_route_url() {
        let config = config("");
        let de = config.locale("de").unwrap();
        assert_eq!(route_url(&config, de, &["blog", "tags", "rust"]), "/de/blog/tags/rust");
        assert_eq!(route_url(&config, de, &[""]), "/de/");
        assert_eq!(route_url(&config, config.default_locale(), &["/blog/"]), "/blog");
    }

    #[test]
    fn test_route_url_trailing_slash() {
        let config = config("trailing_slash = true");
        let blog = config.content(ContentKind::Blog).unwrap();
        assert_eq!(tag_url(&config, config.default_locale(), blog, "Web Dev"), "/blog/tags/web-dev/");
    }

    #[test]
    fn test_known_routes_include_blog_pages() {
        let config = config("");
        let routes = known_routes(&config, config.default_locale(), &[]);
        assert!(routes.contains(""));
        assert!(routes.contains("/blog"));
        assert!(routes.contains("/blog/tags"));
    }
}
