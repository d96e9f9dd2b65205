//! Benchmarks for navigation building.

use std::path::Path;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use folio_config::{ContentKind, SiteConfig};
use folio_content::{Document, DocumentRef};
use folio_nav::NavigationBuilder;

const CONFIG: &str = "base_url = \"/\"\n[[locales]]\ntag = \"en\"\ndefault = true\n";

/// Create documents for a folder tree with the given depth and breadth.
fn create_documents(depth: usize, breadth: usize) -> Vec<Document> {
    fn create_level(prefix: &str, current_depth: usize, max_depth: usize, breadth: usize, out: &mut Vec<String>) {
        if current_depth > max_depth {
            return;
        }
        out.push(format!("{prefix}index.md"));
        for i in 0..breadth {
            out.push(format!("{prefix}page-{i}.md"));
            create_level(&format!("{prefix}section-{i}/"), current_depth + 1, max_depth, breadth, out);
        }
    }

    let config = SiteConfig::parse(CONFIG, Path::new("/site")).unwrap();
    let content = config.content(ContentKind::Docs).unwrap();
    let locale = config.default_locale();
    let root = config.content_root(content, locale);

    let mut paths = Vec::new();
    create_level("", 0, depth, breadth, &mut paths);
    paths
        .iter()
        .enumerate()
        .map(|(i, rel)| {
            let raw = if i % 3 == 0 {
                format!("---\nsidebar_position: {}\n---\n# Page {i}\n", i % 7)
            } else {
                format!("# Page {i}\n")
            };
            let doc_ref = DocumentRef {
                rel_path: rel.clone(),
                abs_path: root.join(rel),
            };
            Document::from_source(&config, content, locale, &root, &doc_ref, raw).unwrap()
        })
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("navigation_build");

    for (depth, breadth) in [(2, 5), (3, 5), (4, 4)] {
        let documents = create_documents(depth, breadth);
        group.bench_with_input(
            BenchmarkId::new("documents", documents.len()),
            &documents,
            |b, documents| b.iter(|| NavigationBuilder::new("en").build(documents)),
        );
    }

    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let documents = create_documents(4, 3);
    let navigation = NavigationBuilder::new("en").build(&documents);
    let deepest = documents
        .iter()
        .max_by_key(|d| d.id.path.matches('/').count())
        .unwrap();

    let mut group = c.benchmark_group("navigation_lookup");

    group.bench_function("breadcrumbs", |b| b.iter(|| navigation.breadcrumbs(&deepest.id)));
    group.bench_function("pagination", |b| b.iter(|| navigation.pagination(&deepest.id)));

    group.finish();
}

criterion_group!(benches, bench_build, bench_lookup);
criterion_main!(benches);
