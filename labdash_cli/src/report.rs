// Copyright 2025 the Labdash Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A static HTML dashboard: one card per analysis of an entity.

use core::fmt::Write as _;

use labdash_cache::{
    AnalysisController, CacheError, CacheRegistry, Entity, SeriesKind, SeriesSource, Status,
    format_time,
};
use labdash_scene::Rendered;

const STYLE: &str = "body{font-family:sans-serif;margin:2em;color:#222}\
.card{border:1px solid #ddd;border-radius:4px;padding:1em;margin-bottom:1.5em}\
.card h2{margin:0 0 .25em 0;font-size:1.1em}\
.updated{color:#777;font-size:.85em;margin:0 0 .5em 0}\
.insights li.warning{color:#b35900}\
.empty{color:#999;font-style:italic}";

/// One rendered card.
#[derive(Clone, Debug)]
pub(crate) struct Card {
    pub(crate) kind: SeriesKind,
    pub(crate) updated: Option<String>,
    pub(crate) insights: Vec<(String, String)>,
    pub(crate) rendered: Rendered,
}

/// Loads and renders every analysis of `entity`. Analyses the source has no data for are
/// skipped.
pub(crate) async fn collect_cards<S: SeriesSource>(
    registry: &CacheRegistry<S>,
    entity: Entity,
    uuid: &str,
    width: f64,
    now: f64,
) -> Result<Vec<Card>, CacheError> {
    let mut cards = Vec::new();
    for kind in SeriesKind::for_entity(entity) {
        let mut controller: AnalysisController<S> =
            registry.controller(kind, uuid).with_chart_id(kind.name);
        match controller.load().await {
            Ok(()) => {}
            Err(CacheError::NotFound { .. }) => {
                log::info!("no {kind} analysis for {uuid}, skipping");
                continue;
            }
            Err(e) => return Err(e),
        }
        cards.push(Card {
            kind,
            updated: controller.last_updated_label(now),
            insights: controller
                .insights()
                .iter()
                .map(|i| (i.kind.clone(), i.message.clone()))
                .collect(),
            rendered: controller.render(width),
        });
    }
    Ok(cards)
}

/// Assembles the page.
pub(crate) fn render_html(entity: Entity, uuid: &str, status: Status, cards: &[Card]) -> String {
    let mut out = String::new();
    let title = format!("{entity} {}", escape(uuid));
    let _ = write!(
        out,
        "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>{title}</title>\
<style>{STYLE}</style></head>\n<body>\n<h1>{title}</h1>\n"
    );
    let state = if status.is_running {
        "running".to_string()
    } else if status.last_updated > 0.0 {
        format!("finished, last updated {}", format_time(status.last_updated))
    } else {
        "finished".to_string()
    };
    let _ = writeln!(out, "<p class=\"status\">{}</p>", escape(&state));
    if cards.is_empty() {
        out.push_str("<p class=\"empty\">No analyses available.</p>\n");
    }
    for card in cards {
        write_card(&mut out, card);
    }
    out.push_str("</body></html>\n");
    out
}

fn write_card(out: &mut String, card: &Card) {
    let _ = writeln!(
        out,
        "<section class=\"card\" id=\"{}\">\n<h2>{}</h2>",
        card.kind.name,
        escape(card.kind.title)
    );
    if let Some(updated) = &card.updated {
        let _ = writeln!(out, "<p class=\"updated\">Last updated {}</p>", escape(updated));
    }
    match &card.rendered {
        Rendered::Chart(surface) => out.push_str(&surface.to_svg_string()),
        Rendered::Empty => out.push_str("<p class=\"empty\">No data to plot.</p>"),
        Rendered::Loading => out.push_str(&card.rendered.to_svg_string()),
    }
    out.push('\n');
    if !card.insights.is_empty() {
        out.push_str("<ul class=\"insights\">\n");
        for (kind, message) in &card.insights {
            let _ = writeln!(
                out,
                "<li class=\"{}\">{}</li>",
                escape(kind),
                escape(message)
            );
        }
        out.push_str("</ul>\n");
    }
    out.push_str("</section>\n");
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::Arc;

    use labdash_cache::DirSource;

    use super::*;

    fn write(root: &Path, rel: &str, body: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, body).unwrap();
    }

    const CPU: &str = r#"{
        "series": [
            {"name": "user", "step": [1700000000, 1700000060, 1700000120], "value": [10, 20, 15]},
            {"name": "system", "step": [1700000000, 1700000060, 1700000120], "value": [5, 4, 6]}
        ],
        "insights": [{"type": "warning", "message": "CPU <busy>"}]
    }"#;

    #[tokio::test]
    async fn cards_skip_missing_analyses() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "cpu/c1.json", CPU);
        let registry = CacheRegistry::new(Arc::new(DirSource::new(dir.path())));
        let cards = collect_cards(&registry, Entity::Computer, "c1", 640.0, 0.0)
            .await
            .unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].kind, SeriesKind::CPU);
        assert!(cards[0].rendered.surface().is_some());
        assert_eq!(
            cards[0].insights,
            vec![("warning".to_string(), "CPU <busy>".to_string())]
        );
    }

    #[tokio::test]
    async fn corrupt_documents_fail_the_report() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "metrics/r1.json", "{ not json");
        let registry = CacheRegistry::new(Arc::new(DirSource::new(dir.path())));
        let res = collect_cards(&registry, Entity::Run, "r1", 640.0, 0.0).await;
        assert!(matches!(res, Err(CacheError::Json(_))));
    }

    #[tokio::test]
    async fn page_contains_escaped_cards() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "cpu/c1.json", CPU);
        let registry = CacheRegistry::new(Arc::new(DirSource::new(dir.path())));
        let cards = collect_cards(&registry, Entity::Computer, "c1", 640.0, 0.0)
            .await
            .unwrap();
        let status = Status {
            is_running: true,
            last_updated: 0.0,
        };
        let html = render_html(Entity::Computer, "c1", status, &cards);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<h2>CPU</h2>"));
        assert!(html.contains("<svg"));
        assert!(html.contains("CPU &lt;busy&gt;"));
        assert!(html.contains("<p class=\"status\">running</p>"));
    }

    #[test]
    fn empty_report_says_so() {
        let html = render_html(Entity::Run, "r9", Status::default(), &[]);
        assert!(html.contains("No analyses available."));
        assert!(html.contains("<p class=\"status\">finished</p>"));
    }
}
