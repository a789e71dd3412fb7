use crate::{Extractor, Field, ProductRecord};
use itertools::Itertools;
use lazy_regex::regex;
use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Node, Selector};
use tracing::debug;

const E: &str = "Invalid selector";
const PACKAGING_LABEL: &str = "Verp.eenh.:";
const ARTICLE_NUMBER_LABEL: &str = "Art.Nr.:";

lazy_static! {
    static ref LIST_ITEM: Selector = Selector::parse("div.art_liste_artikel_komplett").expect(E);
    static ref NAME: Selector = Selector::parse("div.dark_caption").expect(E);
    static ref PRICE: Selector = Selector::parse(".preis_list_preis").expect(E);
    static ref SPAN: Selector = Selector::parse("span").expect(E);
    static ref SECOND_LIGHT_SPAN: Selector = Selector::parse("span.light:nth-child(2)").expect(E);
}

type ScopeStrategy = for<'a> fn(&'a Html) -> Option<ElementRef<'a>>;
type PackagingStrategy = fn(ElementRef<'_>) -> Option<String>;

/// Search results render a list container, direct hits render a detail page without one.
const SCOPE_STRATEGIES: &[ScopeStrategy] = &[list_item, whole_document];

const PACKAGING_STRATEGIES: &[PackagingStrategy] = &[labelled_packaging, positional_packaging];

#[derive(Debug, Default, Clone, Copy)]
pub struct CatalogExtractor;

impl Extractor for CatalogExtractor {
    fn extract(&self, doc: &Html, identifier: &str) -> ProductRecord {
        if list_item(doc).is_none() {
            debug!("No list item container for {}, searching whole document", identifier);
        }
        let scope = search_scope(doc);

        ProductRecord {
            identifier: identifier.to_string(),
            name: name(scope),
            price: price(scope),
            packaging_unit: packaging_unit(scope),
        }
    }
}

fn list_item(doc: &Html) -> Option<ElementRef<'_>> {
    doc.select(&LIST_ITEM).next()
}

fn whole_document(doc: &Html) -> Option<ElementRef<'_>> {
    Some(doc.root_element())
}

fn search_scope(doc: &Html) -> ElementRef<'_> {
    SCOPE_STRATEGIES
        .iter()
        .find_map(|strategy| strategy(doc))
        .unwrap_or_else(|| doc.root_element())
}

/// Text nodes of `el`, each trimmed, empty ones dropped.
fn stripped_strings<'a>(el: ElementRef<'a>) -> impl Iterator<Item = &'a str> + 'a {
    el.text().map(str::trim).filter(|s| !s.is_empty())
}

fn stripped_text(el: ElementRef<'_>) -> String {
    stripped_strings(el).collect()
}

fn name(scope: ElementRef<'_>) -> Field {
    scope.select(&NAME).next().map(stripped_text).into()
}

fn price(scope: ElementRef<'_>) -> Field {
    scope
        .select(&PRICE)
        .next()
        .map(|el| clean_price(&stripped_strings(el).join(" ")))
        .into()
}

/// Drops the "ab " (from) prefix and the currency sign. Tiered prices are
/// rendered one per line, only the first tier is kept.
pub(crate) fn clean_price(raw: &str) -> String {
    let text = regex!(r"[^\S\n]+").replace_all(raw, " ");
    let text = text.replace("ab ", "").replace('€', "");
    let text = text.trim();
    match text.split_once('\n') {
        Some((first, _)) => first.trim().to_string(),
        None => text.to_string(),
    }
}

fn packaging_unit(scope: ElementRef<'_>) -> Field {
    PACKAGING_STRATEGIES
        .iter()
        .find_map(|strategy| strategy(scope))
        .into()
}

/// The value is the node right after the "Verp.eenh.:" label.
fn labelled_packaging(scope: ElementRef<'_>) -> Option<String> {
    let label = scope
        .select(&SPAN)
        .find(|span| span.text().collect::<String>().contains(PACKAGING_LABEL))?;

    let sibling = label.next_sibling()?;
    let value = match sibling.value() {
        Node::Text(text) => text.trim().to_string(),
        Node::Element(_) => ElementRef::wrap(sibling)
            .map(|el| el.text().collect::<String>().trim().to_string())
            .unwrap_or_default(),
        _ => String::new(),
    };

    Some(value).filter(|v| !v.is_empty())
}

// Positional and fragile: the second light span is only trusted when it is
// neither the packaging label itself nor the article number.
fn positional_packaging(scope: ElementRef<'_>) -> Option<String> {
    let text = stripped_text(scope.select(&SECOND_LIGHT_SPAN).next()?);
    if text.contains(PACKAGING_LABEL) || text.contains(ARTICLE_NUMBER_LABEL) {
        return None;
    }
    Some(text).filter(|t| !t.is_empty())
}
