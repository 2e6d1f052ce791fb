//! Loading generated markup into the record model.
//!
//! The documentation generator emits pages whose member lists carry `name`,
//! `visbl`, `date` and `data-isabs` attributes plus a `.kind` marker element.
//! This module parses that markup once into `MemberRecord`s and package
//! trees; afterwards the markup is only a render target. Missing or
//! malformed required attributes fail fast, naming the offending element.

use chrono::NaiveDate;
use scraper::{ElementRef, Html, Selector};

use crate::domain::{Kind, MemberGroup, MemberIndex, MemberRecord, Visibility};
use crate::error::{DocsiftError, Result};
use crate::index::{EntityIndex, PackageNode, TemplateEntry};

fn selector(source: &str) -> Result<Selector> {
    Selector::parse(source).map_err(|e| DocsiftError::Markup(format!("bad selector {source:?}: {e}")))
}

fn child_elements<'a>(el: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    el.children().filter_map(ElementRef::wrap)
}

fn has_class(el: ElementRef<'_>, class: &str) -> bool {
    el.value().classes().any(|c| c == class)
}

fn has_ancestor_class(el: ElementRef<'_>, class: &str) -> bool {
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .any(|a| has_class(a, class))
}

fn collapse_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Parse a documentation page's member lists and linearization.
pub fn parse_member_page(html: &str) -> Result<MemberIndex> {
    let doc = Html::parse_document(html);

    let linearization_sel = selector("#linearization > li")?;
    let mut linearization = Vec::new();
    for li in doc.select(&linearization_sel) {
        let name = li.value().attr("name").ok_or_else(|| {
            DocsiftError::MalformedRecord("linearization entry missing name attribute".to_string())
        })?;
        linearization.push(name.to_string());
    }

    let members_sel = selector(".members")?;
    let h3_sel = selector("h3")?;
    let kind_sel = selector(".kind")?;
    let comment_sel = selector(".fullcomment .cmt")?;

    let mut groups = Vec::new();
    let mut doc_order = 0;
    for block in doc.select(&members_sel) {
        let mut group = MemberGroup::new(
            block
                .select(&h3_sel)
                .next()
                .map(collapse_text)
                .unwrap_or_default(),
        );
        // blocks nested under an "inherited from" parent heading
        group.inherited = has_ancestor_class(block, "parent");

        for ol in child_elements(block).filter(|c| c.value().name() == "ol") {
            for li in child_elements(ol).filter(|c| c.value().name() == "li") {
                let record =
                    parse_member_li(li, &kind_sel, &comment_sel, group.inherited, doc_order)?;
                group.records.push(record);
                doc_order += 1;
            }
        }
        groups.push(group);
    }

    log::debug!(
        "loaded {} group(s), {doc_order} record(s), linearization of {}",
        groups.len(),
        linearization.len()
    );
    Ok(MemberIndex {
        groups,
        linearization,
    })
}

fn parse_member_li(
    li: ElementRef<'_>,
    kind_sel: &Selector,
    comment_sel: &Selector,
    inherited: bool,
    doc_order: usize,
) -> Result<MemberRecord> {
    let name = li
        .value()
        .attr("name")
        .ok_or_else(|| DocsiftError::MalformedRecord("member missing name attribute".to_string()))?;

    let visibility: Visibility = li
        .value()
        .attr("visbl")
        .ok_or_else(|| {
            DocsiftError::MalformedRecord(format!("member {name:?} missing visbl attribute"))
        })?
        .parse()?;

    let kind: Kind = li
        .select(kind_sel)
        .next()
        .map(collapse_text)
        .ok_or_else(|| DocsiftError::MalformedRecord(format!("member {name:?} missing kind marker")))?
        .parse()?;

    let mut record = MemberRecord::new(name, visibility, kind, doc_order);
    record.inherited = inherited;

    if let Some(date) = li.value().attr("date") {
        record.date = Some(NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|e| {
            DocsiftError::MalformedRecord(format!("member {name:?} has bad date {date:?}: {e}"))
        })?);
    }

    if let Some(isabs) = li.value().attr("data-isabs") {
        record.is_abstract = match isabs {
            "true" => true,
            "false" => false,
            other => {
                return Err(DocsiftError::MalformedRecord(format!(
                    "member {name:?} has bad data-isabs {other:?}"
                )));
            }
        };
    }

    record.comment = li.select(comment_sel).next().map(collapse_text).unwrap_or_default();
    Ok(record)
}

/// Parse the entity-index pane (the `#tpl` package tree).
pub fn parse_entity_index(html: &str) -> Result<EntityIndex> {
    let doc = Html::parse_document(html);
    let tpl_sel = selector("#tpl")?;
    let tpl = doc
        .select(&tpl_sel)
        .next()
        .ok_or_else(|| DocsiftError::Markup("missing #tpl entity list".to_string()))?;

    let mut root = PackageNode::new("");
    fill_package(tpl, &mut root)?;
    Ok(EntityIndex::new(root))
}

fn fill_package(el: ElementRef<'_>, node: &mut PackageNode) -> Result<()> {
    for ol in child_elements(el).filter(|c| c.value().name() == "ol") {
        if has_class(ol, "templates") {
            for li in child_elements(ol).filter(|c| c.value().name() == "li") {
                node.templates.push(parse_template_li(li)?);
            }
        } else if has_class(ol, "packages") {
            for li in child_elements(ol).filter(|c| c.value().name() == "li") {
                node.packages.push(parse_package_li(li)?);
            }
        }
    }
    Ok(())
}

fn parse_package_li(li: ElementRef<'_>) -> Result<PackageNode> {
    let name = li.value().attr("title").ok_or_else(|| {
        DocsiftError::MalformedRecord("package entry missing title attribute".to_string())
    })?;
    let mut node = PackageNode::new(name);
    fill_package(li, &mut node)?;
    Ok(node)
}

fn parse_template_li(li: ElementRef<'_>) -> Result<TemplateEntry> {
    let name = li.value().attr("title").ok_or_else(|| {
        DocsiftError::MalformedRecord("template entry missing title attribute".to_string())
    })?;
    let kind = li
        .value()
        .classes()
        .find_map(|c| c.parse::<Kind>().ok())
        .ok_or_else(|| {
            DocsiftError::MalformedRecord(format!("template {name:?} has no kind class"))
        })?;
    Ok(TemplateEntry {
        name: name.to_string(),
        kind,
        visible: true,
    })
}
