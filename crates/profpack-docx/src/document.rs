//! Fragment/run view over the main document part.
//!
//! A fragment is a paragraph (`w:p`), whether a direct child of the body or
//! inside a table cell. Fragment order follows how the templates are read:
//! all top-level body paragraphs first, then each table's cells row-major
//! with the cell's paragraphs in order. Handles are child-index paths into
//! the element tree, valid as long as the document is not restructured.

use crate::error::{DocxError, Result};
use crate::field::pad_to_length;
use crate::xml::{self, XmlElement, XmlNode};

const BODY: &str = "w:body";
const PARAGRAPH: &str = "w:p";
const TABLE: &str = "w:tbl";
const TABLE_ROW: &str = "w:tr";
const TABLE_CELL: &str = "w:tc";
const RUN: &str = "w:r";
const RUN_PROPS: &str = "w:rPr";
const UNDERLINE: &str = "w:u";
const TEXT: &str = "w:t";

/// Address of a fragment: child-index path from the document root element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentId(Vec<usize>);

/// Snapshot of one formatted run inside a fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunView {
    /// Index of the `w:r` element among the paragraph's children.
    pub child_index: usize,
    pub text: String,
    pub underlined: bool,
}

/// Parsed main document part with mutation primitives for field filling.
#[derive(Debug, Clone)]
pub struct DocxDocument {
    root: XmlElement,
}

impl DocxDocument {
    pub fn parse(xml: &str) -> Result<Self> {
        Ok(Self {
            root: xml::parse(xml)?,
        })
    }

    pub fn to_xml(&self) -> Result<String> {
        xml::serialize(&self.root)
    }

    /// All fragments in fill order: body paragraphs, then every table cell's
    /// paragraphs row-major. Paragraphs of nested tables are not visited.
    pub fn fragments(&self) -> Vec<FragmentId> {
        let mut out = Vec::new();
        let Some((body_index, body)) = self
            .root
            .child_elements()
            .find(|(_, el)| el.name == BODY)
        else {
            return out;
        };
        for (p_index, child) in body.child_elements() {
            if child.name == PARAGRAPH {
                out.push(FragmentId(vec![body_index, p_index]));
            }
        }
        for (t_index, table) in body.child_elements() {
            if table.name != TABLE {
                continue;
            }
            for (r_index, row) in table.child_elements() {
                if row.name != TABLE_ROW {
                    continue;
                }
                for (c_index, cell) in row.child_elements() {
                    if cell.name != TABLE_CELL {
                        continue;
                    }
                    for (p_index, para) in cell.child_elements() {
                        if para.name == PARAGRAPH {
                            out.push(FragmentId(vec![
                                body_index, t_index, r_index, c_index, p_index,
                            ]));
                        }
                    }
                }
            }
        }
        out
    }

    /// Visible text of a fragment: its runs' text concatenated in order.
    pub fn fragment_text(&self, id: &FragmentId) -> Result<String> {
        let paragraph = self.element_at(id)?;
        let mut text = String::new();
        for (_, run) in paragraph.child_elements() {
            if run.name == RUN {
                text.push_str(&run_text(run));
            }
        }
        Ok(text)
    }

    /// Snapshots of the fragment's runs, in order.
    pub fn runs(&self, id: &FragmentId) -> Result<Vec<RunView>> {
        let paragraph = self.element_at(id)?;
        Ok(paragraph
            .child_elements()
            .filter(|(_, el)| el.name == RUN)
            .map(|(child_index, run)| RunView {
                child_index,
                text: run_text(run),
                underlined: run_underlined(run),
            })
            .collect())
    }

    /// Overwrite one run's text, optionally forcing its underline on.
    pub fn set_run_text(
        &mut self,
        id: &FragmentId,
        run_index: usize,
        text: &str,
        force_underline: bool,
    ) -> Result<()> {
        let paragraph = self.element_at_mut(id)?;
        let Some(XmlNode::Element(run)) = paragraph.children.get_mut(run_index) else {
            return Err(DocxError::StaleFragment);
        };
        if run.name != RUN {
            return Err(DocxError::StaleFragment);
        }
        if force_underline {
            force_run_underline(run);
        }
        replace_run_text(run, text);
        Ok(())
    }

    /// Fill a blank run with `value`, padding to the blank's original width.
    ///
    /// The replacement is `value` followed by no-break spaces up to the run's
    /// former character count, so the underline keeps its rendered length;
    /// longer values grow the run and are never truncated. The underline flag
    /// is forced on either way.
    pub fn fill_blank_run(&mut self, id: &FragmentId, run: &RunView, value: &str) -> Result<()> {
        let padded = pad_to_length(value, run.text.chars().count());
        self.set_run_text(id, run.child_index, &padded, true)
    }

    /// Replace the whole fragment's visible text: every run is emptied and the
    /// first one receives `text`; a paragraph without runs gains one.
    pub fn replace_fragment_text(&mut self, id: &FragmentId, text: &str) -> Result<()> {
        let paragraph = self.element_at_mut(id)?;
        let mut first_run_seen = false;
        for node in &mut paragraph.children {
            let XmlNode::Element(run) = node else {
                continue;
            };
            if run.name != RUN {
                continue;
            }
            if first_run_seen {
                replace_run_text(run, "");
            } else {
                replace_run_text(run, text);
                first_run_seen = true;
            }
        }
        if !first_run_seen {
            let mut run = XmlElement::new(RUN);
            replace_run_text(&mut run, text);
            paragraph.children.push(XmlNode::Element(run));
        }
        Ok(())
    }

    fn element_at(&self, id: &FragmentId) -> Result<&XmlElement> {
        let mut current = &self.root;
        for &index in &id.0 {
            match current.children.get(index) {
                Some(XmlNode::Element(el)) => current = el,
                _ => return Err(DocxError::StaleFragment),
            }
        }
        Ok(current)
    }

    fn element_at_mut(&mut self, id: &FragmentId) -> Result<&mut XmlElement> {
        let mut current = &mut self.root;
        for &index in &id.0 {
            match current.children.get_mut(index) {
                Some(XmlNode::Element(el)) => current = el,
                _ => return Err(DocxError::StaleFragment),
            }
        }
        Ok(current)
    }
}

fn run_text(run: &XmlElement) -> String {
    let mut text = String::new();
    for (_, child) in run.child_elements() {
        if child.name == TEXT {
            text.push_str(&child.direct_text());
        }
    }
    text
}

/// A run renders underlined when its properties carry `w:u` with any value
/// other than `none`. Style-level underlining is not visible here; the blank
/// classifier compensates with its length-only rule.
fn run_underlined(run: &XmlElement) -> bool {
    run.find_child(RUN_PROPS)
        .and_then(|props| props.find_child(UNDERLINE))
        .map(|u| u.attr("w:val") != Some("none"))
        .unwrap_or(false)
}

/// Ensure the run carries `w:u w:val="single"`, creating run properties when
/// the template had none. Overrides `none` left by the template author.
fn force_run_underline(run: &mut XmlElement) {
    if run.find_child_mut(RUN_PROPS).is_none() {
        // Run properties must precede the run content.
        run.children
            .insert(0, XmlNode::Element(XmlElement::new(RUN_PROPS)));
    }
    if let Some(props) = run.find_child_mut(RUN_PROPS) {
        match props.find_child_mut(UNDERLINE) {
            Some(u) => u.set_attr("w:val", "single"),
            None => {
                let mut u = XmlElement::new(UNDERLINE);
                u.self_closing = true;
                u.set_attr("w:val", "single");
                props.children.push(XmlNode::Element(u));
            }
        }
    }
}

fn replace_run_text(run: &mut XmlElement, text: &str) {
    run.children.retain(|node| {
        matches!(node, XmlNode::Element(el) if el.name == RUN_PROPS)
    });
    let mut t = XmlElement::new(TEXT);
    t.set_attr("xml:space", "preserve");
    t.children.push(XmlNode::Text(text.to_string()));
    run.children.push(XmlNode::Element(t));
}
