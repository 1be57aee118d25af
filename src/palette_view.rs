//! DOM view of the palette: one draggable SVG thumbnail per entry.
//!
//! The list is rebuilt from the engine's [`PaletteStore`](canvas::palette::PaletteStore)
//! whenever it changes. Items carry their index so drag events can be
//! delegated to the list container.

#[cfg(test)]
#[path = "palette_view_test.rs"]
mod palette_view_test;

use canvas::consts::SHAPE_STROKE_PX;
use canvas::palette::PaletteEntry;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement};

use crate::error::HostError;

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const INDEX_ATTR: &str = "data-index";

/// Attributes of an entry's thumbnail polygon.
#[must_use]
pub fn polygon_attrs(entry: &PaletteEntry) -> [(&'static str, String); 5] {
    [
        ("points", entry.points.clone()),
        ("fill", entry.fill.clone()),
        ("stroke", entry.stroke.clone()),
        ("stroke-width", SHAPE_STROKE_PX.to_string()),
        ("vector-effect", "non-scaling-stroke".to_owned()),
    ]
}

/// Parse an item's index attribute.
#[must_use]
pub fn parse_index(raw: Option<String>) -> Option<usize> {
    raw.and_then(|r| r.trim().parse().ok())
}

/// Palette index of the item an event started on, if any.
pub fn index_of_target(event: &Event) -> Option<usize> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    match target.closest(&format!("[{INDEX_ATTR}]")) {
        Ok(Some(item)) => parse_index(item.get_attribute(INDEX_ATTR)),
        _ => None,
    }
}

fn thumbnail(document: &Document, index: usize, entry: &PaletteEntry) -> Result<Element, HostError> {
    let item = document.create_element("div")?;
    item.set_class_name("buffer-item");
    item.set_attribute("draggable", "true")?;
    item.set_attribute(INDEX_ATTR, &index.to_string())?;

    let svg = document.create_element_ns(Some(SVG_NS), "svg")?;
    svg.set_attribute("viewBox", &entry.view_box)?;
    svg.set_attribute("preserveAspectRatio", "xMidYMid meet")?;

    let polygon = document.create_element_ns(Some(SVG_NS), "polygon")?;
    for (name, value) in polygon_attrs(entry) {
        polygon.set_attribute(name, &value)?;
    }
    svg.append_child(&polygon)?;
    item.append_child(&svg)?;
    Ok(item)
}

/// Replace the list contents with thumbnails for `entries`.
///
/// # Errors
///
/// Fails when an element cannot be created or attached.
pub fn render(document: &Document, list: &HtmlElement, entries: &[PaletteEntry]) -> Result<(), HostError> {
    list.set_inner_html("");
    for (index, entry) in entries.iter().enumerate() {
        let item: Element = thumbnail(document, index, entry)?;
        list.append_child(&item)?;
    }
    Ok(())
}
