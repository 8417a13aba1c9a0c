//! JavaScript evaluation scripts
//!
//! Scripts evaluated against the console and product pages. Arguments are
//! embedded with `serde_json::to_string`, which yields a valid JS string
//! literal and rules out injection through labels or selectors.

use crate::utils::{COPY_ICON_PATH, FILTER_TOGGLE_SELECTOR, FIRST_ROW_CELLS_SELECTOR};

fn js_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
}

/// CSS selector of the copy-link buttons
#[must_use]
pub fn copy_button_selector() -> String {
    format!("button:has(svg path[d=\"{COPY_ICON_PATH}\"])")
}

/// Filter pill whose text contains `label`, or `null`.
#[must_use]
pub fn filter_toggle(label: &str) -> String {
    format!(
        "Array.from(document.querySelectorAll({sel})).find(el => (el.textContent || '').includes({label})) || null",
        sel = js_string(FILTER_TOGGLE_SELECTOR),
        label = js_string(label),
    )
}

fn copy_button_expr(row: usize) -> String {
    format!(
        "document.querySelectorAll({sel})[{row}] || null",
        sel = js_string(&copy_button_selector()),
    )
}

/// Icon path inside the `row`-th copy button, or `null`.
#[must_use]
pub fn copy_icon(row: usize) -> String {
    format!(
        "(() => {{ const btn = {btn}; return btn ? btn.querySelector({path}) : null; }})()",
        btn = copy_button_expr(row),
        path = js_string(&format!("svg path[d=\"{COPY_ICON_PATH}\"]")),
    )
}

/// Whether the element is attached and rendered with a non-empty box.
#[must_use]
pub fn is_visible(element_expr: &str) -> String {
    format!(
        r"(() => {{
            const el = {element_expr};
            if (!el) return false;
            const rect = el.getBoundingClientRect();
            const style = window.getComputedStyle(el);
            return rect.width > 0 && rect.height > 0
                && style.visibility !== 'hidden' && style.display !== 'none';
        }})()"
    )
}

/// The element's class attribute (works for SVG nodes too).
#[must_use]
pub fn class_names(element_expr: &str) -> String {
    format!(
        "(() => {{ const el = {element_expr}; return el ? (el.getAttribute('class') || '') : null; }})()"
    )
}

/// Scroll into view and dispatch a bubbling click.
///
/// The copy buttons only react to a click event reaching their icon, a
/// programmatic `button.click()` is ignored.
#[must_use]
pub fn synthetic_click(element_expr: &str) -> String {
    format!(
        r"(() => {{
            const el = {element_expr};
            if (!el) return false;
            el.scrollIntoView({{ block: 'center', inline: 'nearest' }});
            el.dispatchEvent(new MouseEvent('click', {{ bubbles: true, cancelable: true, view: window }}));
            return true;
        }})()"
    )
}

#[must_use]
pub fn count_copy_controls() -> String {
    format!(
        "document.querySelectorAll({}).length",
        js_string(&copy_button_selector())
    )
}

#[must_use]
pub fn first_row_cells() -> String {
    format!(
        "Array.from(document.querySelectorAll({})).map(td => (td.textContent || '').trim())",
        js_string(FIRST_ROW_CELLS_SELECTOR)
    )
}

/// Cell text in the table row that owns the `row`-th copy control.
#[must_use]
pub fn row_cell_text(row: usize, column: usize) -> String {
    format!(
        r"(() => {{
            const btn = {btn};
            const tr = btn ? btn.closest('tr') : null;
            if (!tr) return null;
            const cell = tr.querySelectorAll('td')[{column}];
            return cell ? (cell.textContent || '') : null;
        }})()",
        btn = copy_button_expr(row),
    )
}

pub const READ_CLIPBOARD: &str = "navigator.clipboard.readText()";

#[must_use]
pub fn write_clipboard(text: &str) -> String {
    format!(
        "navigator.clipboard.writeText({}).then(() => true)",
        js_string(text)
    )
}

pub const READY_STATE_INTERACTIVE: &str =
    "document.readyState === 'interactive' || document.readyState === 'complete'";

pub const BODY_TEXT: &str = "document.body ? (document.body.innerText || '') : ''";

pub const LOCATION_HREF: &str = "window.location.href";

/// Whether any element matching `selector` exists.
#[must_use]
pub fn exists(selector: &str) -> String {
    format!("!!document.querySelector({})", js_string(selector))
}

/// First element matching `selector`, or `null`.
#[must_use]
pub fn query(selector: &str) -> String {
    format!("document.querySelector({})", js_string(selector))
}

/// First `<button>` whose trimmed text equals `text` (`exact`) or contains it.
#[must_use]
pub fn button_with_text(text: &str, exact: bool) -> String {
    format!(
        r"Array.from(document.querySelectorAll('button')).find(b => {{
            const t = (b.textContent || '').trim();
            return {exact} ? t === {text} : t.includes({text});
        }}) || null",
        text = js_string(text),
    )
}

/// Deepest element whose trimmed text is exactly `text`.
#[must_use]
pub fn element_with_exact_text(text: &str) -> String {
    format!(
        r"Array.from(document.querySelectorAll('body *')).find(el =>
            el.childElementCount === 0 && (el.textContent || '').trim() === {text}) || null",
        text = js_string(text),
    )
}

/// Plain click on the element; used for ordinary console controls.
#[must_use]
pub fn click(element_expr: &str) -> String {
    format!(
        "(() => {{ const el = {element_expr}; if (!el) return false; el.click(); return true; }})()"
    )
}
