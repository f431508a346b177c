//! Plain-text rendering of pages, records and form errors.

use std::fmt::Write;

use chrono::{DateTime, Utc};
use stampdesk_core::dto::{
    Activation, Business, BusinessItem, CurrentUser, Destruction, Product, RetailOrder,
    StampGeneration, StampTemplate,
};
use stampdesk_core::{FieldError, Page};

use crate::screens::PaginationControls;

const EMPTY: &str = "-";

/// Records that render as a table row.
pub trait Tabular {
    const HEADERS: &'static [&'static str];
    fn row(&self) -> Vec<String>;
}

/// Records that render as a `label: value` block.
pub trait Describe {
    fn fields(&self) -> Vec<(&'static str, String)>;
}

fn opt(value: Option<&str>) -> String {
    value.filter(|v| !v.is_empty()).unwrap_or(EMPTY).to_string()
}

fn date(value: Option<&DateTime<Utc>>) -> String {
    value.map_or_else(|| EMPTY.to_string(), |d| d.format("%Y-%m-%d %H:%M").to_string())
}

fn joined<T: AsRef<str>>(values: &[T]) -> String {
    if values.is_empty() {
        return EMPTY.to_string();
    }
    values.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(", ")
}

/// Render a page as an aligned table with a pager footer.
#[must_use]
pub fn render_page<T: Tabular>(page: &Page<T>) -> String {
    let rows: Vec<Vec<String>> = page.items().iter().map(Tabular::row).collect();
    let mut widths: Vec<usize> = T::HEADERS.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let headers: Vec<String> = T::HEADERS.iter().map(ToString::to_string).collect();
    push_row(&mut out, &headers, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, &rule, &widths);
    if rows.is_empty() {
        out.push_str("(no records)\n");
    }
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out.push_str(&render_pager(&PaginationControls::of(page)));
    out
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

/// `Page 2 of 5 (48 total)  [< prev] [next >]` with disabled controls omitted.
#[must_use]
pub fn render_pager(controls: &PaginationControls) -> String {
    let mut line = format!(
        "Page {} of {} ({} total)",
        controls.page, controls.total_pages, controls.total
    );
    if controls.previous_enabled {
        line.push_str("  [< prev]");
    }
    if controls.next_enabled {
        line.push_str("  [next >]");
    }
    line
}

/// Render a record as aligned `label: value` lines.
#[must_use]
pub fn render_detail<T: Describe>(record: &T) -> String {
    let fields = record.fields();
    let width = fields.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
    let mut out = String::new();
    for (label, value) in fields {
        let _ = writeln!(out, "{label:<width$}  {value}");
    }
    out
}

/// Render validation failures, one per line.
#[must_use]
pub fn render_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("  {}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("\n")
}

// =============================================================================
// Implementations
// =============================================================================

impl Tabular for BusinessItem {
    const HEADERS: &'static [&'static str] = &["ID", "NAME", "SHORT NAME", "CODE", "TAX CODE"];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            opt(self.short_name.as_deref()),
            opt(self.code.as_deref()),
            opt(self.tax_code.as_deref()),
        ]
    }
}

impl Tabular for Product {
    const HEADERS: &'static [&'static str] = &["ID", "NAME", "GTIN", "PRICE"];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.gtin.clone(),
            self.price.to_string(),
        ]
    }
}

impl Tabular for StampTemplate {
    const HEADERS: &'static [&'static str] = &["ID", "NAME", "SIZE", "STATUS"];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            opt(self.size.as_deref()),
            opt(self.status.as_deref()),
        ]
    }
}

impl Tabular for StampGeneration {
    const HEADERS: &'static [&'static str] = &["ID", "CODE", "TEMPLATE", "QUANTITY", "STATUS", "CREATED"];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            opt(self.code.as_deref()),
            self.template_id.to_string(),
            self.quantity.to_string(),
            opt(self.status.as_deref()),
            date(self.created_at.as_ref()),
        ]
    }
}

impl Tabular for Activation {
    const HEADERS: &'static [&'static str] = &["ID", "CODE", "STAMPS", "PRODUCT", "ACTIVATED"];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            opt(self.code.as_deref()),
            self.stamp_ids.len().to_string(),
            opt(self.product_id.as_ref().map(|id| id.as_str())),
            date(self.activated_at.as_ref()),
        ]
    }
}

impl Tabular for RetailOrder {
    const HEADERS: &'static [&'static str] = &["ID", "CODE", "STAMPS", "CUSTOMER", "CREATED"];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            opt(self.code.as_deref()),
            self.stamp_ids.len().to_string(),
            opt(self.customer_name.as_deref()),
            date(self.created_at.as_ref()),
        ]
    }
}

impl Tabular for Destruction {
    const HEADERS: &'static [&'static str] = &["ID", "CODE", "STAMPS", "REASON", "CREATED"];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            opt(self.code.as_deref()),
            self.stamp_ids.len().to_string(),
            self.reason.clone(),
            date(self.created_at.as_ref()),
        ]
    }
}

impl Describe for CurrentUser {
    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", opt(self.id.as_ref().map(|id| id.as_str()))),
            ("Full name", self.full_name.clone()),
            ("Email", opt(self.email.as_deref())),
            ("Phone", opt(self.phone.as_deref())),
            ("Avatar", opt(self.avatar.as_deref())),
        ]
    }
}

impl Describe for Business {
    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", self.id.to_string()),
            ("Name", self.name.clone()),
            ("Short name", opt(Some(self.short_name.as_str()))),
            ("Full name", opt(Some(self.full_name.as_str()))),
            ("Code", opt(Some(self.code.as_str()))),
            ("Phone", opt(Some(self.phone.as_str()))),
            ("Email", opt(Some(self.email.as_str()))),
            ("Tax code", opt(Some(self.tax_code.as_str()))),
            ("Address", opt(Some(self.address_full.as_str()))),
            ("Province", opt(Some(self.province_code.as_str()))),
            ("District", opt(Some(self.district_code.as_str()))),
            ("Ward", opt(Some(self.ward_code.as_str()))),
            ("Website", opt(self.website.as_deref())),
            ("YouTube", opt(self.youtube.as_deref())),
            ("Logo", opt(self.logo.as_deref())),
            ("Slide images", joined(&self.slide_images)),
            ("Intro images", joined(&self.intro_images)),
            ("Registration scans", joined(&self.business_registration_scans)),
        ]
    }
}

impl Describe for Product {
    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", self.id.to_string()),
            ("Name", self.name.clone()),
            ("GTIN", self.gtin.clone()),
            ("Price", self.price.to_string()),
        ]
    }
}

impl Describe for StampTemplate {
    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", self.id.to_string()),
            ("Name", self.name.clone()),
            ("Size", opt(self.size.as_deref())),
            ("Status", opt(self.status.as_deref())),
            ("Description", opt(self.description.as_deref())),
        ]
    }
}

impl Describe for StampGeneration {
    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", self.id.to_string()),
            ("Code", opt(self.code.as_deref())),
            ("Template", self.template_id.to_string()),
            ("Product", opt(self.product_id.as_ref().map(|id| id.as_str()))),
            ("Quantity", self.quantity.to_string()),
            ("Status", opt(self.status.as_deref())),
            ("Created", date(self.created_at.as_ref())),
        ]
    }
}

impl Describe for Activation {
    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", self.id.to_string()),
            ("Code", opt(self.code.as_deref())),
            ("Stamps", joined(&self.stamp_ids)),
            ("Product", opt(self.product_id.as_ref().map(|id| id.as_str()))),
            ("Activated", date(self.activated_at.as_ref())),
        ]
    }
}

impl Describe for RetailOrder {
    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", self.id.to_string()),
            ("Code", opt(self.code.as_deref())),
            ("Stamps", joined(&self.stamp_ids)),
            ("Customer", opt(self.customer_name.as_deref())),
            ("Phone", opt(self.customer_phone.as_deref())),
            ("Created", date(self.created_at.as_ref())),
        ]
    }
}

impl Describe for Destruction {
    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", self.id.to_string()),
            ("Code", opt(self.code.as_deref())),
            ("Stamps", joined(&self.stamp_ids)),
            ("Reason", self.reason.clone()),
            ("Created", date(self.created_at.as_ref())),
        ]
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use stampdesk_core::types::{Price, ProductId};

    fn product(id: &str, name: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            gtin: "8930000000001".to_string(),
            price: Price::parse("12.5").unwrap(),
        }
    }

    #[test]
    fn test_render_page_aligns_columns() {
        let page = Page::new(vec![product("p1", "Tea"), product("p22", "Green Tea")], 12, 1, 2).unwrap();
        let text = render_page(&page);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "ID   NAME       GTIN           PRICE");
        assert_eq!(lines[2], "p1   Tea        8930000000001  12.5");
        assert_eq!(lines[4], "Page 1 of 6 (12 total)  [next >]");
    }

    #[test]
    fn test_render_empty_page() {
        let page: Page<Product> = Page::new(vec![], 0, 1, 10).unwrap();
        let text = render_page(&page);
        assert!(text.contains("(no records)"));
        assert!(text.ends_with("Page 1 of 1 (0 total)"));
    }

    #[test]
    fn test_render_detail() {
        let text = render_detail(&product("p1", "Tea"));
        assert_eq!(text, "ID     p1\nName   Tea\nGTIN   8930000000001\nPrice  12.5\n");
    }

    #[test]
    fn test_render_field_errors() {
        let errors = vec![FieldError {
            field: "name",
            message: "Name is required".to_string(),
        }];
        assert_eq!(render_field_errors(&errors), "  name: Name is required");
    }
}
