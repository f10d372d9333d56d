//! Printable quote sheet.

use crate::config::PricingConfig;
use crate::model::SavedQuote;

/// Width of the sheet in characters.
pub const SHEET_WIDTH: usize = 48;

const LABEL_WIDTH: usize = 28;
const FIELD_WIDTH: usize = 16;

/// Line writer for fixed-width sheets.
pub struct SheetWriter {
    width: usize,
    buffer: String,
}

impl SheetWriter {
    /// Create a writer for sheets `width` characters wide.
    pub fn new(width: usize) -> Self {
        Self {
            width,
            buffer: String::new(),
        }
    }

    /// Take the rendered text.
    pub fn take_output(self) -> String {
        self.buffer
    }

    /// Write a line as-is.
    pub fn line(&mut self, content: &str) {
        self.buffer.push_str(content.trim_end());
        self.buffer.push('\n');
    }

    /// Write an empty line.
    pub fn blank(&mut self) {
        self.buffer.push('\n');
    }

    /// Write a full-width rule of `ch`.
    pub fn rule(&mut self, ch: char) {
        let rule: String = std::iter::repeat(ch).take(self.width).collect();
        self.line(&rule);
    }

    /// Write centered text.
    pub fn centered(&mut self, text: &str) {
        let pad = self.width.saturating_sub(text.chars().count()) / 2;
        self.line(&format!("{}{}", " ".repeat(pad), text));
    }

    /// Write a `label: value` field.
    pub fn field(&mut self, label: &str, value: &str) {
        self.line(&format!("{:<width$}{}", label, value, width = FIELD_WIDTH));
    }

    /// Write a label with a right-aligned amount.
    pub fn amount(&mut self, label: &str, value: &str) {
        let value_width = self.width.saturating_sub(LABEL_WIDTH);
        self.line(&format!(
            "{:<lw$}{:>vw$}",
            label,
            value,
            lw = LABEL_WIDTH,
            vw = value_width
        ));
    }
}

/// Format a percentage without trailing zeros ("7", "12.5").
pub fn format_percent(percent: f64) -> String {
    let text = format!("{:.2}", percent);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Render a quote as a printable plain-text sheet.
pub fn render_quote_sheet(quote: &SavedQuote, config: &PricingConfig) -> String {
    let b = &quote.breakdown;
    let money = |amount: f64| config.format_currency(amount);
    let mut w = SheetWriter::new(SHEET_WIDTH);

    w.rule('=');
    w.centered("QUOTE");
    w.centered("Sign & Advertising Services");
    w.rule('=');
    w.field("Quote No.:", &quote.id);
    w.field("Date:", &quote.created_at.format("%Y-%m-%d").to_string());

    if let Some(client) = &quote.client {
        w.blank();
        w.line("CLIENT");
        w.field("Name:", &client.name);
        if let Some(company) = client.company.as_deref().filter(|c| !c.trim().is_empty()) {
            w.field("Company:", company);
        }
        if let Some(contact) = client.contact_line() {
            w.field("Contact:", &contact);
        }
    }

    w.blank();
    w.line("SERVICE DETAILS");
    w.field("Service type:", &b.service_type);
    w.field("Category:", &b.category);
    if !b.thickness.is_empty() {
        w.field("Thickness:", &b.thickness);
    }
    w.field("Area:", &format!("{} ft²", b.area));

    w.blank();
    w.line("PRICE BREAKDOWN");
    w.amount("Price per ft²", &money(b.rate));
    if b.override_applied {
        w.amount("Subtotal (minimum charge)", &money(b.subtotal));
    } else {
        w.amount("Subtotal", &money(b.subtotal));
    }
    if let Some(kit) = &b.led {
        if kit.units > 0 {
            w.amount(&format!("LED modules ({})", kit.units), &money(kit.units_cost));
        }
        w.amount(
            &format!("Transformers ({})", kit.transformers),
            &money(kit.transformers_cost),
        );
    }
    if let Some(cost) = b.custom_color_cost {
        w.amount("Custom color", &money(cost));
    }
    if let Some(cost) = b.installation_cost {
        w.amount("Installation", &money(cost));
    }
    if b.discount_percent > 0.0 {
        w.amount(
            &format!("Discount ({}%)", format_percent(b.discount_percent)),
            &format!("-{}", money(b.discount_amount)),
        );
    }
    if let Some(tax) = b.tax {
        w.amount(
            &format!("Tax ({}%)", format_percent(config.tax_rate * 100.0)),
            &money(tax),
        );
    }
    w.rule('-');
    w.amount("TOTAL", &money(b.total));

    let mut notes: Vec<String> = Vec::new();
    if b.led.is_some() {
        notes.push(format!(
            "Note: includes LED modules ({} each) and transformers ({}, covers {} ft²), without ACM base.",
            money(config.led_unit_price),
            money(config.transformer_price),
            config.transformer_coverage
        ));
    }
    if let Some(note) = &b.note {
        notes.push(format!("Condition: {}", note));
    }
    for advisory in &b.advisories {
        notes.push(format!("Advisory: {}", advisory));
    }
    if let Some(text) = &quote.notes {
        notes.push(format!("Notes: {}", text));
    }
    if !notes.is_empty() {
        w.blank();
        for note in &notes {
            w.line(note);
        }
    }

    w.take_output()
}
