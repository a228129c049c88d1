//! Invoice document renderer.
//!
//! Produces a self-contained HTML document from an invoice record. Pure:
//! no I/O and no knowledge of the rendering engine that later captures it.

pub mod money;

use crate::config::DocumentConfig;
use crate::models::InvoiceRecord;
use money::CurrencyFormat;

/// Presentation constants injected into the renderer: brand, currency and the
/// tax percentage shown on the totals row.
#[derive(Debug, Clone)]
pub struct DocumentStyle {
    pub brand_name: String,
    pub currency: CurrencyFormat,
    pub tax_rate: f64,
}

impl DocumentStyle {
    pub fn from_config(config: &DocumentConfig) -> Self {
        Self {
            brand_name: config.brand_name.clone(),
            currency: CurrencyFormat::new(config.currency_symbol.clone(), config.currency_grouping),
            tax_rate: config.tax_rate,
        }
    }

    /// Tax percentage label, e.g. `18` for a 0.18 rate.
    fn tax_percent_label(&self) -> String {
        let pct = (self.tax_rate * 10_000.0).round() / 100.0;
        if pct == pct.trunc() {
            format!("{:.0}", pct)
        } else {
            format!("{}", pct)
        }
    }
}

const FOOTER_LINE_1: &str = "We are pleased to provide any further information you may require and look forward to assisting with your next order.";
const FOOTER_LINE_2: &str =
    "Rest assured, it will be provided with the same level of service and satisfaction.";

/// Render an invoice record into fixed-layout HTML markup.
pub fn render_invoice_html(record: &InvoiceRecord, style: &DocumentStyle) -> String {
    let currency = &style.currency;
    let brand = escape_html(&style.brand_name);
    let brand_initial = style
        .brand_name
        .chars()
        .next()
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_default();

    // Product rows use positional labels, not the item names. The names are
    // still on the record should this presentation decision ever flip.
    let product_rows: String = record
        .items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            format!(
                r#"            <tr>
              <td>Product {n}</td>
              <td class="text-right">{qty}</td>
              <td class="text-right">{rate}</td>
              <td class="text-right">{total}</td>
            </tr>
"#,
                n = index + 1,
                qty = item.quantity,
                rate = currency.format(item.rate),
                total = currency.format(item.line_total),
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <title>Invoice</title>
  <style>
    * {{ margin: 0; padding: 0; box-sizing: border-box; }}
    @page {{ size: A4; margin: 20px; }}
    body {{
      font-family: 'Arial', sans-serif;
      background-color: #f8f9fa;
      padding: 20px;
      -webkit-print-color-adjust: exact;
      print-color-adjust: exact;
    }}
    .invoice-container {{
      max-width: 800px;
      margin: 0 auto;
      background: white;
      border-radius: 12px;
      overflow: hidden;
    }}
    .header {{
      background: linear-gradient(135deg, #2d3748 0%, #4a5568 100%);
      color: white;
      padding: 30px;
      display: flex;
      justify-content: space-between;
      align-items: center;
    }}
    .logo-section {{ display: flex; align-items: center; gap: 15px; }}
    .logo {{
      width: 50px; height: 50px;
      background: #9ae6b4;
      border-radius: 50%;
      display: flex; align-items: center; justify-content: center;
      font-weight: bold; color: #2d3748; font-size: 20px;
    }}
    .company-name {{ font-size: 24px; font-weight: bold; }}
    .invoice-title {{ font-size: 28px; font-weight: bold; }}
    .user-info {{
      background: #2d3748;
      color: white;
      padding: 20px 30px;
      display: flex;
      justify-content: space-between;
      align-items: center;
    }}
    .user-details h3 {{ font-size: 18px; margin-bottom: 5px; }}
    .user-details p {{ opacity: 0.9; }}
    .invoice-date {{ text-align: right; }}
    .invoice-date p {{ margin: 2px 0; }}
    .products-section {{ padding: 30px; }}
    .products-table {{ width: 100%; border-collapse: collapse; margin-bottom: 30px; }}
    .products-table th {{
      background: #edf2f7;
      padding: 15px;
      text-align: left;
      font-weight: 600;
      border-bottom: 2px solid #e2e8f0;
    }}
    .products-table td {{ padding: 15px; border-bottom: 1px solid #e2e8f0; }}
    .text-right {{ text-align: right; }}
    .totals-section {{ background: #f7fafc; padding: 20px; border-radius: 8px; margin-top: 20px; }}
    .total-row {{
      display: flex;
      justify-content: space-between;
      padding: 8px 0;
      border-bottom: 1px solid #e2e8f0;
    }}
    .total-row:last-child {{
      border-bottom: none;
      font-weight: bold;
      font-size: 18px;
      color: #2d3748;
      padding-top: 15px;
      border-top: 2px solid #2d3748;
    }}
    .footer {{
      background: #2d3748;
      color: white;
      padding: 20px 30px;
      text-align: center;
    }}
    .footer p {{ margin: 5px 0; opacity: 0.9; }}
  </style>
</head>
<body>
  <div class="invoice-container">
    <div class="header">
      <div class="logo-section">
        <div class="logo">{brand_initial}</div>
        <div class="company-name">{brand}</div>
      </div>
      <div class="invoice-title">INVOICE GENERATOR</div>
    </div>
    <div class="user-info">
      <div class="user-details">
        <h3>Name: {owner_name}</h3>
        <p>Email: {owner_email}</p>
      </div>
      <div class="invoice-date">
        <p><strong>Date:</strong> {invoice_date}</p>
        <p><strong>Invoice ID:</strong> {invoice_number}</p>
      </div>
    </div>
    <div class="products-section">
      <table class="products-table">
        <thead>
          <tr>
            <th>Product</th>
            <th class="text-right">Qty</th>
            <th class="text-right">Rate</th>
            <th class="text-right">Total</th>
          </tr>
        </thead>
        <tbody>
{product_rows}        </tbody>
      </table>
      <div class="totals-section">
        <div class="total-row">
          <span>Total Charges:</span>
          <span>{subtotal}</span>
        </div>
        <div class="total-row">
          <span>GST ({tax_pct}%):</span>
          <span>{tax_total}</span>
        </div>
        <div class="total-row">
          <span>Total Amount:</span>
          <span>{grand_total}</span>
        </div>
      </div>
    </div>
    <div class="footer">
      <p>{footer1}</p>
      <p>{footer2}</p>
    </div>
  </div>
</body>
</html>
"#,
        brand_initial = escape_html(&brand_initial),
        brand = brand,
        owner_name = escape_html(&record.owner_name),
        owner_email = escape_html(&record.owner_email),
        invoice_date = record.invoice_date.format("%d/%m/%Y"),
        invoice_number = record.short_number(),
        product_rows = product_rows,
        subtotal = currency.format(record.subtotal),
        tax_pct = style.tax_percent_label(),
        tax_total = currency.format(record.tax_total),
        grand_total = currency.format(record.grand_total),
        footer1 = FOOTER_LINE_1,
        footer2 = FOOTER_LINE_2,
    )
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_html_neutralizes_markup() {
        assert_eq!(
            escape_html(r#"<b>&"quoted"</b>"#),
            "&lt;b&gt;&amp;&quot;quoted&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn tax_percent_label_trims_integer_rates() {
        let style = DocumentStyle {
            brand_name: "Levitation".to_string(),
            currency: CurrencyFormat::inr(),
            tax_rate: 0.18,
        };
        assert_eq!(style.tax_percent_label(), "18");

        let fractional = DocumentStyle {
            tax_rate: 0.125,
            ..style
        };
        assert_eq!(fractional.tax_percent_label(), "12.5");
    }
}
