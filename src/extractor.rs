use lazy_static::lazy_static;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::config::PRICE_UNIT;
use crate::types::{Extraction, PriceRecord};

lazy_static! {
    // "تاریخ بروزرسانی: 1402/01/01" ("update date: ...")
    static ref UPDATE_DATE_REGEX: Regex =
        Regex::new(r"تاریخ بروزرسانی:\s*([\d/]+)").unwrap();
}

const FOOTER_CELL: &str = "tfoot tr td";
const BODY_ROW: &str = "table tbody tr";
const CELL: &str = "td";

/// Minimum cells a body row needs: name, price, change, time.
const MIN_ROW_CELLS: usize = 4;

/// Extract the price rows for `currency_name` and the table's update date.
///
/// Never fails: a page whose markup changed yields `date: None` and/or an
/// empty `data`, not an error. Row matching is exact after trimming, with no
/// case folding or inner-whitespace normalization.
pub fn extract_price(document: &str, currency_name: &str) -> Extraction {
    let html = Html::parse_document(document);
    let mut extraction = Extraction {
        unit: PRICE_UNIT.to_string(),
        date: None,
        data: Vec::new(),
    };

    let (Ok(footer_cell), Ok(body_row), Ok(cell)) = (
        Selector::parse(FOOTER_CELL),
        Selector::parse(BODY_ROW),
        Selector::parse(CELL),
    ) else {
        return extraction;
    };

    extraction.date = html
        .select(&footer_cell)
        .next()
        .and_then(|c| parse_update_date(&cell_text(c)));

    for row in html.select(&body_row) {
        let cells: Vec<String> = row.select(&cell).map(cell_text).collect();
        if cells.len() < MIN_ROW_CELLS || cells[0] != currency_name {
            continue;
        }
        extraction.data.push(PriceRecord {
            name: cells[0].clone(),
            price: parse_price(&cells[1]),
            change: cells[2].clone(),
            time: cells[3].clone(),
        });
    }

    extraction
}

/// Pull the `<digits>/<digits>/<digits>` token out of a footer cell.
pub fn parse_update_date(text: &str) -> Option<String> {
    UPDATE_DATE_REGEX
        .captures(text)
        .map(|cap| cap[1].to_string())
}

/// Price cell to integer: thousands commas dropped, Persian and Arabic-Indic
/// digits accepted. Anything else (including negatives) is 0.
pub fn parse_price(text: &str) -> u64 {
    let normalized: String = text
        .trim()
        .chars()
        .filter(|c| *c != ',')
        .map(ascii_digit)
        .collect();
    normalized.parse::<u64>().unwrap_or(0)
}

fn ascii_digit(c: char) -> char {
    let offset = match c {
        '\u{06F0}'..='\u{06F9}' => c as u32 - 0x06F0,
        '\u{0660}'..='\u{0669}' => c as u32 - 0x0660,
        _ => return c,
    };
    char::from_digit(offset, 10).unwrap_or(c)
}

fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(footer: Option<&str>, rows: &[&[&str]]) -> String {
        let body: String = rows
            .iter()
            .map(|cells| {
                let tds: String = cells.iter().map(|c| format!("<td>{c}</td>")).collect();
                format!("<tr>{tds}</tr>")
            })
            .collect();
        let foot = footer
            .map(|f| format!("<tfoot><tr><td colspan=\"4\">{f}</td></tr></tfoot>"))
            .unwrap_or_default();
        format!(
            "<html><body><table><thead><tr><th>نام</th><th>قیمت</th><th>تغییر</th><th>زمان</th></tr></thead>\
             <tbody>{body}</tbody>{foot}</table></body></html>"
        )
    }

    #[test]
    fn matching_row_is_extracted() {
        let html = page(None, &[&["دلار", "50,000", "+200", "12:00"]]);
        let out = extract_price(&html, "دلار");
        assert_eq!(out.unit, "تومان");
        assert_eq!(
            out.data,
            vec![PriceRecord {
                name: "دلار".into(),
                price: 50000,
                change: "+200".into(),
                time: "12:00".into(),
            }]
        );
    }

    #[test]
    fn non_numeric_price_is_zero() {
        let html = page(None, &[&["یورو", "N/A", "0", "11:30"]]);
        let out = extract_price(&html, "یورو");
        assert_eq!(out.data.len(), 1);
        assert_eq!(out.data[0].price, 0);
    }

    #[test]
    fn footer_date_is_captured() {
        let html = page(Some("تاریخ بروزرسانی: 1402/01/01"), &[]);
        assert_eq!(extract_price(&html, "دلار").date.as_deref(), Some("1402/01/01"));
    }

    #[test]
    fn footer_without_pattern_gives_no_date() {
        let html = page(Some("منبع: بازار آزاد"), &[&["دلار", "1", "0", "1"]]);
        let out = extract_price(&html, "دلار");
        assert!(out.date.is_none());
        assert_eq!(out.data.len(), 1);
    }

    #[test]
    fn only_first_footer_cell_is_consulted() {
        let html = "<table><tbody></tbody><tfoot><tr><td>---</td>\
                    <td>تاریخ بروزرسانی: 1402/01/01</td></tr></tfoot></table>";
        assert!(extract_price(html, "دلار").date.is_none());
    }

    #[test]
    fn no_match_yields_empty_data() {
        let html = page(
            Some("تاریخ بروزرسانی: 1403/05/12"),
            &[&["یورو", "60,000", "-100", "12:00"]],
        );
        let out = extract_price(&html, "دلار");
        assert!(out.data.is_empty());
        assert_eq!(out.date.as_deref(), Some("1403/05/12"));
    }

    #[test]
    fn short_rows_are_skipped() {
        let html = page(None, &[&["دلار", "50,000", "+200"], &["دلار", "51,000", "+300", "13:00"]]);
        let out = extract_price(&html, "دلار");
        assert_eq!(out.data.len(), 1);
        assert_eq!(out.data[0].price, 51000);
    }

    #[test]
    fn all_matches_kept_in_document_order() {
        let html = page(
            None,
            &[
                &["دلار", "1,000", "a", "t1"],
                &["یورو", "2,000", "b", "t2"],
                &["دلار", "3,000", "c", "t3", "extra"],
            ],
        );
        let prices: Vec<u64> = extract_price(&html, "دلار").data.iter().map(|r| r.price).collect();
        assert_eq!(prices, vec![1000, 3000]);
    }

    #[test]
    fn match_is_exact_after_trim() {
        let html = page(None, &[&["  دلار \n", "5", "0", "1"], &["دلار کانادا", "6", "0", "1"]]);
        let out = extract_price(&html, "دلار");
        assert_eq!(out.data.len(), 1);
        assert_eq!(out.data[0].name, "دلار");
        assert_eq!(out.data[0].price, 5);
    }

    #[test]
    fn nested_markup_text_is_concatenated() {
        let html = page(None, &[&["<span>دلار</span>", "<b>50,000</b>", "<i>+0.4%</i>", "12:00"]]);
        let out = extract_price(&html, "دلار");
        assert_eq!(out.data[0].price, 50000);
        assert_eq!(out.data[0].change, "+0.4%");
    }

    #[test]
    fn rows_without_explicit_tbody_are_scanned() {
        // html5ever inserts the implied <tbody>, so bare <tr> rows still count.
        let html = "<table><tr><td>دلار</td><td>7,000</td><td>0</td><td>09:00</td></tr></table>";
        let out = extract_price(html, "دلار");
        assert_eq!(out.data.len(), 1);
        assert_eq!(out.data[0].price, 7000);
    }

    #[test]
    fn text_nodes_are_joined_before_trimming() {
        let html = page(None, &[&["<span>دلار</span> <b>x</b>", "1", "0", "1"]]);
        assert_eq!(extract_price(&html, "دلار x").data.len(), 1);
        assert!(extract_price(&html, "دلارx").data.is_empty());
    }

    #[test]
    fn garbage_input_does_not_panic() {
        let out = extract_price("<<<not html>>> <tr><td>", "دلار");
        assert!(out.data.is_empty());
        assert!(out.date.is_none());
    }

    #[test]
    fn price_parsing_variants() {
        assert_eq!(parse_price("1,234,567"), 1_234_567);
        assert_eq!(parse_price(" 42 "), 42);
        assert_eq!(parse_price("۵۰,۰۰۰"), 50_000);
        assert_eq!(parse_price("٦٠٠"), 600);
        assert_eq!(parse_price("-5"), 0);
        assert_eq!(parse_price(""), 0);
        assert_eq!(parse_price("12.5"), 0);
    }

    #[test]
    fn update_date_allows_missing_space() {
        assert_eq!(parse_update_date("تاریخ بروزرسانی:1402/12/29").as_deref(), Some("1402/12/29"));
        assert_eq!(parse_update_date("updated: 1402/12/29"), None);
    }
}
