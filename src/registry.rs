use url::Url;

use crate::error::Result;

/// One scraped currency: the label as it appears in the price table, the page
/// path under the base origin, and a flag passed through to the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyDefinition {
    pub name: &'static str,
    pub path: &'static str,
    pub flag: &'static str,
}

const fn currency(
    name: &'static str,
    path: &'static str,
    flag: &'static str,
) -> CurrencyDefinition {
    CurrencyDefinition { name, path, flag }
}

/// Scrape order. Names are unique.
pub static CURRENCIES: &[CurrencyDefinition] = &[
    currency("دلار", "قیمت-دلار", "🇺🇸"),
    currency("یورو", "قیمت-یورو", "🇪🇺"),
    currency("پوند", "قیمت-پوند", "🇬🇧"),
    currency("درهم امارات", "قیمت-درهم-امارات", "🇦🇪"),
    currency("لیر ترکیه", "قیمت-لیر-ترکیه", "🇹🇷"),
    currency("یوان چین", "قیمت-یوان-چین", "🇨🇳"),
    currency("روبل روسیه", "قیمت-روبل-روسیه", "🇷🇺"),
    currency("دینار عراق", "قیمت-دینار-عراق", "🇮🇶"),
    currency("دلار کانادا", "قیمت-دلار-کانادا", "🇨🇦"),
    currency("افغانی افغانستان", "قیمت-افغانی-افغانستان", "🇦🇫"),
    currency("ریال قطر", "قیمت-ریال-قطر", "🇶🇦"),
    currency("ریال عمان", "قیمت-ریال-عمان", "🇴🇲"),
    currency("دلار استرالیا", "قیمت-دلار-استرالیا", "🇦🇺"),
    currency("کرون سوئد", "قیمت-کرون-سوئد", "🇸🇪"),
    currency("درام ارمنستان", "قیمت-درام-ارمنستان", "🇦🇲"),
    // The site spells the slug without the madda.
    currency("منات آذربایجان", "قیمت-منات-اذربایجان", "🇦🇿"),
    currency("فرانک سوئیس", "قیمت-فرانک-سوئیس", "🇨🇭"),
    currency("کرون دانمارک", "قیمت-کرون-دانمارک", "🇩🇰"),
    currency("روپیه هند", "قیمت-روپیه-هند", "🇮🇳"),
    currency("رینگیت مالزی", "قیمت-رینگیت-مالزی", "🇲🇾"),
    currency("کرون نروژ", "قیمت-کرون-نروژ", "🇳🇴"),
    currency("ریال عربستان", "قیمت-ریال-عربستان", "🇸🇦"),
    currency("دلار سنگاپور", "قیمت-دلار-سنگاپور", "🇸🇬"),
];

/// Parse the configured base origin once per run.
pub fn parse_base_url(base: &str) -> Result<Url> {
    Ok(Url::parse(base)?)
}

/// Resolve a currency page against the base. A base with a trailing path
/// component (no final `/`) yields a sibling page, never a nested one.
pub fn currency_url(base: &Url, def: &CurrencyDefinition) -> Result<Url> {
    Ok(base.join(def.path)?)
}
